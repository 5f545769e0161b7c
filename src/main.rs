use anyhow::Result;
use clap::{Arg, Command};
use std::collections::HashMap;
use tracing::{error, info, warn};

use watchtime_analyzer::config::{Config, OutputFormat};
use watchtime_analyzer::scoring::analyze_video;
use watchtime_analyzer::suggest::categorized_suggestions;
use watchtime_analyzer::video::{EngagementMetrics, VideoRecord};
use watchtime_analyzer::youtube::{extract_video_id, YouTubeClient};
use watchtime_analyzer::{
    create_embedder, format_duration, rank_by_potential, BatchVideo, ClusterAssignment,
    ClusteringEngine, RankedVideo, WatchTimeAnalysis,
};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Command::new("Watch-Time Analyzer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("YouTube watch-time analysis and optimization")
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .value_name("URL")
                .help("YouTube video URL or id to analyze"),
        )
        .arg(
            Arg::new("channel")
                .short('c')
                .long("channel")
                .value_name("CHANNEL_ID")
                .help("Channel id to batch-analyze and rank"),
        )
        .arg(
            Arg::new("max-results")
                .short('n')
                .long("max-results")
                .value_name("NUM")
                .help("Number of channel videos to fetch"),
        )
        .arg(
            Arg::new("playlists")
                .short('p')
                .long("playlists")
                .help("Cluster channel videos into playlist suggestions")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("clusters")
                .short('k')
                .long("clusters")
                .value_name("NUM")
                .help("Target number of playlist clusters"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("YouTube Data API key (overrides config and environment)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text or json"),
        )
        .arg(
            Arg::new("serve")
                .long("serve")
                .value_name("PORT")
                .help("Start the JSON API server (requires the 'api' feature)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(if verbose {
            "watchtime_analyzer=debug,info"
        } else {
            "watchtime_analyzer=info,warn"
        })
        .init();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config.api.api_key = Some(api_key.clone());
    }
    if let Some(max_results) = matches.get_one::<String>("max-results") {
        config.api.max_results = max_results.parse()?;
    }
    if let Some(clusters) = matches.get_one::<String>("clusters") {
        config.clustering.n_clusters = clusters.parse()?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.output.format = match format.as_str() {
            "json" => OutputFormat::Json,
            "text" => OutputFormat::Text,
            other => {
                error!("Unknown output format: {}", other);
                return Err(anyhow::anyhow!("unknown output format"));
            }
        };
    }

    config.validate()?;

    if let Some(port) = matches.get_one::<String>("serve") {
        return serve(config, port.parse()?).await;
    }

    let client = YouTubeClient::new(&config.api)?;

    if let Some(url) = matches.get_one::<String>("url") {
        analyze_single(&client, &config, url).await
    } else if let Some(channel_id) = matches.get_one::<String>("channel") {
        analyze_channel(
            &client,
            &config,
            channel_id,
            matches.get_flag("playlists"),
        )
        .await
    } else {
        error!("Nothing to do: pass --url to analyze a video or --channel to rank a channel");
        Err(anyhow::anyhow!("no input provided"))
    }
}

#[cfg(feature = "api")]
async fn serve(config: Config, port: u16) -> Result<()> {
    use std::sync::Arc;
    use watchtime_analyzer::api::ApiServer;

    let client = Arc::new(YouTubeClient::new(&config.api)?);
    ApiServer::new(client, Arc::new(config), port).start().await
}

#[cfg(not(feature = "api"))]
async fn serve(_config: Config, _port: u16) -> Result<()> {
    Err(anyhow::anyhow!(
        "this build has no API server; rebuild with --features api"
    ))
}

/// Analyze one video and render the full report.
async fn analyze_single(client: &YouTubeClient, config: &Config, url: &str) -> Result<()> {
    let video_id = extract_video_id(url)
        .ok_or_else(|| anyhow::anyhow!("could not extract a video id from '{}'", url))?;

    info!("🔍 Fetching video {}", video_id);
    let video = client.fetch_video(&video_id).await?;

    let analysis = analyze_video(&video, &config.analysis);
    let metrics = EngagementMetrics::from_record(&video);
    let suggestions = categorized_suggestions(&video, &metrics);

    let report = serde_json::json!({
        "video": &video,
        "analysis": &analysis,
        "suggestions": &suggestions,
    });

    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_analysis(&video, &analysis, &suggestions),
    }

    if let Some(report_dir) = &config.output.report_dir {
        tokio::fs::create_dir_all(report_dir).await?;
        let path = report_dir.join(format!("{}_analysis.json", video.video_id));
        tokio::fs::write(&path, serde_json::to_string_pretty(&report)?).await?;
        info!("💾 Report saved to {}", path.display());
    }

    Ok(())
}

/// Fetch a channel's videos, rank them by potential, optionally cluster.
async fn analyze_channel(
    client: &YouTubeClient,
    config: &Config,
    channel_id: &str,
    playlists: bool,
) -> Result<()> {
    info!(
        "🔍 Fetching up to {} videos for channel {}",
        config.api.max_results, channel_id
    );
    let videos = client
        .list_channel_videos(channel_id, config.api.max_results)
        .await?;

    if videos.is_empty() {
        warn!("Channel has no videos to analyze");
        return Ok(());
    }

    let batch: Vec<BatchVideo> = videos.iter().map(BatchVideo::from_record).collect();
    let ranked = rank_by_potential(batch);

    let assignment = if playlists {
        let embedder = create_embedder(&config.embedding)?;
        let engine = ClusteringEngine::new(embedder, config.clustering.clone());
        Some(engine.cluster_videos(&videos).await?)
    } else {
        None
    };

    match config.output.format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "ranking": &ranked,
                "playlists": &assignment,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print_ranking(&ranked, &videos);
            if let Some(assignment) = &assignment {
                print_playlists(assignment, &videos);
            }
        }
    }

    Ok(())
}

fn print_analysis(
    video: &VideoRecord,
    analysis: &WatchTimeAnalysis,
    suggestions: &watchtime_analyzer::CategorizedSuggestions,
) {
    println!("📊 Video Information");
    println!("  Title:     {}", video.title);
    if let Some(channel) = &video.channel_title {
        println!("  Channel:   {}", channel);
    }
    println!(
        "  Duration:  {} ({}s)",
        format_duration(video.duration_s),
        video.duration_s
    );
    if let Some(published) = video.published_at {
        println!("  Published: {}", published.format("%B %d, %Y"));
    }
    println!(
        "  Views: {}  Likes: {}  Comments: {}",
        video.views, video.likes, video.comments
    );

    println!();
    println!("⏱️ Watch Time Analysis");
    println!(
        "  Optimization score:    {}/100",
        analysis.optimization_score
    );
    println!("  Engagement rate:       {}%", analysis.engagement_rate);
    println!(
        "  Current watch time:    ~{} seconds",
        analysis.current_watch_time
    );
    println!(
        "  Potential improvement: +{} seconds",
        analysis.potential_improvement
    );

    println!();
    println!("💡 Optimization Suggestions");
    for (i, suggestion) in analysis.suggestions.iter().enumerate() {
        println!("  {}. {}", i + 1, suggestion);
    }

    println!();
    println!("🎯 Action Items");
    for item in &analysis.action_items {
        println!("  • {}", item);
    }

    for (name, messages) in suggestions.sections() {
        if messages.is_empty() {
            continue;
        }
        println!();
        println!("📌 {}", name);
        for message in messages {
            println!("  • {}", message);
        }
    }
}

fn print_ranking(ranked: &[RankedVideo], videos: &[VideoRecord]) {
    let titles: HashMap<&str, &str> = videos
        .iter()
        .map(|v| (v.video_id.as_str(), v.title.as_str()))
        .collect();

    println!("🏆 Videos ranked by lost watch-time potential");
    for (i, entry) in ranked.iter().enumerate() {
        let title = titles
            .get(entry.video.video_id.as_str())
            .copied()
            .unwrap_or("<unknown>");
        println!(
            "  {:>2}. [{:>10.0}] {} ({} views, {})",
            i + 1,
            entry.potential.sort_key(),
            title,
            entry.video.views,
            format_duration(entry.video.duration_s)
        );
    }
}

fn print_playlists(assignment: &ClusterAssignment, videos: &[VideoRecord]) {
    let titles: HashMap<&str, &str> = videos
        .iter()
        .map(|v| (v.video_id.as_str(), v.title.as_str()))
        .collect();

    println!();
    println!(
        "🗂️ Suggested playlists ({} clusters)",
        assignment.cluster_count()
    );
    for (label, members) in &assignment.playlists {
        println!("  Playlist {}:", label);
        for video_id in members {
            let title = titles.get(video_id.as_str()).copied().unwrap_or("<unknown>");
            println!("    - {} ({})", title, video_id);
        }
    }
}
