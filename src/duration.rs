//! ISO 8601 duration codec for YouTube `contentDetails.duration` values.
//!
//! The Data API reports durations in the `PT#H#M#S` notation. Parsing is
//! total: malformed input yields `None`, never an error. Callers must treat
//! `None` as "duration unknown" rather than zero.

/// Parse an ISO 8601 period/time duration (`PT1H2M3S`, `PT15M33S`, `PT45S`)
/// into a number of seconds.
///
/// Components may be omitted (`PT1H5S` is valid) but must appear in
/// hours-minutes-seconds order, and at least one component is required.
/// Returns `None` for anything else.
pub fn parse_iso8601(text: &str) -> Option<u64> {
    let body = text.strip_prefix("PT")?;
    if body.is_empty() {
        return None;
    }

    // Unit ranks enforce H < M < S ordering without repetition.
    let mut last_rank: i8 = -1;
    let mut seconds: u64 = 0;
    let mut digits = String::new();
    let mut components = 0;

    for c in body.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }

        let (rank, multiplier) = match c {
            'H' => (0, 3600),
            'M' => (1, 60),
            'S' => (2, 1),
            _ => return None,
        };

        if digits.is_empty() || rank <= last_rank {
            return None;
        }

        let value: u64 = digits.parse().ok()?;
        seconds = seconds.checked_add(value.checked_mul(multiplier)?)?;
        last_rank = rank;
        digits.clear();
        components += 1;
    }

    // Trailing digits without a unit designator are malformed.
    if !digits.is_empty() || components == 0 {
        return None;
    }

    Some(seconds)
}

/// Format a seconds count for display: `H:MM:SS` when there is at least one
/// hour, `M:SS` otherwise. Zero renders as `0:00`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_duration() {
        assert_eq!(parse_iso8601("PT1H2M3S"), Some(3723));
        assert_eq!(parse_iso8601("PT2H"), Some(7200));
        assert_eq!(parse_iso8601("PT15M"), Some(900));
        assert_eq!(parse_iso8601("PT45S"), Some(45));
    }

    #[test]
    fn test_parse_skipped_components() {
        assert_eq!(parse_iso8601("PT1H5S"), Some(3605));
        assert_eq!(parse_iso8601("PT1H30M"), Some(5400));
    }

    #[test]
    fn test_parse_large_values() {
        // Seconds are not required to be normalized.
        assert_eq!(parse_iso8601("PT90S"), Some(90));
        assert_eq!(parse_iso8601("PT600S"), Some(600));
    }

    #[test]
    fn test_parse_malformed_is_none() {
        assert_eq!(parse_iso8601(""), None);
        assert_eq!(parse_iso8601("PT"), None);
        assert_eq!(parse_iso8601("P1D"), None);
        assert_eq!(parse_iso8601("1H2M"), None);
        assert_eq!(parse_iso8601("PT1X"), None);
        assert_eq!(parse_iso8601("PTH"), None);
        assert_eq!(parse_iso8601("PT5"), None);
        assert_eq!(parse_iso8601("PT1M1H"), None);
        assert_eq!(parse_iso8601("PT1M2M"), None);
        assert_eq!(parse_iso8601("not a duration"), None);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(45), "0:45");
        assert_eq!(format_duration(90), "1:30");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(3723), "1:02:03");
        assert_eq!(format_duration(7200), "2:00:00");
    }

    #[test]
    fn test_round_trip_preserves_seconds() {
        for text in ["PT1H2M3S", "PT8M20S", "PT59S", "PT3H"] {
            let seconds = parse_iso8601(text).unwrap();
            let rendered = format_duration(seconds);
            // The rendered form is a different notation for the same count.
            let mut parts = rendered.split(':').rev();
            let s: u64 = parts.next().unwrap().parse().unwrap();
            let m: u64 = parts.next().unwrap().parse().unwrap();
            let h: u64 = parts.next().map(|p| p.parse().unwrap()).unwrap_or(0);
            assert_eq!(h * 3600 + m * 60 + s, seconds);
        }
    }
}
