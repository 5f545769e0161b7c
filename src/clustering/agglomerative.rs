//! Hierarchical agglomerative clustering over embedding vectors.
//!
//! Average linkage over Euclidean distance, merged bottom-up until the
//! target cluster count remains. Ties break toward the lowest index pair,
//! so labels are deterministic for fixed inputs.

/// Euclidean distance between two vectors of equal dimension.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Cluster the vectors into `n_clusters` groups and return one label per
/// input, in input order. Labels are assigned by first appearance, so label
/// 0 always contains the first input.
///
/// Fewer vectors than requested clusters silently reduces the effective
/// count; an empty input yields an empty labeling.
pub fn cluster_labels(vectors: &[Vec<f32>], n_clusters: usize) -> Vec<usize> {
    let n = vectors.len();
    if n == 0 {
        return Vec::new();
    }
    let target = n_clusters.clamp(1, n);

    // members[i] is Some(point indices) while cluster i is alive.
    let mut members: Vec<Option<Vec<usize>>> = (0..n).map(|i| Some(vec![i])).collect();

    // Pairwise average-linkage distances, kept exact under merges via the
    // Lance-Williams update for average linkage.
    let mut dist = vec![vec![0.0f32; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = euclidean_distance(&vectors[i], &vectors[j]);
            dist[i][j] = d;
            dist[j][i] = d;
        }
    }

    let mut alive = n;
    while alive > target {
        // Closest pair of live clusters; strict comparison keeps the first
        // minimal pair on ties.
        let mut best: Option<(usize, usize, f32)> = None;
        for i in 0..n {
            if members[i].is_none() {
                continue;
            }
            for j in (i + 1)..n {
                if members[j].is_none() {
                    continue;
                }
                match best {
                    Some((_, _, d)) if dist[i][j] >= d => {}
                    _ => best = Some((i, j, dist[i][j])),
                }
            }
        }

        let (i, j, _) = match best {
            Some(pair) => pair,
            None => break,
        };

        let size_i = members[i].as_ref().map(|m| m.len()).unwrap_or(0) as f32;
        let size_j = members[j].as_ref().map(|m| m.len()).unwrap_or(0) as f32;

        // d(A∪B, C) = (|A| d(A,C) + |B| d(B,C)) / (|A| + |B|)
        for k in 0..n {
            if k == i || k == j || members[k].is_none() {
                continue;
            }
            let merged = (size_i * dist[i][k] + size_j * dist[j][k]) / (size_i + size_j);
            dist[i][k] = merged;
            dist[k][i] = merged;
        }

        let absorbed = members[j].take().unwrap_or_default();
        if let Some(kept) = members[i].as_mut() {
            kept.extend(absorbed);
        }
        alive -= 1;
    }

    // Relabel live clusters by first appearance over input order.
    let mut labels = vec![0usize; n];
    let mut next_label = 0usize;
    for cluster in members.iter().flatten() {
        for &point in cluster {
            labels[point] = next_label;
        }
        next_label += 1;
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32) -> Vec<f32> {
        vec![x, y]
    }

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean_distance(&[1.0, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_two_well_separated_groups() {
        let vectors = vec![
            point(0.0, 0.0),
            point(0.1, 0.0),
            point(10.0, 10.0),
            point(10.1, 10.0),
            point(0.0, 0.1),
        ];
        let labels = cluster_labels(&vectors, 2);

        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[0], labels[4]);
        assert_eq!(labels[2], labels[3]);
        assert_ne!(labels[0], labels[2]);
    }

    #[test]
    fn test_labels_are_first_appearance_ordered() {
        let vectors = vec![point(10.0, 10.0), point(0.0, 0.0), point(10.1, 10.0)];
        let labels = cluster_labels(&vectors, 2);
        // The first input always carries label 0.
        assert_eq!(labels[0], 0);
        assert_eq!(labels[2], 0);
        assert_eq!(labels[1], 1);
    }

    #[test]
    fn test_more_clusters_than_points_degrades() {
        let vectors = vec![point(0.0, 0.0), point(1.0, 1.0), point(2.0, 2.0)];
        let labels = cluster_labels(&vectors, 8);
        // Each point its own cluster.
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn test_single_cluster() {
        let vectors = vec![point(0.0, 0.0), point(5.0, 5.0), point(9.0, 0.0)];
        let labels = cluster_labels(&vectors, 1);
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_labels(&[], 4).is_empty());
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let vectors: Vec<Vec<f32>> = (0..12)
            .map(|i| point((i % 4) as f32 * 3.0, (i / 4) as f32 * 3.0))
            .collect();
        let first = cluster_labels(&vectors, 3);
        for _ in 0..5 {
            assert_eq!(cluster_labels(&vectors, 3), first);
        }
    }
}
