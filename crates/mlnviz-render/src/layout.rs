//! Deterministic node placement and colour helpers.

use std::f64::consts::TAU;

/// Points evenly spaced on the unit circle, starting at angle zero.
/// A lone node sits at the origin.
pub fn circular(count: usize) -> Vec<(f64, f64)> {
    if count == 1 {
        return vec![(0.0, 0.0)];
    }
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

const CATEGORY_PALETTE: [&str; 16] = [
    "#3288bd", "#99d594", "#e6f598", "#fee08b", "#fc8d59", "#d53e4f", "#5e4fa2", "#66c2a5",
    "#f46d43", "#abdda4", "#9e0142", "#fdae61", "#1a9850", "#762a83", "#8c510a", "#01665e",
];

/// Colour for category `index`, cycling through a fixed palette.
pub fn category_color(index: usize) -> &'static str {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

const CENTRALITY_BUCKETS: [&str; 5] = ["#deebf7", "#9ecae1", "#6baed6", "#3182bd", "#08519c"];

/// Colour for a centrality in `[0, 1]`; darker is more central.
pub fn centrality_color(centrality: f64) -> &'static str {
    let last = CENTRALITY_BUCKETS.len() - 1;
    let bucket = (centrality.clamp(0.0, 1.0) * last as f64).round() as usize;
    CENTRALITY_BUCKETS[bucket.min(last)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_points_are_on_unit_circle() {
        let points = circular(6);
        assert_eq!(points.len(), 6);
        for (x, y) in &points {
            assert!(((x * x + y * y) - 1.0).abs() < 1e-9);
        }
        assert!((points[0].0 - 1.0).abs() < 1e-9);
        assert!(points[3].0 < -0.99);
    }

    #[test]
    fn degenerate_counts() {
        assert!(circular(0).is_empty());
        assert_eq!(circular(1), vec![(0.0, 0.0)]);
    }

    #[test]
    fn colours() {
        assert_eq!(category_color(0), category_color(16));
        assert_ne!(category_color(1), category_color(2));
        assert_eq!(centrality_color(0.0), "#deebf7");
        assert_eq!(centrality_color(1.0), "#08519c");
        assert_eq!(centrality_color(7.5), "#08519c");
    }
}
