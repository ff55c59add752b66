//! Traditional tennis score labels.

/// Label for a game point count: 0, 15, 30, 40 or Ad.
///
/// Returns `None` for counts above 4, which have no traditional name.
pub fn traditional_score(points: u32) -> Option<&'static str> {
    match points {
        0 => Some("0"),
        1 => Some("15"),
        2 => Some("30"),
        3 => Some("40"),
        4 => Some("Ad"),
        _ => None,
    }
}

/// Label for a game point count, falling back to the raw number.
pub fn score_label(points: u32) -> String {
    traditional_score(points)
        .map(str::to_string)
        .unwrap_or_else(|| points.to_string())
}
