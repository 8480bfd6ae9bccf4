use super::model::{Priority, RecommendationToken};

// ---------------------------------------------------------------------------
// Multi-value fields
// ---------------------------------------------------------------------------

/// Placeholder tokens that carry no schema information.
pub const SENTINELS: [&str; 3] = ["Unspecified", "Unknown", ""];

/// Split a comma-separated field into trimmed, non-empty tokens.
pub fn parse_multi_value(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether a token is a placeholder excluded from frequency analysis.
pub fn is_sentinel(token: &str) -> bool {
    SENTINELS.contains(&token)
}

// ---------------------------------------------------------------------------
// Recommendation priorities
// ---------------------------------------------------------------------------

/// Parse `Name(Priority), Name(Priority), ...`.
///
/// Elements that do not have the `<text>(<text>)` shape, or whose priority is
/// not exactly `High`, `Medium` or `Low`, are skipped.
pub fn parse_priority_tokens(raw: &str) -> Vec<RecommendationToken> {
    raw.split(',').filter_map(parse_priority_token).collect()
}

fn parse_priority_token(element: &str) -> Option<RecommendationToken> {
    let open = element.find('(')?;
    let close = open + element[open..].find(')')?;

    // Both groups must be non-empty before trimming.
    let schema = &element[..open];
    let priority = &element[open + 1..close];
    if schema.is_empty() || priority.is_empty() {
        return None;
    }

    let schema = schema.trim();
    if schema.is_empty() {
        return None;
    }
    let priority = Priority::parse(priority.trim())?;

    Some(RecommendationToken {
        schema: schema.to_string(),
        priority,
    })
}
