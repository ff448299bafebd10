use crate::models::StreamingSource;
use std::collections::HashSet;

/// Reduces raw source rows to the allow-listed platform names they mention
///
/// Keeps first-seen order and emits each name at most once. Rows with an
/// empty or missing name, or a name outside `allow_list`, are skipped.
pub fn filter_platforms(sources: &[StreamingSource], allow_list: &HashSet<&str>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut platforms = Vec::new();

    for name in sources.iter().filter_map(|s| s.platform_name.as_deref()) {
        if name.is_empty() || !allow_list.contains(name) {
            continue;
        }
        if seen.insert(name) {
            platforms.push(name.to_string());
        }
    }

    tracing::debug!(
        sources = sources.len(),
        platforms = platforms.len(),
        "Filtered streaming sources"
    );

    platforms
}
