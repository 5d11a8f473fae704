//! Topic identifiers and their Wikipedia article URLs.
//!
//! A topic is the canonical name of a page in the hyperlink graph
//! ("Microwave oven"). User input may be either a full article URL or a
//! plain topic string.

/// Extract the topic from user input. Returns `None` for empty input or a
/// URL without a `/wiki/` article segment.
pub fn extract(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let title = trimmed.split("/wiki/").nth(1)?;
        let title = title.split(['?', '#']).next().unwrap_or("");
        if title.is_empty() {
            return None;
        }
        return Some(title.replace('_', " "));
    }
    Some(trimmed.to_string())
}

/// Canonical article URL for a topic; matches the backend's generation
/// exactly (spaces become underscores).
pub fn article_url(topic: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{}", topic.replace(' ', "_"))
}
