//! Relevance scoring for content search
//!
//! Each query term is credited once, for the most significant field it occurs
//! in: title, then tags, then subject/topic, then description. A phrase match
//! on the title earns a bonus.

use std::cmp::Ordering;

use crate::models::Content;

pub const TITLE_WEIGHT: u32 = 8;
pub const TAG_WEIGHT: u32 = 4;
pub const CLASSIFICATION_WEIGHT: u32 = 2;
pub const DESCRIPTION_WEIGHT: u32 = 1;
pub const TITLE_PHRASE_BONUS: u32 = 8;

/// Lowercased whitespace-separated terms; empty for a blank query.
pub fn terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Relevance of `content` for `query`. Zero means no hit.
pub fn score(content: &Content, query: &str) -> u32 {
    let terms = terms(query);
    if terms.is_empty() {
        return 0;
    }

    let title = content.title.to_lowercase();
    let tags: Vec<String> = content.tags.iter().map(|t| t.to_lowercase()).collect();
    let subject = content.subject.to_lowercase();
    let topic = content.topic.as_deref().unwrap_or_default().to_lowercase();
    let description = content.description.to_lowercase();

    let mut total = 0;
    for term in &terms {
        total += if title.contains(term.as_str()) {
            TITLE_WEIGHT
        } else if tags.iter().any(|t| t.contains(term.as_str())) {
            TAG_WEIGHT
        } else if subject.contains(term.as_str()) || topic.contains(term.as_str()) {
            CLASSIFICATION_WEIGHT
        } else if description.contains(term.as_str()) {
            DESCRIPTION_WEIGHT
        } else {
            0
        };
    }

    if total > 0 && terms.len() > 1 && title.contains(&terms.join(" ")) {
        total += TITLE_PHRASE_BONUS;
    }
    total
}

/// Score every item and keep the hits, best first. Ties go to the higher
/// rated, then the newer item.
pub fn rank(items: Vec<Content>, query: &str) -> Vec<(u32, Content)> {
    let mut hits: Vec<(u32, Content)> = items
        .into_iter()
        .filter_map(|c| {
            let s = score(&c, query);
            (s > 0).then_some((s, c))
        })
        .collect();

    hits.sort_by(|(sa, a), (sb, b)| {
        sb.cmp(sa)
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    hits
}
