pub mod client;

use adhyayan_core::CatalogNode;
use std::fmt::Write;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Indented outline of `nodes`, `depth` levels deep (0 = unlimited).
///
/// Each line is `name [slug]`, followed by aliases when there are any.
pub fn render_tree(nodes: &[CatalogNode], depth: usize) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(&mut out, node, 0, depth);
    }
    out
}

fn render_node(out: &mut String, node: &CatalogNode, level: usize, depth: usize) {
    let indent = "  ".repeat(level);
    let _ = write!(out, "{}{} [{}]", indent, node.name, node.slug);
    if !node.aliases.is_empty() {
        let _ = write!(out, " ({})", node.aliases.join(", "));
    }
    out.push('\n');

    if depth == 0 || level + 1 < depth {
        for child in &node.children {
            render_node(out, child, level + 1, depth);
        }
    }
}

/// Initialize tracing for the CLI. Logs go to stderr so command output stays pipeable.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use adhyayan_core::{Catalog, NodeKind};

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_counts_chars() {
        assert_eq!(truncate_string("अध्ययन", 6), "अध्ययन");
    }

    #[test]
    fn render_tree_respects_depth() {
        let catalog = Catalog::builtin();
        let engineering = catalog.department("engineering").unwrap().clone();

        let shallow = render_tree(std::slice::from_ref(&engineering), 1);
        assert_eq!(shallow.lines().count(), 1);
        assert!(shallow.starts_with("Engineering [engineering]"));

        let two = render_tree(std::slice::from_ref(&engineering), 2);
        assert_eq!(two.lines().count(), 1 + engineering.children.len());
        assert!(two.contains("\n  Computer Science & Engineering [cse] (CSE"));
    }

    #[test]
    fn render_tree_unlimited_reaches_topics() {
        let topic = CatalogNode::new(NodeKind::Topic, "trees", "Trees");
        let subject = CatalogNode::new(NodeKind::Subject, "data-structures", "Data Structures")
            .with_children(vec![topic]);
        let out = render_tree(&[subject], 0);
        assert_eq!(out, "Data Structures [data-structures]\n  Trees [trees]\n");
    }
}
