//! Static study-material hierarchy
//!
//! The catalog is a fixed tree: Department → Branch → Year → Subject → Topic.
//! It is compiled into the binary (see [`Catalog::builtin`]) and never mutated at
//! runtime. Uploaded content is *not* validated against it; the
//! [matcher](crate::matcher) reconciles free text with these nodes when content
//! is read.

mod builtin;

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::CatalogHit;

/// Level of a node in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Department,
    Branch,
    Year,
    Subject,
    Topic,
}

impl NodeKind {
    /// Kind expected for the children of this kind.
    pub fn child(&self) -> Option<NodeKind> {
        match self {
            NodeKind::Department => Some(NodeKind::Branch),
            NodeKind::Branch => Some(NodeKind::Year),
            NodeKind::Year => Some(NodeKind::Subject),
            NodeKind::Subject => Some(NodeKind::Topic),
            NodeKind::Topic => None,
        }
    }
}

/// A node of the hierarchy tree
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogNode {
    pub kind: NodeKind,
    /// URL-safe identifier, unique among siblings
    pub slug: String,
    pub name: String,
    /// Abbreviations and alternative spellings accepted by the matcher
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<CatalogNode>,
}

impl CatalogNode {
    pub fn new(kind: NodeKind, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            slug: slug.into(),
            name: name.into(),
            aliases: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_children(mut self, children: Vec<CatalogNode>) -> Self {
        self.children = children;
        self
    }

    /// Direct child by slug
    pub fn child(&self, slug: &str) -> Option<&CatalogNode> {
        self.children.iter().find(|c| c.slug == slug)
    }

    /// Name, slug and aliases: every label the matcher compares against.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(std::iter::once(self.slug.as_str()))
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Copy of this node without its descendants, for listing responses.
    pub fn shallow(&self) -> CatalogNode {
        CatalogNode {
            kind: self.kind,
            slug: self.slug.clone(),
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            children: Vec::new(),
        }
    }
}

/// The full hierarchy
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Catalog {
    departments: Vec<CatalogNode>,
}

impl Catalog {
    pub fn new(departments: Vec<CatalogNode>) -> Self {
        Self { departments }
    }

    /// The catalog compiled into the application
    pub fn builtin() -> Self {
        Self::new(builtin::departments())
    }

    pub fn departments(&self) -> &[CatalogNode] {
        &self.departments
    }

    pub fn department(&self, slug: &str) -> Option<&CatalogNode> {
        self.departments.iter().find(|d| d.slug == slug)
    }

    pub fn branch(&self, department: &str, branch: &str) -> Option<&CatalogNode> {
        self.department(department)?.child(branch)
    }

    pub fn year(&self, department: &str, branch: &str, year: &str) -> Option<&CatalogNode> {
        self.branch(department, branch)?.child(year)
    }

    pub fn subject(
        &self,
        department: &str,
        branch: &str,
        year: &str,
        subject: &str,
    ) -> Option<&CatalogNode> {
        self.year(department, branch, year)?.child(subject)
    }

    /// Walk a slug path from the root. Returns every node along the way, or
    /// `None` if any segment is unknown. An empty path yields `None`.
    pub fn trail(&self, slugs: &[&str]) -> Option<Vec<&CatalogNode>> {
        let (first, rest) = slugs.split_first()?;
        let mut node = self.department(first)?;
        let mut trail = vec![node];
        for slug in rest {
            node = node.child(slug)?;
            trail.push(node);
        }
        Some(trail)
    }

    /// Case-insensitive substring search over subject and topic names and aliases.
    pub fn find_subjects(&self, query: &str) -> Vec<CatalogHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for dept in &self.departments {
            for branch in &dept.children {
                for year in &branch.children {
                    for subject in &year.children {
                        let trail = [dept, branch, year, subject];
                        if label_contains(subject, &needle) {
                            hits.push(hit(&trail, None));
                        }
                        for topic in &subject.children {
                            if label_contains(topic, &needle) {
                                hits.push(hit(&trail, Some(topic)));
                            }
                        }
                    }
                }
            }
        }
        hits
    }

    /// Check structural invariants: URL-safe slugs, unique sibling slugs, kinds
    /// that follow the hierarchy, and at least one branch per department.
    pub fn validate(&self) -> Result<()> {
        let slug_pattern = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$")
            .context("Failed to compile slug validation regex")?;

        if self.departments.is_empty() {
            return Err(anyhow::anyhow!("Catalog has no departments"));
        }

        for dept in &self.departments {
            if dept.children.is_empty() {
                return Err(anyhow::anyhow!(
                    "Department '{}' has no branches",
                    dept.slug
                ));
            }
        }

        validate_level(&self.departments, NodeKind::Department, &slug_pattern, "")
    }
}

fn validate_level(
    nodes: &[CatalogNode],
    expected: NodeKind,
    slug_pattern: &Regex,
    parent: &str,
) -> Result<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        if node.kind != expected {
            return Err(anyhow::anyhow!(
                "Node '{}/{}' is a {:?}, expected {:?}",
                parent,
                node.slug,
                node.kind,
                expected
            ));
        }
        if node.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Node '{}/{}' has no name", parent, node.slug));
        }
        if !slug_pattern.is_match(&node.slug) {
            return Err(anyhow::anyhow!(
                "Node '{}/{}' has an invalid slug",
                parent,
                node.slug
            ));
        }
        if !seen.insert(node.slug.as_str()) {
            return Err(anyhow::anyhow!(
                "Duplicate slug '{}' under '{}'",
                node.slug,
                parent
            ));
        }
        let path = format!("{}/{}", parent, node.slug);
        match expected.child() {
            Some(child_kind) => validate_level(&node.children, child_kind, slug_pattern, &path)?,
            None if !node.children.is_empty() => {
                return Err(anyhow::anyhow!("Topic '{}' cannot have children", path));
            }
            None => {}
        }
    }
    Ok(())
}

fn label_contains(node: &CatalogNode, needle: &str) -> bool {
    std::iter::once(node.name.as_str())
        .chain(node.aliases.iter().map(String::as_str))
        .any(|label| label.to_lowercase().contains(needle))
}

fn hit(trail: &[&CatalogNode], topic: Option<&CatalogNode>) -> CatalogHit {
    let slugs: Vec<&str> = trail.iter().map(|n| n.slug.as_str()).collect();
    let mut url = browse_url(&slugs);
    let mut names: Vec<&str> = trail.iter().map(|n| n.name.as_str()).collect();
    let target = match topic {
        Some(t) => {
            url.push_str(&format!("?topic={}", t.slug));
            names.push(t.name.as_str());
            t
        }
        None => trail[trail.len() - 1],
    };
    CatalogHit {
        kind: target.kind,
        name: target.name.clone(),
        path: names.join(" / "),
        url,
    }
}

/// `/browse/{slug}/{slug}/...`
pub fn browse_url(slugs: &[&str]) -> String {
    let mut url = String::from("/browse");
    for slug in slugs {
        url.push('/');
        url.push_str(slug);
    }
    url
}

/// Derive a URL-safe slug from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
