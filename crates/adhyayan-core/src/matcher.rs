//! Reconciles free-text classification with the catalog
//!
//! Uploads store department/branch/year/subject/topic exactly as typed. This
//! module finds the catalog node each string refers to and builds the
//! canonical browse URL for the item.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{browse_url, Catalog, CatalogNode};

/// Minimum length for a string to take part in substring matching.
const MIN_CONTAINMENT_LEN: usize = 3;

/// Free-text classification of a content item
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFields<'a> {
    pub department: &'a str,
    pub branch: &'a str,
    pub year: &'a str,
    pub subject: &'a str,
    pub topic: Option<&'a str>,
}

/// Match quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Exact,
    Contains,
    Normalized,
}

/// Pick the candidate that best matches `query`.
///
/// Exact (trimmed, case-insensitive) equality with a name, slug or alias wins
/// over substring containment, which wins over equality of the alphanumeric
/// residue. Within a tier the earliest candidate wins.
pub fn best_match<'a>(candidates: &'a [CatalogNode], query: &str) -> Option<&'a CatalogNode> {
    ranked_match(candidates, query).map(|(_, node)| node)
}

fn ranked_match<'a>(candidates: &'a [CatalogNode], query: &str) -> Option<(Tier, &'a CatalogNode)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    let normalized_query = normalize(&query);

    let mut best: Option<(Tier, &CatalogNode)> = None;
    for node in candidates {
        let Some(tier) = match_tier(node, &query, &normalized_query) else {
            continue;
        };
        if tier == Tier::Exact {
            return Some((tier, node));
        }
        if best.map_or(true, |(current, _)| tier < current) {
            best = Some((tier, node));
        }
    }
    best
}

fn match_tier(node: &CatalogNode, query: &str, normalized_query: &str) -> Option<Tier> {
    let labels: Vec<String> = node.labels().map(|l| l.trim().to_lowercase()).collect();

    if labels.iter().any(|l| l == query) {
        return Some(Tier::Exact);
    }

    let name = node.name.trim().to_lowercase();
    let contains = query.contains(&name)
        || (query.len() >= MIN_CONTAINMENT_LEN && name.contains(query))
        || node.aliases.iter().any(|alias| {
            let alias = alias.trim().to_lowercase();
            alias.len() >= MIN_CONTAINMENT_LEN && query.contains(&alias)
        });
    if contains {
        return Some(Tier::Contains);
    }

    if !normalized_query.is_empty() && labels.iter().any(|l| normalize(l) == normalized_query) {
        return Some(Tier::Normalized);
    }

    None
}

/// Lowercase ASCII alphanumerics only.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Catalog nodes a content item resolved to. Levels below the first miss are
/// always `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolvedPath<'a> {
    pub department: Option<&'a CatalogNode>,
    pub branch: Option<&'a CatalogNode>,
    pub year: Option<&'a CatalogNode>,
    pub subject: Option<&'a CatalogNode>,
    pub topic: Option<&'a CatalogNode>,
}

/// Resolve free-text fields level by level.
///
/// When the department text matches nothing, the branch text is tried against
/// every department's branches and the department is taken from the first hit.
/// The same happens when the department matched only loosely ("Computer
/// Science" contains "Science") and the branch is not one of its children.
pub fn resolve<'a>(catalog: &'a Catalog, fields: &ContentFields<'_>) -> ResolvedPath<'a> {
    let mut path = ResolvedPath::default();

    let (department, branch) = match ranked_match(catalog.departments(), fields.department) {
        Some((Tier::Exact, dept)) => (dept, best_match(&dept.children, fields.branch)),
        Some((_, dept)) => match best_match(&dept.children, fields.branch) {
            Some(branch) => (dept, Some(branch)),
            None => match infer_department(catalog, fields.branch) {
                Some((inferred, branch)) => (inferred, Some(branch)),
                None => (dept, None),
            },
        },
        None => match infer_department(catalog, fields.branch) {
            Some((dept, branch)) => (dept, Some(branch)),
            None => return path,
        },
    };
    path.department = Some(department);

    let Some(branch) = branch else {
        return path;
    };
    path.branch = Some(branch);

    let Some(year) = best_match(&branch.children, fields.year) else {
        return path;
    };
    path.year = Some(year);

    let Some(subject) = best_match(&year.children, fields.subject) else {
        return path;
    };
    path.subject = Some(subject);

    path.topic = fields.topic.and_then(|t| best_match(&subject.children, t));
    path
}

fn infer_department<'a>(
    catalog: &'a Catalog,
    branch: &str,
) -> Option<(&'a CatalogNode, &'a CatalogNode)> {
    catalog
        .departments()
        .iter()
        .find_map(|dept| best_match(&dept.children, branch).map(|b| (dept, b)))
}

impl<'a> ResolvedPath<'a> {
    /// Resolved nodes from the department down, stopping at the first gap.
    pub fn nodes(&self) -> Vec<&'a CatalogNode> {
        [self.department, self.branch, self.year, self.subject]
            .into_iter()
            .map_while(|n| n)
            .collect()
    }

    /// `/browse/{dept}/{branch}/{year}/{subject}` cut at the deepest resolved
    /// level, plus `?topic=` when a topic resolved.
    pub fn canonical_url(&self) -> Option<String> {
        self.department?;
        let slugs: Vec<&str> = self.nodes().iter().map(|n| n.slug.as_str()).collect();
        let mut url = browse_url(&slugs);
        if let (Some(_), Some(topic)) = (self.subject, self.topic) {
            url.push_str("?topic=");
            url.push_str(&topic.slug);
        }
        Some(url)
    }

    /// Whether the item sits at or below `path`. Every level named in `path`
    /// must have resolved to the same slug.
    pub fn is_under(&self, path: &BrowsePath) -> bool {
        let wanted = path.segments();
        let resolved = self.nodes();
        wanted.len() <= resolved.len()
            && wanted
                .iter()
                .zip(resolved.iter())
                .all(|(slug, node)| node.slug == *slug)
    }

    pub fn to_location(&self) -> ResolvedLocation {
        let named = |n: Option<&CatalogNode>| {
            n.map(|n| NamedSlug {
                slug: n.slug.clone(),
                name: n.name.clone(),
            })
        };
        ResolvedLocation {
            department: named(self.department),
            branch: named(self.branch),
            year: named(self.year),
            subject: named(self.subject),
            topic: named(self.topic),
            canonical_url: self.canonical_url(),
        }
    }
}

/// A browse location expressed as slugs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowsePath {
    pub department: String,
    pub branch: Option<String>,
    pub year: Option<String>,
    pub subject: Option<String>,
}

impl BrowsePath {
    pub fn segments(&self) -> Vec<&str> {
        std::iter::once(Some(self.department.as_str()))
            .chain([
                self.branch.as_deref(),
                self.year.as_deref(),
                self.subject.as_deref(),
            ])
            .map_while(|s| s)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NamedSlug {
    pub slug: String,
    pub name: String,
}

/// Owned, serializable form of [`ResolvedPath`]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResolvedLocation {
    pub department: Option<NamedSlug>,
    pub branch: Option<NamedSlug>,
    pub year: Option<NamedSlug>,
    pub subject: Option<NamedSlug>,
    pub topic: Option<NamedSlug>,
    pub canonical_url: Option<String>,
}

/// Query parameters for ad-hoc resolution
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub subject: String,
    pub topic: Option<String>,
}

impl ResolveQuery {
    pub fn fields(&self) -> ContentFields<'_> {
        ContentFields {
            department: &self.department,
            branch: &self.branch,
            year: &self.year,
            subject: &self.subject,
            topic: self.topic.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeKind;

    fn fields<'a>(
        department: &'a str,
        branch: &'a str,
        year: &'a str,
        subject: &'a str,
        topic: Option<&'a str>,
    ) -> ContentFields<'a> {
        ContentFields {
            department,
            branch,
            year,
            subject,
            topic,
        }
    }

    fn nodes(names: &[(&str, &str, &[&str])]) -> Vec<CatalogNode> {
        names
            .iter()
            .map(|(slug, name, aliases)| {
                CatalogNode::new(NodeKind::Branch, *slug, *name).with_aliases(aliases)
            })
            .collect()
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let candidates = nodes(&[("cse", "Computer Science", &["CSE"])]);
        assert!(best_match(&candidates, "").is_none());
        assert!(best_match(&candidates, "   ").is_none());
    }

    #[test]
    fn test_exact_match_is_case_insensitive_and_trimmed() {
        let candidates = nodes(&[
            ("cse", "Computer Science", &["CSE"]),
            ("it", "Information Technology", &["IT"]),
        ]);
        assert_eq!(best_match(&candidates, "  it ").unwrap().slug, "it");
        assert_eq!(best_match(&candidates, "computer science").unwrap().slug, "cse");
        assert_eq!(best_match(&candidates, "CSE").unwrap().slug, "cse");
    }

    #[test]
    fn test_exact_beats_earlier_substring() {
        // "Data Structures Lab" contains the first candidate's name but equals the second's.
        let candidates = nodes(&[
            ("data-structures", "Data Structures", &[]),
            ("data-structures-lab", "Data Structures Lab", &[]),
        ]);
        assert_eq!(
            best_match(&candidates, "data structures lab").unwrap().slug,
            "data-structures-lab"
        );
    }

    #[test]
    fn test_substring_beats_normalized() {
        let candidates = nodes(&[
            ("os", "O.S.", &[]),
            ("operating-systems", "Operating Systems", &[]),
        ]);
        // "OS" normalizes to the first, but is too short for containment, and is
        // an exact slug match for it anyway. "operating" is contained in the second.
        assert_eq!(best_match(&candidates, "operating").unwrap().slug, "operating-systems");
        assert_eq!(best_match(&candidates, "os").unwrap().slug, "os");
    }

    #[test]
    fn test_containment_both_directions() {
        let candidates = nodes(&[("dbms", "Database Management Systems", &["DBMS"])]);
        assert!(best_match(&candidates, "database").is_some());
        assert!(best_match(&candidates, "DBMS notes unit 3").is_some());
        // Too short to match by containment.
        assert!(best_match(&candidates, "da").is_none());
    }

    #[test]
    fn test_short_alias_is_not_used_for_containment() {
        let candidates = nodes(&[("it", "Information Technology", &["IT"])]);
        assert!(best_match(&candidates, "digital").is_none());
    }

    #[test]
    fn test_first_candidate_wins_within_tier() {
        let candidates = nodes(&[
            ("a", "Signals", &[]),
            ("b", "Signals and Systems", &[]),
        ]);
        assert_eq!(best_match(&candidates, "sig").unwrap().slug, "a");
    }

    #[test]
    fn test_normalized_equality() {
        let candidates = nodes(&[("cse", "Computer Science", &[])]);
        assert_eq!(best_match(&candidates, "Computer-Science").unwrap().slug, "cse");
        assert!(best_match(&candidates, "---").is_none());
    }

    #[test]
    fn test_resolve_full_path() {
        let catalog = Catalog::builtin();
        let path = resolve(
            &catalog,
            &fields("B.Tech", "CSE", "2nd year", "DSA", Some("linked lists")),
        );
        assert_eq!(path.department.unwrap().slug, "engineering");
        assert_eq!(path.branch.unwrap().slug, "cse");
        assert_eq!(path.year.unwrap().slug, "2nd-year");
        assert_eq!(path.subject.unwrap().slug, "data-structures");
        assert_eq!(path.topic.unwrap().slug, "linked-lists");
        assert_eq!(
            path.canonical_url().unwrap(),
            "/browse/engineering/cse/2nd-year/data-structures?topic=linked-lists"
        );
    }

    #[test]
    fn test_resolve_infers_department_from_branch() {
        let catalog = Catalog::builtin();
        let path = resolve(&catalog, &fields("", "Information Technology", "3", "DBMS", None));
        assert_eq!(path.department.unwrap().slug, "engineering");
        assert_eq!(path.branch.unwrap().slug, "it");
        assert_eq!(path.year.unwrap().slug, "3rd-year");
        assert_eq!(
            path.canonical_url().unwrap(),
            "/browse/engineering/it/3rd-year/database-management-systems"
        );
    }

    #[test]
    fn test_loose_department_defers_to_branch() {
        let catalog = Catalog::builtin();
        let path = resolve(
            &catalog,
            &fields("Computer Science", "CSE", "2nd Year", "Data Structures", None),
        );
        assert_eq!(path.department.unwrap().slug, "engineering");
        assert_eq!(path.branch.unwrap().slug, "cse");
        assert_eq!(
            path.canonical_url().unwrap(),
            "/browse/engineering/cse/2nd-year/data-structures"
        );
    }

    #[test]
    fn test_exact_department_keeps_its_own_branches() {
        let catalog = Catalog::builtin();
        let path = resolve(&catalog, &fields("Science", "CSE", "1", "Physics", None));
        assert_eq!(path.department.unwrap().slug, "science");
        assert!(path.branch.is_none());
        assert_eq!(path.canonical_url().unwrap(), "/browse/science");
    }

    #[test]
    fn test_resolve_stops_at_first_miss() {
        let catalog = Catalog::builtin();
        let path = resolve(
            &catalog,
            &fields("Engineering", "CSE", "eleventh", "Data Structures", Some("Trees")),
        );
        assert!(path.branch.is_some());
        assert!(path.year.is_none());
        assert!(path.subject.is_none());
        assert!(path.topic.is_none());
        assert_eq!(path.canonical_url().unwrap(), "/browse/engineering/cse");
    }

    #[test]
    fn test_resolve_nothing() {
        let catalog = Catalog::builtin();
        let path = resolve(&catalog, &fields("Law", "Corporate", "1", "Contracts", None));
        assert!(path.department.is_none());
        assert!(path.canonical_url().is_none());
        assert!(path.to_location().canonical_url.is_none());
    }

    #[test]
    fn test_unknown_topic_keeps_subject_url() {
        let catalog = Catalog::builtin();
        let path = resolve(
            &catalog,
            &fields("Engineering", "CSE", "3rd Year", "Operating Systems", Some("zzz")),
        );
        assert_eq!(
            path.canonical_url().unwrap(),
            "/browse/engineering/cse/3rd-year/operating-systems"
        );
    }

    #[test]
    fn test_is_under() {
        let catalog = Catalog::builtin();
        let path = resolve(&catalog, &fields("Engineering", "ECE", "2", "Signals and Systems", None));

        let mut browse = BrowsePath {
            department: "engineering".to_string(),
            ..Default::default()
        };
        assert!(path.is_under(&browse));
        browse.branch = Some("ece".to_string());
        browse.year = Some("2nd-year".to_string());
        assert!(path.is_under(&browse));
        browse.subject = Some("signals-and-systems".to_string());
        assert!(path.is_under(&browse));
        browse.subject = Some("network-analysis".to_string());
        assert!(!path.is_under(&browse));

        let shallow = resolve(&catalog, &fields("Engineering", "ECE", "??", "", None));
        let deep = BrowsePath {
            department: "engineering".to_string(),
            branch: Some("ece".to_string()),
            year: Some("2nd-year".to_string()),
            subject: None,
        };
        assert!(!shallow.is_under(&deep));
    }
}
