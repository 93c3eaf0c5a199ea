//! Hierarchical cache keys.
//!
//! A key is a list of segments; the first segment names the resource family.
//! Invalidating a prefix drops every key that starts with it.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Extend the key with one more segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Whether `prefix` matches this key segment by segment.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Keys of the projects resource family.
pub mod project_keys {
    use super::QueryKey;
    use crate::api::ProjectId;

    pub const ROOT: &str = "projects";

    /// Root key; invalidating it drops every cached projects entry.
    pub fn all() -> QueryKey {
        QueryKey::new([ROOT])
    }

    pub fn public_list() -> QueryKey {
        all().join("public")
    }

    pub fn admin_list() -> QueryKey {
        all().join("admin")
    }

    pub fn detail(id: ProjectId) -> QueryKey {
        all().join("detail").join(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::project_keys;
    use super::*;

    #[test]
    fn test_project_keys_share_root() {
        let root = project_keys::all();
        for key in [
            project_keys::public_list(),
            project_keys::admin_list(),
            project_keys::detail(7),
        ] {
            assert!(key.starts_with(&root), "{} should start with {}", key, root);
        }
    }

    #[test]
    fn test_starts_with_compares_whole_segments() {
        let key = QueryKey::new(["projects", "detail", "12"]);
        assert!(key.starts_with(&QueryKey::new(["projects", "detail"])));
        assert!(!key.starts_with(&QueryKey::new(["projects", "detail", "1"])));
        assert!(!QueryKey::new(["projects-archive"]).starts_with(&project_keys::all()));
    }

    #[test]
    fn test_detail_keys_are_distinct_per_id() {
        assert_ne!(project_keys::detail(1), project_keys::detail(2));
        assert_eq!(project_keys::detail(3).segments(), ["projects", "detail", "3"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(project_keys::admin_list().to_string(), "[projects, admin]");
    }
}
