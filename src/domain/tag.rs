use crate::error::{GitverError, Result};
use crate::git::{TagKind, TagRef};
use git2::Oid;
use semver::Version;
use std::collections::HashMap;

/// Parse a version from a tag name (e.g., "v1.2.3" -> 1.2.3)
///
/// Exactly one leading lowercase `v` is stripped; the rest must be a full
/// `major.minor.patch[-prerelease][+build]` version.
pub fn parse_tag(name: &str) -> Result<Version> {
    let trimmed = name.strip_prefix('v').unwrap_or(name);
    Version::parse(trimmed).map_err(|source| GitverError::UnparseableTag {
        tag: name.to_string(),
        source,
    })
}

/// Mapping from tagged commit to tag name
///
/// Annotated tags win over lightweight tags on the same commit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagIndex {
    names: HashMap<Oid, String>,
}

impl TagIndex {
    /// Build the index from every tag in the repository
    pub fn from_tags(tags: &[TagRef]) -> Self {
        let mut names = HashMap::new();
        for kind in [TagKind::Lightweight, TagKind::Annotated] {
            for tag in tags.iter().filter(|t| t.kind == kind) {
                names.insert(tag.target, tag.name.clone());
            }
        }
        TagIndex { names }
    }

    /// Tag name on a commit, if any
    pub fn get(&self, commit: &Oid) -> Option<&str> {
        self.names.get(commit).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    #[test]
    fn test_parse_tag_with_v() {
        assert_eq!(parse_tag("v1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_tag_without_v() {
        assert_eq!(parse_tag("1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_tag_keeps_prerelease() {
        assert_eq!(parse_tag("v2.0.0-rc.1").unwrap().to_string(), "2.0.0-rc.1");
    }

    #[test]
    fn test_parse_tag_strips_only_one_v() {
        assert!(parse_tag("vv1.2.3").is_err());
    }

    #[test]
    fn test_parse_tag_uppercase_v_is_rejected() {
        assert!(parse_tag("V1.2.3").is_err());
    }

    #[test]
    fn test_parse_tag_invalid() {
        let err = parse_tag("an-arbitrary-tag-name").unwrap_err();
        assert!(matches!(err, GitverError::UnparseableTag { ref tag, .. } if tag == "an-arbitrary-tag-name"));
        assert!(parse_tag("1.2").is_err());
        assert!(parse_tag("v1.2.3.4").is_err());
    }

    #[test]
    fn test_annotated_overrides_lightweight() {
        let tags = vec![
            TagRef {
                target: oid(1),
                name: "2.0.0".to_string(),
                kind: TagKind::Annotated,
            },
            TagRef {
                target: oid(1),
                name: "v1.0.0".to_string(),
                kind: TagKind::Lightweight,
            },
            TagRef {
                target: oid(2),
                name: "v0.1.0".to_string(),
                kind: TagKind::Lightweight,
            },
        ];

        let index = TagIndex::from_tags(&tags);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&oid(1)), Some("2.0.0"));
        assert_eq!(index.get(&oid(2)), Some("v0.1.0"));
        assert_eq!(index.get(&oid(3)), None);
    }

    #[test]
    fn test_lightweight_and_annotated_parse_identically() {
        let lightweight = parse_tag("v1.2.3").unwrap();
        let annotated = parse_tag("1.2.3").unwrap();
        assert_eq!(lightweight, annotated);
    }
}
