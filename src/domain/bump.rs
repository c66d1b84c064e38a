use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Effect of a commit on the version number
///
/// Variants are ordered by strength, so `max` picks the most significant bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BumpKind {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    /// Bump a version according to this kind.
    ///
    /// Increments the matching component and resets lower components to 0;
    /// any bump clears pre-release and build metadata. `None` leaves the
    /// version untouched.
    pub fn apply(self, version: &mut Version) {
        match self {
            BumpKind::Major => {
                version.major += 1;
                version.minor = 0;
                version.patch = 0;
            }
            BumpKind::Minor => {
                version.minor += 1;
                version.patch = 0;
            }
            BumpKind::Patch => {
                version.patch += 1;
            }
            BumpKind::None => return,
        }
        version.pre = Prerelease::EMPTY;
        version.build = BuildMetadata::EMPTY;
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::None => "none",
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_major() {
        let mut v = Version::new(1, 2, 3);
        BumpKind::Major.apply(&mut v);
        assert_eq!(v, Version::new(2, 0, 0));
    }

    #[test]
    fn test_bump_minor() {
        let mut v = Version::new(1, 2, 3);
        BumpKind::Minor.apply(&mut v);
        assert_eq!(v, Version::new(1, 3, 0));
    }

    #[test]
    fn test_bump_patch() {
        let mut v = Version::new(1, 2, 3);
        BumpKind::Patch.apply(&mut v);
        assert_eq!(v, Version::new(1, 2, 4));
    }

    #[test]
    fn test_bump_none_keeps_prerelease() {
        let mut v = Version::parse("1.2.3-rc.1").unwrap();
        BumpKind::None.apply(&mut v);
        assert_eq!(v.to_string(), "1.2.3-rc.1");
    }

    #[test]
    fn test_bump_clears_prerelease_and_build() {
        let mut v = Version::parse("1.2.3-rc.1+build.5").unwrap();
        BumpKind::Patch.apply(&mut v);
        assert_eq!(v.to_string(), "1.2.4");
    }

    #[test]
    fn test_strength_ordering() {
        assert!(BumpKind::Major > BumpKind::Minor);
        assert!(BumpKind::Minor > BumpKind::Patch);
        assert!(BumpKind::Patch > BumpKind::None);
        let strongest = [BumpKind::Patch, BumpKind::Major, BumpKind::Minor]
            .into_iter()
            .max();
        assert_eq!(strongest, Some(BumpKind::Major));
    }
}
