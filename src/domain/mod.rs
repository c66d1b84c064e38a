//! Domain logic - pure versioning rules independent of repository access

pub mod branch;
pub mod bump;
pub mod classifier;
pub mod prerelease;
pub mod tag;
pub mod trail;

pub use branch::{cleanse_branch_name, BranchContext, MASTER_BRANCH};
pub use bump::BumpKind;
pub use classifier::MessageClassifier;
pub use prerelease::PreReleaseLabel;
pub use tag::{parse_tag, TagIndex};
pub use trail::{EntryKind, TrailEntry, VersionTrail};
