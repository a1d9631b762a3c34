pub mod deps;
pub mod repo;
pub mod sync;

pub use deps::{missing_dependencies, Dependency};
pub use repo::{GitRepo, HistoryWalk};
pub use sync::{sync_repo, RepoRef, SyncOutcome};
