pub mod aggregate;
pub mod exec;
pub mod measure;

pub use aggregate::{aggregate, is_merge_noise};
pub use exec::{collect_totals, RepoReport, RunOptions};
pub use measure::Measure;
