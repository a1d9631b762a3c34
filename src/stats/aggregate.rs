use super::Measure;
use crate::error::Result;
use crate::model::{CommitRecord, LookbackWindow, WeeklyTotals};
use crate::util::week_key;
use std::collections::HashSet;
use tracing::trace;

const MERGE_PR_PREFIX: &str = "Merge pull request ";

pub fn is_merge_noise(message: &str) -> bool {
    message.starts_with(MERGE_PR_PREFIX)
}

/// Fold a newest-first commit sequence into weekly `{team, all}` totals.
///
/// The first commit older than `window.from` ends the fold; nothing after it is
/// pulled from `commits`. Pull-request merge commits are skipped for line based
/// measures.
pub fn aggregate<I>(
    commits: I,
    measure: &Measure,
    team: &HashSet<String>,
    window: &LookbackWindow,
) -> Result<WeeklyTotals>
where
    I: IntoIterator<Item = Result<CommitRecord>>,
{
    let mut totals = WeeklyTotals::new();
    let skip_merges = measure.strategy().skips_merge_noise();

    for commit in commits {
        let commit = commit?;
        if !window.contains(&commit.timestamp) {
            trace!(commit = %commit.id, "reached lookback boundary");
            break;
        }
        if skip_merges && is_merge_noise(&commit.message) {
            trace!(commit = %commit.id, "skipping merge commit");
            continue;
        }

        let value = measure.value(&commit);
        let is_team = team.contains(&commit.author_name);
        totals.add(week_key(&commit.timestamp), value, is_team);
    }

    Ok(totals)
}
