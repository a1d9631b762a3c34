use super::{aggregate, Measure};
use crate::config::Config;
use crate::git::{sync_repo, GitRepo, RepoRef, SyncOutcome};
use crate::model::{LookbackWindow, WeekTotals, WeeklyTotals};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub repos_dir: PathBuf,
    pub window: LookbackWindow,
    pub sync: bool,
    pub progress: bool,
}

/// What happened to one configured repository.
#[derive(Debug, Clone)]
pub struct RepoReport {
    pub repo: String,
    pub sync: SyncOutcome,
    /// `None` when the repository could not be scanned.
    pub totals: Option<WeekTotals>,
}

/// Sync every configured repository in turn and fold their histories into one set of totals.
///
/// A repository that cannot be synced or opened is warned about and skipped.
pub fn collect_totals(
    config: &Config,
    measure: &Measure,
    options: &RunOptions,
) -> (WeeklyTotals, Vec<RepoReport>) {
    let mut totals = WeeklyTotals::new();
    let mut reports = Vec::with_capacity(config.repos.len());

    for raw in &config.repos {
        let repo_ref = RepoRef::new(raw.as_str());
        let (path, sync) = if options.sync {
            match sync_repo(&repo_ref, &options.repos_dir) {
                Ok(synced) => synced,
                Err(e) => {
                    warn!(repo = raw.as_str(), "Could not sync repository: {e}");
                    reports.push(RepoReport { repo: raw.clone(), sync: SyncOutcome::Skipped, totals: None });
                    continue;
                }
            }
        } else {
            (options.repos_dir.join(repo_ref.directory_name()), SyncOutcome::Skipped)
        };

        let repo = match GitRepo::open(&path) {
            Ok(repo) => repo,
            Err(e) => {
                warn!("Could not load repository at {}: {e}", path.display());
                reports.push(RepoReport { repo: raw.clone(), sync, totals: None });
                continue;
            }
        };

        let repo_totals = match scan_repo(&repo, config, measure, options) {
            Ok(repo_totals) => repo_totals,
            Err(e) => {
                warn!("Could not read history of {}: {e:#}", path.display());
                reports.push(RepoReport { repo: raw.clone(), sync, totals: None });
                continue;
            }
        };
        debug!(repo = raw.as_str(), weeks = repo_totals.len(), "scanned repository");
        reports.push(RepoReport {
            repo: raw.clone(),
            sync,
            totals: Some(repo_totals.sum()),
        });
        totals.merge(repo_totals);
    }

    (totals, reports)
}

fn scan_repo(
    repo: &GitRepo,
    config: &Config,
    measure: &Measure,
    options: &RunOptions,
) -> anyhow::Result<WeeklyTotals> {
    let pb = if options.progress {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} ({pos} commits)")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Scanning {}", repo.path().display()));

    let walk = repo
        .history(measure.strategy().needs_diff())?
        .inspect(|_| pb.inc(1));
    let totals = aggregate(walk, measure, &config.team, &options.window)?;

    pb.finish_and_clear();
    Ok(totals)
}
