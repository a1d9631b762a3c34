use crate::error::{Result, StatError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// A configured repository: `owner/name`, a full clone URL, or a bare local directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    raw: String,
}

impl RepoRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Directory name the repository is checked out under: the part after the last `/`.
    pub fn directory_name(&self) -> &str {
        let trimmed = self.raw.trim_end_matches('/');
        let name = trimmed.rsplit('/').next().unwrap_or(trimmed);
        name.strip_suffix(".git").unwrap_or(name)
    }

    /// Where to clone from, or `None` for a purely local directory.
    pub fn clone_url(&self) -> Option<String> {
        if self.raw.contains("://") || self.raw.starts_with("git@") {
            Some(self.raw.clone())
        } else if self.raw.contains('/') {
            Some(format!("https://github.com/{}", self.raw.trim_matches('/')))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Cloned,
    Updated,
    /// Pull failed; the existing history is scanned as is.
    Stale,
    Skipped,
}

/// Clone `repo` into `repos_dir` if absent, otherwise pull it. Returns the checkout path.
pub fn sync_repo(repo: &RepoRef, repos_dir: &Path) -> Result<(PathBuf, SyncOutcome)> {
    let target = repos_dir.join(repo.directory_name());

    if target.is_dir() {
        println!("Updating {}", repo.directory_name());
        let output = Command::new("git")
            .arg("pull")
            .current_dir(&target)
            .output()?;
        debug!(stdout = %String::from_utf8_lossy(&output.stdout), "git pull");
        if !output.status.success() {
            warn!(
                repo = repo.as_str(),
                "git pull failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok((target, SyncOutcome::Stale));
        }
        return Ok((target, SyncOutcome::Updated));
    }

    let url = repo.clone_url().ok_or_else(|| {
        StatError::GitRepo(format!(
            "{} does not exist and cannot be cloned",
            target.display()
        ))
    })?;

    println!("Cloning {}", repo.as_str());
    std::fs::create_dir_all(repos_dir)?;
    let output = Command::new("git")
        .arg("clone")
        .arg(&url)
        .arg(repo.directory_name())
        .current_dir(repos_dir)
        .output()?;
    if !output.status.success() {
        return Err(StatError::GitRepo(format!(
            "git clone {url} failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    Ok((target, SyncOutcome::Cloned))
}
