use crate::config::Config;
use crate::error::ConfigError;
use crate::model::{CommitRecord, MeasureStrategy};
use regex::Regex;

/// A measure strategy with everything it needs to score a commit.
#[derive(Debug, Clone)]
pub enum Measure {
    CommitCount,
    ChangeSize,
    Kudos(Regex),
}

impl Measure {
    pub fn from_config(strategy: MeasureStrategy, config: &Config) -> Result<Self, ConfigError> {
        Ok(match strategy {
            MeasureStrategy::CommitCount => Measure::CommitCount,
            MeasureStrategy::ChangeSize => Measure::ChangeSize,
            MeasureStrategy::Kudos => Measure::Kudos(
                config
                    .kudos
                    .clone()
                    .ok_or(ConfigError::MissingKey { key: "kudos" })?,
            ),
        })
    }

    pub fn strategy(&self) -> MeasureStrategy {
        match self {
            Measure::CommitCount => MeasureStrategy::CommitCount,
            Measure::ChangeSize => MeasureStrategy::ChangeSize,
            Measure::Kudos(_) => MeasureStrategy::Kudos,
        }
    }

    /// What the chart's y axis counts.
    pub fn unit_label(&self) -> String {
        match self {
            Measure::CommitCount => "commits".to_string(),
            Measure::ChangeSize => "lines in commits".to_string(),
            Measure::Kudos(pattern) => format!("lines in commits for \"{}\" files", pattern.as_str()),
        }
    }

    pub fn value(&self, commit: &CommitRecord) -> u64 {
        match self {
            Measure::CommitCount => 1,
            Measure::ChangeSize => commit.files.iter().map(|f| f.changed_lines()).sum(),
            Measure::Kudos(pattern) => kudos_value(commit, pattern),
        }
    }
}

/// Changed lines of every matching file, but only when the commit adds at least
/// one new matching file. Further new files do not count twice.
fn kudos_value(commit: &CommitRecord, pattern: &Regex) -> u64 {
    let adds_matching_file = commit
        .files
        .iter()
        .any(|f| f.is_new && pattern.is_match(&f.path));
    if !adds_matching_file {
        return 0;
    }
    commit
        .files
        .iter()
        .filter(|f| pattern.is_match(&f.path))
        .map(|f| f.changed_lines())
        .sum()
}
