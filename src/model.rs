use chrono::{DateTime, Duration, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

use crate::util::sorted_alphanumerically;

/// How a single commit's contribution is measured. Only one is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum MeasureStrategy {
    /// Every commit counts as 1.
    #[value(name = "commit_count")]
    CommitCount,
    /// Added plus deleted lines across all touched files.
    #[value(name = "size")]
    ChangeSize,
    /// Changed lines of pattern-matching files, for commits adding a new matching file.
    #[value(name = "kudos")]
    Kudos,
}

impl MeasureStrategy {
    pub fn needs_diff(self) -> bool {
        !matches!(self, MeasureStrategy::CommitCount)
    }

    pub fn skips_merge_noise(self) -> bool {
        self.needs_diff()
    }
}

impl fmt::Display for MeasureStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureStrategy::CommitCount => write!(f, "commit_count"),
            MeasureStrategy::ChangeSize => write!(f, "size"),
            MeasureStrategy::Kudos => write!(f, "kudos"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub path: String,
    pub added_lines: u32,
    pub deleted_lines: u32,
    pub is_binary: bool,
    /// The file has no blob in the first parent.
    pub is_new: bool,
}

impl FileStats {
    pub fn changed_lines(&self) -> u64 {
        self.added_lines as u64 + self.deleted_lines as u64
    }
}

/// One commit as seen by the aggregation. `files` is empty unless diffs were requested.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub files: Vec<FileStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTotals {
    pub team: u64,
    pub all: u64,
}

/// Per-week running totals keyed by `"<iso year> - <iso week>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyTotals {
    weeks: HashMap<String, WeekTotals>,
}

impl WeeklyTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, week: String, value: u64, is_team: bool) {
        let entry = self.weeks.entry(week).or_default();
        entry.all += value;
        if is_team {
            entry.team += value;
        }
    }

    pub fn get(&self, week: &str) -> Option<&WeekTotals> {
        self.weeks.get(week)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn merge(&mut self, other: WeeklyTotals) {
        for (week, totals) in other.weeks {
            let entry = self.weeks.entry(week).or_default();
            entry.team += totals.team;
            entry.all += totals.all;
        }
    }

    /// Weeks in natural chronological order.
    pub fn sorted(&self) -> Vec<(&str, WeekTotals)> {
        sorted_alphanumerically(self.weeks.keys().map(String::as_str))
            .into_iter()
            .map(|week| (week, self.weeks[week]))
            .collect()
    }

    pub fn sum(&self) -> WeekTotals {
        self.weeks.values().fold(WeekTotals::default(), |acc, t| WeekTotals {
            team: acc.team + t.team,
            all: acc.all + t.all,
        })
    }
}

impl Serialize for WeeklyTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sorted = self.sorted();
        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (week, totals) in sorted {
            map.serialize_entry(week, &totals)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklyTotals {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let weeks = HashMap::<String, WeekTotals>::deserialize(deserializer)?;
        Ok(Self { weeks })
    }
}

/// Commits at or after `from` are inside the window.
#[derive(Debug, Clone, Copy)]
pub struct LookbackWindow {
    pub from: DateTime<Utc>,
}

impl LookbackWindow {
    /// Windows reaching past chrono's date range start at the earliest representable instant.
    pub fn weeks_before(now: DateTime<Utc>, weeks: u32) -> Self {
        let from = Duration::try_days(7 * weeks as i64)
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self { from }
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        timestamp >= &self.from
    }
}
