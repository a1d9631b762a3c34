use crate::error::ConfigError;
use crate::model::MeasureStrategy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

pub const EXAMPLE_JSON: &str = r#"example input json:
    {
        "repos": [ "user/repo",
                   "user_2/repo_2" ],
        "team": [ "username_1",
                  "username_2",
                  "username_3" ],
        "kudos": "^docs/.*\\.md$"
    }"#;

#[derive(Debug, Deserialize)]
struct RawConfig {
    repos: Option<Vec<String>>,
    team: Option<Vec<String>>,
    kudos: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub repos: Vec<String>,
    /// Author names, matched exactly.
    pub team: HashSet<String>,
    pub kudos: Option<Regex>,
}

impl Config {
    pub fn load(path: &Path, measure: MeasureStrategy) -> Result<Self, ConfigError> {
        let raw = load_raw(path)?;
        Self::from_value(raw, measure, path)
    }

    pub fn from_json(json: &str, measure: MeasureStrategy) -> Result<Self, ConfigError> {
        let inline = Path::new("<inline>");
        let raw = serde_json::from_str(json).map_err(|source| ConfigError::InvalidJson {
            path: inline.to_path_buf(),
            source,
        })?;
        Self::from_value(raw, measure, inline)
    }

    /// Validate JSON already read from `path`.
    pub fn from_value(
        value: serde_json::Value,
        measure: MeasureStrategy,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        // Absent keys are reported by name below; wrongly-typed values fail here.
        let raw: RawConfig =
            serde_json::from_value(value).map_err(|source| ConfigError::InvalidJson {
                path: path.to_path_buf(),
                source,
            })?;

        let repos = raw.repos.ok_or(ConfigError::MissingKey { key: "repos" })?;
        let team = raw.team.ok_or(ConfigError::MissingKey { key: "team" })?;

        let kudos = match (measure, raw.kudos) {
            (MeasureStrategy::Kudos, None) => {
                return Err(ConfigError::MissingKey { key: "kudos" });
            }
            (MeasureStrategy::Kudos, Some(pattern)) => Some(
                Regex::new(&pattern)
                    .map_err(|source| ConfigError::InvalidPattern { pattern, source })?,
            ),
            (_, _) => None,
        };

        Ok(Self {
            repos,
            team: team.into_iter().collect(),
            kudos,
        })
    }

    pub fn is_team_member(&self, author: &str) -> bool {
        self.team.contains(author)
    }
}

/// Read `path` and check it parses as JSON, without interpreting any keys.
pub fn load_raw(path: &Path) -> Result<serde_json::Value, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound { path: path.to_path_buf() });
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}
