use crate::error::Result;
use crate::model::WeeklyTotals;
use std::path::{Path, PathBuf};

/// Files written by a run, all named `<input stem>-<weeks>-weeks.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub png: PathBuf,
    pub plot: PathBuf,
    pub json: PathBuf,
}

impl OutputPaths {
    /// Paths under `output_dir`, or next to `input` when no directory is given.
    pub fn new(input: &Path, weeks: u32, output_dir: Option<&Path>) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repo-stat".to_string());
        let base = format!("{stem}-{weeks}-weeks");

        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => match input.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        };

        Self {
            png: dir.join(format!("{base}.png")),
            plot: dir.join(format!("{base}.plot")),
            json: dir.join(format!("{base}.json")),
        }
    }
}

/// Write the chart script and the per-week totals, overwriting earlier runs.
pub fn persist(paths: &OutputPaths, script: &str, totals: &WeeklyTotals) -> Result<()> {
    if let Some(parent) = paths.plot.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&paths.plot, script)?;
    std::fs::write(&paths.json, serde_json::to_string_pretty(totals)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_derive_from_input_and_weeks() {
        let paths = OutputPaths::new(Path::new("conf/team.json"), 52, None);
        assert_eq!(paths.png, PathBuf::from("conf/team-52-weeks.png"));
        assert_eq!(paths.plot, PathBuf::from("conf/team-52-weeks.plot"));
        assert_eq!(paths.json, PathBuf::from("conf/team-52-weeks.json"));

        let paths = OutputPaths::new(Path::new("team.json"), 5, Some(Path::new("out")));
        assert_eq!(paths.png, PathBuf::from("out/team-5-weeks.png"));

        let paths = OutputPaths::new(Path::new("team.json"), 5, None);
        assert_eq!(paths.json, PathBuf::from("./team-5-weeks.json"));
    }

    #[test]
    fn persists_script_and_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let paths = OutputPaths::new(Path::new("team.json"), 5, Some(dir.path().join("nested").as_path()));
        let mut totals = WeeklyTotals::new();
        totals.add("2024 - 2".into(), 3, true);

        persist(&paths, "plot x\n", &totals).unwrap();

        assert_eq!(std::fs::read_to_string(&paths.plot).unwrap(), "plot x\n");
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json["2024 - 2"]["team"], 3);
        assert_eq!(json["2024 - 2"]["all"], 3);
    }
}
