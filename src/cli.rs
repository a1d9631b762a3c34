use crate::chart::{persist, run_gnuplot, OutputPaths, PlotScript};
use crate::config::{load_raw, Config, EXAMPLE_JSON};
use crate::git::{missing_dependencies, Dependency};
use crate::model::{LookbackWindow, MeasureStrategy};
use crate::stats::{collect_totals, Measure, RunOptions};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use console::style;
use std::path::PathBuf;
use tracing::{debug, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "repostat")]
#[command(about = "Generates weekly stats of git repositories based on json input")]
#[command(version)]
#[command(after_help = EXAMPLE_JSON)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[arg(short, long, help = "Debug mode")]
    pub debug: bool,

    #[arg(short, long = "input-json", value_name = "FILE", help = "File with repos and team members in json format")]
    pub input_json: PathBuf,

    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..), help = "Length of period in weeks")]
    pub weeks: u32,

    #[arg(short, long, help = "Show the graph of all contributions")]
    pub all: bool,

    #[arg(short, long, value_enum, default_value_t = MeasureStrategy::CommitCount, help = "What to count per commit")]
    pub measure: MeasureStrategy,

    #[arg(short, long, value_name = "DIR", help = "Directory for the chart, script and dataset [default: next to the input json]")]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, value_name = "DIR", default_value = ".", help = "Directory repositories are cloned into")]
    pub repos_dir: PathBuf,

    #[arg(long, help = "Do not clone or pull, scan existing checkouts only")]
    pub no_sync: bool,

    #[arg(long, help = "Chart title")]
    pub title: Option<String>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        init_tracing(self.debug);
        debug!(args = ?std::env::args().collect::<Vec<_>>(), "parsed arguments");

        // Missing programs end the run cleanly before anything else is looked at.
        let mut missing = missing_dependencies();
        if self.no_sync {
            missing.retain(|dep| *dep != Dependency::Git);
        }
        if let Some(dep) = missing.first() {
            println!("{}", dep.hint());
            return Ok(());
        }

        let raw = load_raw(&self.input_json)?;
        if self.debug {
            let pretty = serde_json::to_string_pretty(&raw)?;
            debug!("input json {}:\n{pretty}", self.input_json.display());
        }
        let config = Config::from_value(raw, self.measure, &self.input_json)?;

        let measure = Measure::from_config(self.measure, &config)?;
        let options = RunOptions {
            repos_dir: self.repos_dir.clone(),
            window: LookbackWindow::weeks_before(Utc::now(), self.weeks),
            sync: !self.no_sync,
            progress: !self.debug,
        };
        debug!(from = %options.window.from, measure = %self.measure, "collecting");

        let (totals, reports) = collect_totals(&config, &measure, &options);

        let paths = OutputPaths::new(&self.input_json, self.weeks, self.output_dir.as_deref());
        let script = PlotScript::new(
            &totals,
            &measure.unit_label(),
            self.title.as_deref(),
            &paths.png,
            self.all,
        )
        .to_string();

        let chart = run_gnuplot(&script);
        if let Err(e) = &chart {
            warn!("Chart was not rendered: {e}");
        }
        persist(&paths, &script, &totals).context("Failed to write chart script and dataset")?;

        let skipped = reports.iter().filter(|r| r.totals.is_none()).count();
        let sum = totals.sum();
        println!("{}", style("Summary").bold());
        println!("Repositories scanned: {}", style(reports.len() - skipped).cyan());
        if skipped > 0 {
            println!("Repositories skipped: {}", style(skipped).yellow());
        }
        println!("Weeks: {}", style(totals.len()).cyan());
        println!("Team {}: {}", measure.unit_label(), style(sum.team).green());
        println!("All {}: {}", measure.unit_label(), style(sum.all).green());
        if chart.is_ok() {
            println!("Chart: {}", style(paths.png.display()).dim());
        }
        println!("Script: {}", style(paths.plot.display()).dim());
        println!("Dataset: {}", style(paths.json.display()).dim());

        Ok(())
    }
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::INFO };
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
