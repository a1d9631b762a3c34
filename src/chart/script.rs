use crate::model::WeeklyTotals;
use std::fmt;
use std::path::Path;

pub const Y_TICK_CANDIDATES: [u64; 6] = [10, 50, 100, 500, 1000, 5000];

/// Aim for roughly this many grid lines on the y axis.
const Y_TICK_DIVISOR: f64 = 20.0;

/// Candidate interval closest to `max_value / 20`. Ties go to the smaller interval.
pub fn y_tick_interval(max_value: u64) -> u64 {
    let target = max_value as f64 / Y_TICK_DIVISOR;
    let mut best = Y_TICK_CANDIDATES[0];
    for &candidate in &Y_TICK_CANDIDATES[1..] {
        if (candidate as f64 - target).abs() < (best as f64 - target).abs() {
            best = candidate;
        }
    }
    best
}

/// One x position of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    pub index: usize,
    pub week: String,
    pub team: u64,
    pub all: u64,
}

/// Everything a gnuplot script needs, rendered in a single pass by `Display`.
#[derive(Debug, Clone)]
pub struct PlotScript {
    pub title: String,
    pub unit: String,
    pub output_png: String,
    pub rows: Vec<DataRow>,
    pub show_all: bool,
    pub y_tics: u64,
}

impl PlotScript {
    pub fn new(
        totals: &WeeklyTotals,
        unit: &str,
        title: Option<&str>,
        output_png: &Path,
        show_all: bool,
    ) -> Self {
        let rows: Vec<DataRow> = totals
            .sorted()
            .into_iter()
            .enumerate()
            .map(|(index, (week, t))| DataRow {
                index,
                week: week.to_string(),
                team: t.team,
                all: t.all,
            })
            .collect();

        let max_value = rows
            .iter()
            .map(|r| if show_all { r.team.max(r.all) } else { r.team })
            .max()
            .unwrap_or(0);

        Self {
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| format!("Number of {unit} from the team to the repositories")),
            unit: unit.to_string(),
            output_png: output_png.display().to_string(),
            rows,
            show_all,
            y_tics: y_tick_interval(max_value),
        }
    }

    /// Tab separated `index team[ all]` lines.
    pub fn dataset(&self) -> String {
        self.rows
            .iter()
            .map(|r| {
                if self.show_all {
                    format!("{}\t{}\t{}", r.index, r.team, r.all)
                } else {
                    format!("{}\t{}", r.index, r.team)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `"<week>" <index>` pairs for `set xtics (...)`.
    pub fn tick_labels(&self) -> String {
        self.rows
            .iter()
            .map(|r| format!("{} {}", quote(&r.week), r.index))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn x_max(&self) -> usize {
        self.rows.len()
    }
}

impl fmt::Display for PlotScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "set title {}", quote(&self.title))?;
        writeln!(f, "set terminal png size 1800,900")?;
        writeln!(f, "set output {}", quote(&self.output_png))?;
        writeln!(f, "set xtics nomirror rotate by -45")?;
        writeln!(f, "set rmargin 5")?;
        writeln!(f, "set linetype 1 lc rgb '#183693'")?;
        writeln!(f, "set yrange [0:*]")?;
        writeln!(f, "set ytics {}", self.y_tics)?;
        writeln!(f, "set grid")?;
        writeln!(f, "set xtics ({})", self.tick_labels())?;
        writeln!(f, "$dataset << EOD")?;
        if !self.rows.is_empty() {
            writeln!(f, "{}", self.dataset())?;
        }
        writeln!(f, "EOD")?;

        // A line fit needs at least two points.
        let fit = self.rows.len() >= 2;
        if fit {
            writeln!(f, "f(x) = a + b*x")?;
            writeln!(f, "set fit quiet")?;
            writeln!(f, "set fit logfile '/dev/null'")?;
            writeln!(f, "fit f(x) $dataset using 1:2 via a, b")?;
        }

        write!(
            f,
            "plot [0:{}] $dataset using 1:2 title {} with lines lw 5",
            self.x_max(),
            quote(&format!("Number of {} by the team", self.unit))
        )?;
        if fit {
            write!(f, ", f(x) with lines lw 5")?;
        }
        if self.show_all {
            write!(
                f,
                ",\\\n     $dataset using 1:3 title {} with lines lw 5",
                quote(&format!("Number of {} by all contributors", self.unit))
            )?;
        }
        writeln!(f)
    }
}

/// Double-quoted gnuplot string literal.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
