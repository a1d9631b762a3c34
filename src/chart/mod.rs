pub mod gnuplot;
pub mod output;
pub mod script;

pub use gnuplot::run_gnuplot;
pub use output::{persist, OutputPaths};
pub use script::{y_tick_interval, DataRow, PlotScript, Y_TICK_CANDIDATES};
