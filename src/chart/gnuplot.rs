use crate::error::ChartError;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Feed `script` to `program` on stdin and wait for it to exit.
///
/// Anything written to stderr counts as a failure; the caller decides whether it matters.
pub fn run_plotter(program: &str, script: &str) -> Result<(), ChartError> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ChartError::Spawn)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(script.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    debug!(status = %output.status, stdout = %String::from_utf8_lossy(&output.stdout), "{program} finished");

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(ChartError::Stderr(stderr.trim().to_string()));
    }
    Ok(())
}

pub fn run_gnuplot(script: &str) -> Result<(), ChartError> {
    run_plotter("gnuplot", script)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn clean_exit_is_success() {
        assert!(run_plotter("cat", "plot sin(x)\n").is_ok());
    }

    #[test]
    fn stderr_output_is_a_failure() {
        let err = run_plotter("sh", "echo 'line 1: undefined variable' >&2\n").unwrap_err();
        assert!(matches!(err, ChartError::Stderr(ref msg) if msg == "line 1: undefined variable"));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run_plotter("definitely-not-a-plotter-binary", "").unwrap_err();
        assert!(matches!(err, ChartError::Spawn(_)));
    }
}
