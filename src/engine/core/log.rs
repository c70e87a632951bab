use anyhow::Result;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use super::types::TranscodePlan;

/// Append a plan's trace to `log_path`, one timestamped line per entry,
/// tagged with the file it was planned for. Creates the file if needed.
pub fn append_trace_log(log_path: &Path, source: &str, plan: &TranscodePlan) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let verdict = if plan.should_process { "process" } else { "skip" };
    writeln!(file, "[{}] {} => {}", timestamp, source, verdict)?;
    for line in &plan.trace_log {
        writeln!(file, "[{}]   {}", timestamp, line)?;
    }
    Ok(())
}
