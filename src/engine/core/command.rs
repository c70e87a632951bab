//! Turning a plan into something a host can run or display

use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::TranscodePlan;
use crate::engine::error::PlanError;

/// Separator between input-side and output-side arguments in a host preset
pub const IO_SEPARATOR: &str = "<io>";

impl TranscodePlan {
    /// Output path with the plan's container extension
    pub fn output_path(&self, output_stem: &Path) -> PathBuf {
        let ext = self.container_extension.trim_start_matches('.');
        output_stem.with_extension(ext)
    }

    /// Full ffmpeg invocation: decode args, `-i input`, encode args, output
    pub fn to_command(&self, input: &Path, output_stem: &Path) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(&self.decode_args);
        cmd.arg("-i").arg(input);
        cmd.args(&self.encode_args);
        cmd.arg(self.output_path(output_stem));
        cmd
    }

    /// Shell-quoted rendering of [`TranscodePlan::to_command`] for dry runs
    pub fn format_command(&self, input: &Path, output_stem: &Path) -> Result<String, PlanError> {
        format_cmd(&self.to_command(input, output_stem))
    }

    /// `<decode args><io><encode args>` preset string for batch hosts that
    /// place the input and output themselves
    pub fn preset(&self) -> Result<String, PlanError> {
        let decode = quote_args(&self.decode_args)?;
        let encode = quote_args(&self.encode_args)?;
        Ok(format!("{}{} {}", decode, IO_SEPARATOR, encode).trim().to_string())
    }
}

fn quote_args(args: &[String]) -> Result<String, PlanError> {
    Ok(shlex::try_join(args.iter().map(String::as_str))?)
}

/// Render a `Command` as a copy-pasteable shell line
pub fn format_cmd(cmd: &Command) -> Result<String, PlanError> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect();
    let mut parts = vec![program];
    parts.extend(args);
    quote_args(&parts)
}
