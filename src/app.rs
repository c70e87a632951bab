use crate::cli::{Commands, DescriptorArgs};
use anyhow::{Context, Result};
use letterbox720::config::Config;
use letterbox720::engine::{
    self, DeviceNodes, HardwareTier, MediaDescriptor, TranscodePlan, append_trace_log,
};
use std::fs;
use std::path::Path;

pub fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Detect => handle_detect(config),
        Commands::Plan {
            source,
            tier,
            json,
            input,
            output,
        } => handle_plan(config, &source, tier, json, &input, &output),
        Commands::Details => handle_details(),
        Commands::InitConfig => handle_init_config(),
    }
}

fn handle_detect(config: &Config) -> Result<()> {
    let nodes = config.devices.device_nodes();
    let presence = nodes.probe();

    println!("Acceleration devices:");
    for node in &nodes.nvidia {
        println!("  {:<24} {}", node.display(), presence_label(node.exists()));
    }
    println!(
        "  {:<24} {}",
        nodes.render.display(),
        presence_label(presence.vaapi)
    );
    println!();
    println!("Selected tier: {}", HardwareTier::from_presence(presence));
    Ok(())
}

fn presence_label(present: bool) -> &'static str {
    if present { "present" } else { "missing" }
}

fn load_descriptor(source: &DescriptorArgs) -> Result<MediaDescriptor> {
    if let Some(path) = &source.descriptor {
        let text = read_file(path)?;
        return serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse descriptor: {}", path.display()));
    }

    if let Some(path) = &source.ffprobe {
        let text = read_file(path)?;
        return MediaDescriptor::from_ffprobe_json(&text)
            .with_context(|| format!("Failed to read ffprobe output: {}", path.display()));
    }

    Ok(MediaDescriptor {
        medium: source.medium.into(),
        codec: source.codec.clone(),
        width: source.width,
        height: source.height,
    })
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn source_label(source: &DescriptorArgs, input: &Path) -> String {
    source
        .descriptor
        .as_ref()
        .or(source.ffprobe.as_ref())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| input.display().to_string())
}

fn handle_plan(
    config: &Config,
    source: &DescriptorArgs,
    tier: Option<HardwareTier>,
    json: bool,
    input: &Path,
    output: &Path,
) -> Result<()> {
    let descriptor = load_descriptor(source)?;
    let nodes: DeviceNodes = config.devices.device_nodes();

    let plan = match tier {
        Some(tier) => engine::build_plan_with_devices(&descriptor, tier, &nodes),
        None => engine::detect_and_plan(&descriptor, &nodes),
    };

    if let Some(trace_file) = &config.logging.trace_file {
        if let Err(e) = append_trace_log(trace_file, &source_label(source, input), &plan) {
            tracing::warn!("Could not write trace log {}: {}", trace_file.display(), e);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan, input, output)?;
    }
    Ok(())
}

fn print_plan(plan: &TranscodePlan, input: &Path, output: &Path) -> Result<()> {
    print!("{}", plan.info_log());
    println!();
    if !plan.should_process {
        println!("Nothing to do.");
        return Ok(());
    }
    println!("Preset:  {}", plan.preset()?);
    println!("Command: {}", plan.format_command(input, output)?);
    Ok(())
}

fn handle_details() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&engine::details())?);
    Ok(())
}

fn handle_init_config() -> Result<()> {
    let path = Config::config_path()?;
    if Config::exists() {
        println!("Config file exists: {}", path.display());
    } else {
        Config::ensure_default()?;
        println!("Created default config: {}", path.display());
    }
    Ok(())
}
