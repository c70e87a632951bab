use clap::{Parser, Subcommand};
use letterbox720::engine::{HardwareTier, MediumKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "letterbox720")]
#[command(about = "Plan HEVC 720p letterbox transcodes for NVENC, VAAPI, or CPU", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe acceleration device nodes and show the selected tier
    Detect,

    /// Build a transcode plan for one file
    Plan {
        #[command(flatten)]
        source: DescriptorArgs,

        /// Use this tier instead of probing devices (nvidia, vaapi, cpu)
        #[arg(long, value_parser = parse_tier)]
        tier: Option<HardwareTier>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Input path shown in the ffmpeg command line
        #[arg(long, default_value = "input.mp4")]
        input: PathBuf,

        /// Output path (extension replaced by the plan's container)
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },

    /// Show plugin details
    Details,

    /// Show config status and location, or create default config if missing
    InitConfig,
}

#[derive(clap::Args)]
pub struct DescriptorArgs {
    /// Read a MediaDescriptor JSON file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["ffprobe", "codec", "width", "height", "medium"])]
    pub descriptor: Option<PathBuf>,

    /// Read `ffprobe -print_format json -show_streams` output
    #[arg(long, value_name = "FILE", conflicts_with_all = ["codec", "width", "height", "medium"])]
    pub ffprobe: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "video")]
    pub medium: MediumArg,

    /// Source video codec as reported by ffprobe
    #[arg(long)]
    pub codec: Option<String>,

    #[arg(long, default_value_t = 0)]
    pub width: u32,

    #[arg(long, default_value_t = 0)]
    pub height: u32,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum MediumArg {
    Video,
    Audio,
    Other,
}

impl From<MediumArg> for MediumKind {
    fn from(arg: MediumArg) -> Self {
        match arg {
            MediumArg::Video => MediumKind::Video,
            MediumArg::Audio => MediumKind::Audio,
            MediumArg::Other => MediumKind::Other,
        }
    }
}

fn parse_tier(s: &str) -> Result<HardwareTier, String> {
    s.parse().map_err(|e| format!("{}", e))
}

pub fn parse() -> Cli {
    Cli::parse()
}
