use serde::{Deserialize, Serialize};
use std::fmt;

/// Token hosts serialize for a missing value. Treated as absent on input and
/// stripped from every plan string on output.
pub const ABSENT_PLACEHOLDER: &str = "undefined";

/// Label used in trace output for a file whose codec could not be read.
pub const UNKNOWN_CODEC: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediumKind {
    Video,
    Audio,
    /// Also used when the host leaves the medium out
    #[default]
    Other,
}

impl fmt::Display for MediumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Already-parsed properties of one input file, supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MediaDescriptor {
    #[serde(default)]
    pub medium: MediumKind,

    /// Source video codec (ffprobe `codec_name`), compared case-insensitively
    #[serde(default)]
    pub codec: Option<String>,

    /// 0 = unknown
    #[serde(default)]
    pub width: u32,

    /// 0 = unknown
    #[serde(default)]
    pub height: u32,
}

impl MediaDescriptor {
    pub fn video(codec: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            medium: MediumKind::Video,
            codec: Some(codec.into()),
            width,
            height,
        }
    }

    pub fn is_video(&self) -> bool {
        self.medium == MediumKind::Video
    }

    /// Lowercased codec name, or `None` when absent, blank, or a serialized
    /// placeholder from the host
    pub fn normalized_codec(&self) -> Option<String> {
        self.codec
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ABSENT_PLACEHOLDER))
            .map(str::to_lowercase)
    }

    /// Codec name for trace messages
    pub fn codec_label(&self) -> String {
        self.normalized_codec()
            .unwrap_or_else(|| UNKNOWN_CODEC.to_string())
    }

    /// `WxH` for trace messages
    pub fn resolution_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// The fixed output policy every plan targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPolicy {
    pub codec: &'static str,
    pub width: u32,
    pub height: u32,
    pub container_extension: &'static str,
}

pub const TARGET_POLICY: TargetPolicy = TargetPolicy {
    codec: "hevc",
    width: 1280,
    height: 720,
    container_extension: ".mkv",
};

impl TargetPolicy {
    /// Label like `720p` used in trace messages
    pub fn label(&self) -> String {
        format!("{}p", self.height)
    }

    pub fn resolution_label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Result of planning one file.
///
/// When `should_process` is false, only `trace_log` carries meaning; the
/// argument lists are empty and the host must not act on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscodePlan {
    pub should_process: bool,
    pub decode_args: Vec<String>,
    pub encode_args: Vec<String>,
    pub container_extension: &'static str,
    pub trace_log: Vec<String>,
}

impl TranscodePlan {
    /// A fully-formed "do nothing" plan
    pub fn skip(trace_log: Vec<String>) -> Self {
        Self {
            should_process: false,
            decode_args: Vec::new(),
            encode_args: Vec::new(),
            container_extension: TARGET_POLICY.container_extension,
            trace_log,
        }
    }

    /// Trace lines as the newline-terminated log the host displays
    pub fn info_log(&self) -> String {
        self.trace_log
            .iter()
            .map(|line| format!("{}\n", line))
            .collect()
    }
}

/// Descriptive metadata the batch host shows for this planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginDetails {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub operation: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub tags: &'static str,
}

pub fn details() -> PluginDetails {
    PluginDetails {
        id: "Letterbox_720_Multi_GPU",
        name: "Letterbox 720 Multi-GPU",
        kind: "Video",
        operation: "Transcode",
        description: "Convert all video to H.265 (HEVC), max 720p, using NVENC, VAAPI, or CPU automatically.",
        version: env!("CARGO_PKG_VERSION"),
        tags: "ffmpeg,h265,gpu,nvenc,vaapi,scale720",
    }
}
