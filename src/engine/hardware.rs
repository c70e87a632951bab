//! Acceleration device detection and hardware tier selection
//!
//! Detection only checks whether device nodes exist. Tier selection itself is
//! a pure function of the probed presence flags, so planning never needs to
//! touch the file system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

use crate::engine::error::PlanError;

pub const NVIDIA_CONTROL_NODE: &str = "/dev/nvidiactl";
pub const NVIDIA_DEVICE_NODE: &str = "/dev/nvidia0";
pub const DEFAULT_RENDER_NODE: &str = "/dev/dri/renderD128";

/// Acceleration class used for both decode and encode of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareTier {
    Nvidia, // CUDA decode + NVENC
    Vaapi,  // VA-API (AMD/Intel)
    Cpu,    // libx265
}

impl HardwareTier {
    pub const ALL: [HardwareTier; 3] = [Self::Nvidia, Self::Vaapi, Self::Cpu];

    /// Pick a tier from probed presence. NVIDIA wins when both are present.
    pub fn from_presence(presence: DevicePresence) -> Self {
        if presence.nvidia {
            Self::Nvidia
        } else if presence.vaapi {
            Self::Vaapi
        } else {
            Self::Cpu
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nvidia => "nvidia",
            Self::Vaapi => "vaapi",
            Self::Cpu => "cpu",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nvidia => "NVIDIA",
            Self::Vaapi => "VAAPI",
            Self::Cpu => "CPU",
        }
    }

    pub fn is_hardware(&self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl fmt::Display for HardwareTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for HardwareTier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nvidia" | "cuda" | "nvenc" => Ok(Self::Nvidia),
            "vaapi" | "amd" | "intel" => Ok(Self::Vaapi),
            "cpu" | "software" | "libx265" => Ok(Self::Cpu),
            other => Err(PlanError::UnknownTier(other.to_string())),
        }
    }
}

/// Raw probe result, one flag per device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DevicePresence {
    pub nvidia: bool,
    pub vaapi: bool,
}

/// Device node locations checked by the detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceNodes {
    /// Any one of these existing means an NVIDIA GPU is usable
    pub nvidia: Vec<PathBuf>,

    /// VA-API render node; also passed to ffmpeg as `-hwaccel_device`
    pub render: PathBuf,
}

impl Default for DeviceNodes {
    fn default() -> Self {
        Self {
            nvidia: vec![
                PathBuf::from(NVIDIA_CONTROL_NODE),
                PathBuf::from(NVIDIA_DEVICE_NODE),
            ],
            render: PathBuf::from(DEFAULT_RENDER_NODE),
        }
    }
}

impl DeviceNodes {
    /// Check which device nodes exist. Re-probes on every call.
    pub fn probe(&self) -> DevicePresence {
        let presence = DevicePresence {
            nvidia: self.nvidia.iter().any(|p| p.exists()),
            vaapi: self.render.exists(),
        };
        debug!(
            nvidia = presence.nvidia,
            vaapi = presence.vaapi,
            render = %self.render.display(),
            "probed acceleration device nodes"
        );
        presence
    }

    pub fn detect_tier(&self) -> HardwareTier {
        HardwareTier::from_presence(self.probe())
    }

    /// Render node as an ffmpeg argument
    pub fn render_node(&self) -> String {
        self.render.to_string_lossy().to_string()
    }
}

/// Probe the default device nodes and select a tier
pub fn detect_tier() -> HardwareTier {
    DeviceNodes::default().detect_tier()
}
