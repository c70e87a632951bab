//! Scale/pad filter chain construction
//!
//! Frames decoded on a GPU stay in device memory. `pad` and the `nv12`
//! format conversion only run on system-memory frames, so GPU chains wrap
//! them in `hwdownload` ... upload.

use std::fmt;

/// Which scaler implementation a scale stage uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleEngine {
    Npp,      // scale_npp (CUDA frames)
    Vaapi,    // scale_vaapi (VA surfaces)
    Software, // scale (system memory)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStage {
    /// Aspect-preserving downscale to fit inside width x height
    Scale {
        engine: ScaleEngine,
        width: u32,
        height: u32,
    },
    /// Device memory -> system memory
    HwDownload,
    /// Pixel format conversion (`nv12`) or hardware surface tag (`vaapi`)
    Format(&'static str),
    /// Centered letterbox padding to exactly width x height
    Pad {
        width: u32,
        height: u32,
        color: &'static str,
    },
    /// System memory -> CUDA device memory
    HwUploadCuda,
    /// System memory -> filter hardware device (VA-API)
    HwUpload,
}

/// Where frames live at a given point in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameResidency {
    Device,
    System,
}

impl FilterStage {
    /// Residency a frame must have to enter this stage
    fn required_input(&self) -> FrameResidency {
        match self {
            Self::Scale { engine: ScaleEngine::Software, .. } => FrameResidency::System,
            Self::Scale { .. } | Self::HwDownload => FrameResidency::Device,
            Self::Format("vaapi") => FrameResidency::Device,
            Self::Format(_) | Self::Pad { .. } | Self::HwUploadCuda | Self::HwUpload => {
                FrameResidency::System
            }
        }
    }

    /// Residency of frames leaving this stage
    fn output(&self) -> FrameResidency {
        match self {
            Self::HwDownload => FrameResidency::System,
            Self::HwUploadCuda | Self::HwUpload => FrameResidency::Device,
            other => other.required_input(),
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::HwDownload | Self::HwUploadCuda | Self::HwUpload)
    }
}

impl fmt::Display for FilterStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale { engine: ScaleEngine::Software, width, height } => {
                write!(f, "scale={}:{}:force_original_aspect_ratio=decrease", width, height)
            }
            Self::Scale { engine, width, height } => {
                let name = if *engine == ScaleEngine::Npp { "scale_npp" } else { "scale_vaapi" };
                write!(
                    f,
                    "{}=w={}:h={}:force_original_aspect_ratio=decrease",
                    name, width, height
                )
            }
            Self::HwDownload => write!(f, "hwdownload"),
            Self::Format(pix_fmt) => write!(f, "format={}", pix_fmt),
            Self::Pad { width, height, color } => {
                write!(f, "pad={}:{}:-1:-1:color={}", width, height, color)
            }
            Self::HwUploadCuda => write!(f, "hwupload_cuda"),
            Self::HwUpload => write!(f, "hwupload"),
        }
    }
}

/// Ordered filter stages, rendered as a single `-vf` filtergraph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChain {
    stages: Vec<FilterStage>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push(&mut self, stage: FilterStage) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn has_transfer(&self) -> bool {
        self.stages.iter().any(FilterStage::is_transfer)
    }

    /// Bounds of the scale stage, if any
    pub fn scale_bounds(&self) -> Option<(u32, u32)> {
        self.stages.iter().find_map(|s| match s {
            FilterStage::Scale { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
    }

    /// Frame size the chain pads out to, if any
    pub fn output_frame(&self) -> Option<(u32, u32)> {
        self.stages.iter().find_map(|s| match s {
            FilterStage::Pad { width, height, .. } => Some((*width, *height)),
            _ => None,
        })
    }

    /// True when every stage receives frames where it can process them and
    /// the chain ends where it started.
    pub fn is_residency_consistent(&self, start: FrameResidency) -> bool {
        let mut current = start;
        for stage in &self.stages {
            if stage.required_input() != current {
                return false;
            }
            current = stage.output();
        }
        current == start
    }

    pub fn to_filtergraph(&self) -> String {
        self.stages
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filtergraph())
    }
}

impl FromIterator<FilterStage> for FilterChain {
    fn from_iter<I: IntoIterator<Item = FilterStage>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}

/// Letterbox chain for frames that stay in system memory
pub fn software_letterbox(width: u32, height: u32) -> FilterChain {
    [
        FilterStage::Scale { engine: ScaleEngine::Software, width, height },
        FilterStage::Pad { width, height, color: "black" },
    ]
    .into_iter()
    .collect()
}

/// Letterbox chain for device-resident frames: scale on the GPU, then pad in
/// system memory between a download and an upload.
pub fn device_letterbox(
    engine: ScaleEngine,
    width: u32,
    height: u32,
    upload: &[FilterStage],
) -> FilterChain {
    let mut chain = FilterChain::new();
    chain
        .push(FilterStage::Scale { engine, width, height })
        .push(FilterStage::HwDownload)
        .push(FilterStage::Format("nv12"))
        .push(FilterStage::Pad { width, height, color: "black" });
    for stage in upload {
        chain.push(stage.clone());
    }
    chain
}
