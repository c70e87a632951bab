//! Per-tier decode, filter, and encode argument construction.
//!
//! Each hardware tier is one [`TierPipeline`] implementation. The tier is
//! chosen once and the planner only talks to the trait.

use super::decoder::Decoder;
use super::filters::{
    FilterChain, FilterStage, FrameResidency, ScaleEngine, device_letterbox, software_letterbox,
};
use super::types::TargetPolicy;
use crate::engine::hardware::{DeviceNodes, HardwareTier};

/// HEVC encoders the planner can select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoEncoder {
    HevcNvenc, // NVIDIA NVENC
    HevcVaapi, // VA-API (AMD/Intel)
    Libx265,   // Software
}

impl VideoEncoder {
    pub fn ffmpeg_name(&self) -> &'static str {
        match self {
            Self::HevcNvenc => "hevc_nvenc",
            Self::HevcVaapi => "hevc_vaapi",
            Self::Libx265 => "libx265",
        }
    }

    pub fn is_hardware(&self) -> bool {
        !matches!(self, Self::Libx265)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::HevcNvenc => "HEVC NVENC (NVIDIA)",
            Self::HevcVaapi => "HEVC VAAPI (Hardware)",
            Self::Libx265 => "libx265 (Software)",
        }
    }
}

/// Decode/encode flavor for frames and devices of one hardware tier
pub trait TierPipeline: Send + Sync {
    fn tier(&self) -> HardwareTier;

    fn encoder(&self) -> VideoEncoder;

    /// Where decoded frames live when they reach the filter chain
    fn frame_residency(&self) -> FrameResidency;

    /// Decoder requested with `-c:v` on the input side
    fn decoder_name(&self, decoder: &Decoder) -> &'static str {
        decoder.name
    }

    /// Arguments placed before `-i`
    fn decode_args(&self, decoder: &Decoder) -> Vec<String>;

    fn filter_chain(&self, target: &TargetPolicy) -> FilterChain;

    /// Encoder, rate control, and quality arguments
    fn encoder_args(&self) -> Vec<String>;

    /// Arguments placed before the output path
    fn encode_args(&self, chain: &FilterChain) -> Vec<String> {
        let mut args = stream_mapping_args();
        if !chain.is_empty() {
            args.push("-vf".to_string());
            args.push(chain.to_filtergraph());
        }
        args.extend(self.encoder_args());
        args
    }
}

/// Video is required; audio and subtitles are optional and always copied
pub fn stream_mapping_args() -> Vec<String> {
    to_args(&[
        "-map", "0:v", "-map", "0:a?", "-map", "0:s?", "-c:a", "copy", "-c:s", "copy",
    ])
}

/// Disables frame-rate sync so timestamps pass through untouched
const VSYNC_ARGS: [&str; 2] = ["-vsync", "0"];

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

/// CUDA decode, NPP scale, NVENC encode
#[derive(Debug, Clone, Copy, Default)]
pub struct NvencPipeline;

impl TierPipeline for NvencPipeline {
    fn tier(&self) -> HardwareTier {
        HardwareTier::Nvidia
    }

    fn encoder(&self) -> VideoEncoder {
        VideoEncoder::HevcNvenc
    }

    fn frame_residency(&self) -> FrameResidency {
        FrameResidency::Device
    }

    fn decoder_name(&self, decoder: &Decoder) -> &'static str {
        decoder.cuda_name()
    }

    fn decode_args(&self, decoder: &Decoder) -> Vec<String> {
        let mut args = to_args(&["-hwaccel", "cuda", "-hwaccel_output_format", "cuda"]);
        args.extend(to_args(&VSYNC_ARGS));
        args.push("-c:v".to_string());
        args.push(self.decoder_name(decoder).to_string());
        args
    }

    fn filter_chain(&self, target: &TargetPolicy) -> FilterChain {
        device_letterbox(
            ScaleEngine::Npp,
            target.width,
            target.height,
            &[FilterStage::HwUploadCuda],
        )
    }

    fn encoder_args(&self) -> Vec<String> {
        to_args(&[
            "-c:v", "hevc_nvenc", "-preset", "fast", "-rc:v", "constqp", "-qp", "25",
            "-profile:v", "main10",
        ])
    }
}

/// VA-API decode, scale, and encode on the render node
#[derive(Debug, Clone)]
pub struct VaapiPipeline {
    render_node: String,
}

impl VaapiPipeline {
    pub fn new(render_node: impl Into<String>) -> Self {
        Self {
            render_node: render_node.into(),
        }
    }

    pub fn render_node(&self) -> &str {
        &self.render_node
    }
}

impl Default for VaapiPipeline {
    fn default() -> Self {
        Self::new(crate::engine::hardware::DEFAULT_RENDER_NODE)
    }
}

impl TierPipeline for VaapiPipeline {
    fn tier(&self) -> HardwareTier {
        HardwareTier::Vaapi
    }

    fn encoder(&self) -> VideoEncoder {
        VideoEncoder::HevcVaapi
    }

    fn frame_residency(&self) -> FrameResidency {
        FrameResidency::Device
    }

    fn decode_args(&self, decoder: &Decoder) -> Vec<String> {
        let mut args = to_args(&["-hwaccel", "vaapi", "-hwaccel_device"]);
        args.push(self.render_node.clone());
        args.extend(to_args(&["-hwaccel_output_format", "vaapi"]));
        args.extend(to_args(&VSYNC_ARGS));
        args.push("-c:v".to_string());
        args.push(self.decoder_name(decoder).to_string());
        args
    }

    fn filter_chain(&self, target: &TargetPolicy) -> FilterChain {
        device_letterbox(
            ScaleEngine::Vaapi,
            target.width,
            target.height,
            &[FilterStage::HwUpload, FilterStage::Format("vaapi")],
        )
    }

    fn encoder_args(&self) -> Vec<String> {
        to_args(&[
            "-c:v", "hevc_vaapi", "-qp", "25", "-preset", "fast", "-profile:v", "main",
            "-rc_mode", "CQP",
        ])
    }
}

/// Software decode and libx265 encode
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwarePipeline;

impl TierPipeline for SoftwarePipeline {
    fn tier(&self) -> HardwareTier {
        HardwareTier::Cpu
    }

    fn encoder(&self) -> VideoEncoder {
        VideoEncoder::Libx265
    }

    fn frame_residency(&self) -> FrameResidency {
        FrameResidency::System
    }

    fn decode_args(&self, decoder: &Decoder) -> Vec<String> {
        let mut args = to_args(&VSYNC_ARGS);
        args.push("-c:v".to_string());
        args.push(self.decoder_name(decoder).to_string());
        args
    }

    fn filter_chain(&self, target: &TargetPolicy) -> FilterChain {
        software_letterbox(target.width, target.height)
    }

    fn encoder_args(&self) -> Vec<String> {
        to_args(&[
            "-c:v", "libx265", "-crf", "23", "-preset", "medium", "-profile:v", "main10",
        ])
    }
}

/// Select the pipeline for a tier. `devices` supplies the VA-API render node.
pub fn pipeline_for(tier: HardwareTier, devices: &DeviceNodes) -> Box<dyn TierPipeline> {
    match tier {
        HardwareTier::Nvidia => Box::new(NvencPipeline),
        HardwareTier::Vaapi => Box::new(VaapiPipeline::new(devices.render_node())),
        HardwareTier::Cpu => Box::new(SoftwarePipeline),
    }
}
