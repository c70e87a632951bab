//! Plan assembly: tier -> compliance -> decoder/filter/encoder -> plan

use tracing::{debug, info};

use super::compliance::is_already_compliant;
use super::decoder::{is_known_codec, resolve_decoder};
use super::pipeline::{TierPipeline, pipeline_for};
use super::sanitize::sanitize_plan;
use super::types::{MediaDescriptor, TARGET_POLICY, TranscodePlan};
use crate::engine::hardware::{DeviceNodes, HardwareTier};

/// Build the plan for one file on an already-selected tier, using the
/// default VA-API render node.
pub fn build_plan(descriptor: &MediaDescriptor, tier: HardwareTier) -> TranscodePlan {
    build_plan_with_devices(descriptor, tier, &DeviceNodes::default())
}

/// Like [`build_plan`], with device locations from the caller
pub fn build_plan_with_devices(
    descriptor: &MediaDescriptor,
    tier: HardwareTier,
    devices: &DeviceNodes,
) -> TranscodePlan {
    let pipeline = pipeline_for(tier, devices);
    build_plan_with_pipeline(descriptor, pipeline.as_ref())
}

/// Probe `devices`, then plan. Non-video input returns before probing.
pub fn detect_and_plan(descriptor: &MediaDescriptor, devices: &DeviceNodes) -> TranscodePlan {
    if !descriptor.is_video() {
        return not_video(descriptor);
    }
    build_plan_with_devices(descriptor, devices.detect_tier(), devices)
}

fn not_video(descriptor: &MediaDescriptor) -> TranscodePlan {
    debug!(medium = %descriptor.medium, "skipping non-video input");
    TranscodePlan::skip(vec!["Not a video file.".to_string()])
}

pub fn build_plan_with_pipeline(
    descriptor: &MediaDescriptor,
    pipeline: &dyn TierPipeline,
) -> TranscodePlan {
    if !descriptor.is_video() {
        return not_video(descriptor);
    }

    let target = &TARGET_POLICY;
    let tier = pipeline.tier();
    let mut trace = vec![format!("Detected hardware: {}", tier.display_name())];

    let compliance = is_already_compliant(descriptor, target);
    debug!(
        tier = tier.name(),
        codec = %descriptor.codec_label(),
        width = descriptor.width,
        height = descriptor.height,
        skip = compliance.skip,
        "compliance evaluated"
    );
    trace.push(compliance.reason);
    if compliance.skip {
        info!(codec = %descriptor.codec_label(), "already compliant, no transcode");
        return sanitize_plan(TranscodePlan::skip(trace));
    }

    trace.push(format!(
        "Scaling {} \u{2192} {}.",
        descriptor.resolution_label(),
        target.resolution_label()
    ));

    let codec = descriptor.normalized_codec();
    let decoder = resolve_decoder(codec.as_deref());
    let decoder_name = pipeline.decoder_name(decoder);
    if codec.as_deref().is_some_and(is_known_codec) {
        trace.push(format!(
            "Decoding {} with {}.",
            descriptor.codec_label(),
            decoder_name
        ));
    } else {
        trace.push(format!(
            "No decoder mapping for {}; falling back to {}.",
            descriptor.codec_label(),
            decoder_name
        ));
    }

    let decode_args = pipeline.decode_args(decoder);
    let chain = pipeline.filter_chain(target);
    debug_assert!(chain.is_residency_consistent(pipeline.frame_residency()));
    trace.push(format!("Filter chain: {}", chain));
    let encode_args = pipeline.encode_args(&chain);

    let encoder = pipeline.encoder();
    trace.push(format!(
        "Transcoding with {} encoder ({}).",
        tier.display_name(),
        encoder.ffmpeg_name()
    ));
    info!(
        tier = tier.name(),
        decoder = decoder_name,
        encoder = encoder.ffmpeg_name(),
        "transcode planned"
    );

    sanitize_plan(TranscodePlan {
        should_process: true,
        decode_args,
        encode_args,
        container_extension: target.container_extension,
        trace_log: trace,
    })
}
