// Cross-tier invariants: what every tier must agree on

use letterbox720::engine::{
    DeviceNodes, FrameResidency, HardwareTier, TARGET_POLICY, TierPipeline, pipeline_for,
    resolve_decoder, stream_mapping_args,
};

use crate::common::helpers::plan_video;

fn pipelines() -> Vec<Box<dyn TierPipeline>> {
    let nodes = DeviceNodes::default();
    HardwareTier::ALL
        .iter()
        .map(|tier| pipeline_for(*tier, &nodes))
        .collect()
}

#[test]
fn test_stream_mapping_is_shared_by_all_tiers() {
    let mapping = stream_mapping_args();
    for tier in HardwareTier::ALL {
        let plan = plan_video("h264", 1920, 1080, tier);
        assert!(
            plan.encode_args.starts_with(&mapping),
            "tier {} encode args: {:?}",
            tier,
            plan.encode_args
        );
    }
}

#[test]
fn test_pipeline_reports_its_own_tier() {
    for (tier, pipeline) in HardwareTier::ALL.iter().zip(pipelines()) {
        assert_eq!(pipeline.tier(), *tier);
    }
}

#[test]
fn test_filter_chains_are_residency_consistent() {
    for pipeline in pipelines() {
        let chain = pipeline.filter_chain(&TARGET_POLICY);
        assert!(
            chain.is_residency_consistent(pipeline.frame_residency()),
            "{} chain: {}",
            pipeline.tier(),
            chain
        );
    }
}

#[test]
fn test_only_hardware_tiers_transfer_frames() {
    for pipeline in pipelines() {
        let chain = pipeline.filter_chain(&TARGET_POLICY);
        assert_eq!(chain.has_transfer(), pipeline.tier().is_hardware());
        let expected = if pipeline.tier().is_hardware() {
            FrameResidency::Device
        } else {
            FrameResidency::System
        };
        assert_eq!(pipeline.frame_residency(), expected);
    }
}

#[test]
fn test_decode_args_end_with_decoder_selection() {
    let decoder = resolve_decoder(Some("vp9"));
    for pipeline in pipelines() {
        let args = pipeline.decode_args(decoder);
        let n = args.len();
        assert!(n >= 2);
        assert_eq!(args[n - 2], "-c:v");
        assert_eq!(args[n - 1], pipeline.decoder_name(decoder));
        assert!(args.windows(2).any(|w| w[0] == "-vsync" && w[1] == "0"));
    }
}

#[test]
fn test_only_nvidia_uses_cuvid_names() {
    let decoder = resolve_decoder(Some("h264"));
    for pipeline in pipelines() {
        let name = pipeline.decoder_name(decoder);
        assert_eq!(
            name.ends_with("_cuvid"),
            pipeline.tier() == HardwareTier::Nvidia,
            "{}",
            name
        );
    }
}

#[test]
fn test_every_tier_encodes_hevc() {
    for tier in HardwareTier::ALL {
        let plan = plan_video("vp8", 1920, 1080, tier);
        let encoder = plan
            .encode_args
            .windows(2)
            .filter(|w| w[0] == "-c:v")
            .map(|w| w[1].as_str())
            .last()
            .unwrap();
        assert!(
            encoder == "libx265" || encoder.starts_with("hevc_"),
            "tier {} encoder {}",
            tier,
            encoder
        );
    }
}
