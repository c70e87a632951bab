// End-to-end planning scenarios, one per tier/compliance branch

use letterbox720::engine::{
    FilterStage, HardwareTier, MediaDescriptor, MediumKind, TARGET_POLICY, TierPipeline,
    build_plan, pipeline_for,
};

use crate::common::assertions::*;
use crate::common::helpers::*;

#[test]
fn test_compliant_hevc_720p_is_skipped() {
    for tier in HardwareTier::ALL {
        let plan = plan_video("hevc", 1280, 720, tier);
        assert!(!plan.should_process, "tier {}", tier);
        assert!(plan.decode_args.is_empty());
        assert!(plan.encode_args.is_empty());
        assert!(plan.trace_log.iter().any(|l| l.contains("Skipping")));
    }
}

#[test]
fn test_hevc_1080p_on_nvidia() {
    let plan = plan_video("hevc", 1920, 1080, HardwareTier::Nvidia);
    assert!(plan.should_process);

    assert_arg_value(&plan.decode_args, "-hwaccel", "cuda");
    assert_arg_value(&plan.decode_args, "-hwaccel_output_format", "cuda");
    assert_arg_value(&plan.decode_args, "-c:v", "hevc_cuvid");

    let vf = plan
        .encode_args
        .windows(2)
        .find(|w| w[0] == "-vf")
        .map(|w| w[1].clone())
        .unwrap();
    let stages: Vec<&str> = vf.split(',').collect();
    let pad = stages.iter().position(|s| s.starts_with("pad=")).unwrap();
    assert_eq!(stages[pad - 2], "hwdownload");
    assert_eq!(stages[pad - 1], "format=nv12");
    assert_eq!(stages[pad + 1], "hwupload_cuda");

    assert_arg_value(&plan.encode_args, "-c:v", "hevc_nvenc");
    assert_arg_value(&plan.encode_args, "-qp", "25");
    assert_arg_value(&plan.encode_args, "-profile:v", "main10");
}

#[test]
fn test_h264_480p_on_cpu() {
    let plan = plan_video("h264", 640, 480, HardwareTier::Cpu);
    assert!(plan.should_process);
    assert_eq!(plan.decode_args, vec!["-vsync", "0", "-c:v", "h264"]);

    let cmd = plan_cmd(&plan);
    assert_cmd_contains(&cmd, "-c:v libx265 -crf 23");
    assert_cmd_contains(&cmd, "-profile:v main10");
    assert_cmd_not_contains(&cmd, "hwdownload");
    assert_cmd_not_contains(&cmd, "hwupload");
    assert_cmd_not_contains(&cmd, "-hwaccel");
}

#[test]
fn test_unknown_codec_2160p_on_vaapi() {
    let plan = plan_video("unknownxyz", 3840, 2160, HardwareTier::Vaapi);
    assert!(plan.should_process);

    assert_arg_value(&plan.decode_args, "-hwaccel", "vaapi");
    assert_arg_value(&plan.decode_args, "-c:v", "mpeg4");
    assert_arg_value(&plan.encode_args, "-c:v", "hevc_vaapi");
    assert_arg_value(&plan.encode_args, "-qp", "25");
    assert_arg_value(&plan.encode_args, "-profile:v", "main");
}

#[test]
fn test_small_vp9_is_still_letterboxed_to_target() {
    // Non-HEVC sources are re-encoded and padded out to the full target frame
    let plan = plan_video("vp9", 320, 240, HardwareTier::Cpu);
    assert!(plan.should_process);
    let cmd = plan_cmd(&plan);
    assert_cmd_contains(&cmd, "pad=1280:720:-1:-1:color=black");
}

#[test]
fn test_absent_codec_plans_with_fallback() {
    let descriptor = MediaDescriptor {
        medium: MediumKind::Video,
        codec: None,
        width: 1920,
        height: 1080,
        ..Default::default()
    };
    let plan = build_plan(&descriptor, HardwareTier::Nvidia);
    assert!(plan.should_process);
    assert_arg_value(&plan.decode_args, "-c:v", "mpeg4_cuvid");
    assert_plan_free_of(&plan, "undefined");
}

#[test]
fn test_filter_chain_targets_policy_bounds() {
    for tier in HardwareTier::ALL {
        let pipeline = pipeline_for(tier, &Default::default());
        let chain = pipeline.filter_chain(&TARGET_POLICY);
        assert_eq!(chain.scale_bounds(), Some((1280, 720)));
        assert_eq!(chain.output_frame(), Some((1280, 720)));
        assert!(matches!(chain.stages()[0], FilterStage::Scale { .. }));
    }
}

#[test]
fn test_descriptor_without_medium_is_skipped() {
    let json = r#"{ "codec": "h264", "width": 1920, "height": 1080 }"#;
    let descriptor: MediaDescriptor = serde_json::from_str(json).unwrap();
    assert_eq!(descriptor.medium, MediumKind::Other);

    for tier in HardwareTier::ALL {
        let plan = build_plan(&descriptor, tier);
        assert!(!plan.should_process, "tier {}", tier);
        assert!(plan.decode_args.is_empty());
        assert!(plan.encode_args.is_empty());
        assert_eq!(plan.trace_log, vec!["Not a video file."]);
    }
}

#[test]
fn test_embedded_placeholder_leaves_clean_trace() {
    let plan = plan_video("x undefined", 1920, 1080, HardwareTier::Cpu);
    assert!(plan.should_process);
    assert!(
        plan.trace_log
            .contains(&"No decoder mapping for x; falling back to mpeg4.".to_string()),
        "{:?}",
        plan.trace_log
    );
    assert!(plan.trace_log.iter().all(|l| !l.contains(" ;") && !l.contains(" .")));
    assert_plan_free_of(&plan, "undefined");
}
