mod command;
mod compliance;
mod decoder;
mod filters;
mod log;
mod pipeline;
mod plan;
mod sanitize;
mod types;

pub use command::{IO_SEPARATOR, format_cmd};
pub use compliance::{ComplianceCheck, is_already_compliant};
pub use decoder::{DECODERS, Decoder, FALLBACK_DECODER, is_known_codec, resolve_decoder};
pub use filters::{FilterChain, FilterStage, FrameResidency, ScaleEngine};
pub use log::append_trace_log;
pub use pipeline::{
    NvencPipeline, SoftwarePipeline, TierPipeline, VaapiPipeline, VideoEncoder, pipeline_for,
    stream_mapping_args,
};
pub use plan::{build_plan, build_plan_with_devices, build_plan_with_pipeline, detect_and_plan};
pub use sanitize::{sanitize_plan, sanitize_text};
pub use types::{
    ABSENT_PLACEHOLDER, MediaDescriptor, MediumKind, PluginDetails, TARGET_POLICY, TargetPolicy,
    TranscodePlan, UNKNOWN_CODEC, details,
};
