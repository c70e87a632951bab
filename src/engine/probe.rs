// Descriptor extraction from ffprobe JSON output

use serde::Deserialize;

use crate::engine::core::{MediaDescriptor, MediumKind};
use crate::engine::error::ProbeError;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    streams: Option<Vec<ProbeStream>>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

impl MediaDescriptor {
    /// Build a descriptor from `ffprobe -print_format json -show_streams` output.
    ///
    /// The first video stream supplies codec and size; missing fields stay
    /// absent/0. Without a video stream the medium is audio if any audio
    /// stream exists, otherwise other.
    pub fn from_ffprobe_json(json: &str) -> Result<Self, ProbeError> {
        let output: ProbeOutput = serde_json::from_str(json)?;
        let streams = output.streams.ok_or(ProbeError::NoStreams)?;

        let has_type = |kind: &str| {
            streams
                .iter()
                .any(|s| s.codec_type.as_deref() == Some(kind))
        };

        let Some(video) = streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
        else {
            let medium = if has_type("audio") {
                MediumKind::Audio
            } else {
                MediumKind::Other
            };
            return Ok(Self {
                medium,
                ..Default::default()
            });
        };

        Ok(Self {
            medium: MediumKind::Video,
            codec: video.codec_name.clone(),
            width: video.width.unwrap_or(0),
            height: video.height.unwrap_or(0),
        })
    }
}
