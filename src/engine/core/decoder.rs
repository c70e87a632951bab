//! Source codec to ffmpeg decoder lookup

/// One decoder table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    /// ffmpeg software decoder name
    pub name: &'static str,

    /// NVIDIA hardware decoder (`*_cuvid`), when ffmpeg ships one
    pub cuvid: Option<&'static str>,
}

impl Decoder {
    /// Decoder to request when frames stay on an NVIDIA GPU
    pub fn cuda_name(&self) -> &'static str {
        self.cuvid.unwrap_or(self.name)
    }
}

/// Used for any codec missing from [`DECODERS`]
pub const FALLBACK_DECODER: Decoder = Decoder {
    name: "mpeg4",
    cuvid: Some("mpeg4_cuvid"),
};

/// Known source codecs. Extend here when a new source codec shows up.
///
/// `cuvid` holds the real ffmpeg NVDEC decoder names (`mpeg2_cuvid`, not
/// `mpeg2video_cuvid`); codecs ffmpeg has no cuvid decoder for have `None`.
pub const DECODERS: &[(&str, Decoder)] = &[
    ("h263", Decoder { name: "h263", cuvid: None }),
    ("h264", Decoder { name: "h264", cuvid: Some("h264_cuvid") }),
    ("hevc", Decoder { name: "hevc", cuvid: Some("hevc_cuvid") }),
    ("mjpeg", Decoder { name: "mjpeg", cuvid: Some("mjpeg_cuvid") }),
    ("mpeg1", Decoder { name: "mpeg1video", cuvid: Some("mpeg1_cuvid") }),
    ("mpeg2", Decoder { name: "mpeg2video", cuvid: Some("mpeg2_cuvid") }),
    ("mpeg4", Decoder { name: "mpeg4", cuvid: Some("mpeg4_cuvid") }),
    ("msmpeg4v3", Decoder { name: "msmpeg4v3", cuvid: None }),
    ("vc1", Decoder { name: "vc1", cuvid: Some("vc1_cuvid") }),
    ("vp8", Decoder { name: "vp8", cuvid: Some("vp8_cuvid") }),
    ("vp9", Decoder { name: "vp9", cuvid: Some("vp9_cuvid") }),
];

/// ffprobe reports MPEG-1/2 by their decoder names
fn canonical_codec(codec: &str) -> &str {
    match codec {
        "mpeg1video" => "mpeg1",
        "mpeg2video" => "mpeg2",
        other => other,
    }
}

/// Look up the decoder for a source codec. Never fails: unknown, blank, or
/// absent codecs resolve to [`FALLBACK_DECODER`].
pub fn resolve_decoder(codec: Option<&str>) -> &'static Decoder {
    let Some(codec) = codec.map(str::trim).filter(|c| !c.is_empty()) else {
        return &FALLBACK_DECODER;
    };
    let codec = codec.to_lowercase();
    let key = canonical_codec(&codec);

    DECODERS
        .iter()
        .find(|(source, _)| *source == key)
        .map(|(_, decoder)| decoder)
        .unwrap_or(&FALLBACK_DECODER)
}

/// Whether a codec has its own table entry (as opposed to the fallback)
pub fn is_known_codec(codec: &str) -> bool {
    let codec = codec.trim().to_lowercase();
    let key = canonical_codec(&codec);
    DECODERS.iter().any(|(source, _)| *source == key)
}
