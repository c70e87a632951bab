use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to parse ffprobe JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no streams found in ffprobe output")]
    NoStreams,
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("unknown hardware tier '{0}' (expected nvidia, vaapi, or cpu)")]
    UnknownTier(String),

    #[error("argument cannot be shell-quoted: {0}")]
    Quote(#[from] shlex::QuoteError),
}
