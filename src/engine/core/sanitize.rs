//! Placeholder cleanup for finished plans

use regex::Regex;
use std::sync::OnceLock;

use super::types::{ABSENT_PLACEHOLDER, TranscodePlan};

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
static SPACE_BEFORE_PUNCT_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(&format!(r"\b{}\b", regex::escape(ABSENT_PLACEHOLDER)))
            .expect("placeholder pattern is a valid regex")
    })
}

fn space_before_punct_re() -> &'static Regex {
    SPACE_BEFORE_PUNCT_RE
        .get_or_init(|| Regex::new(r"\s+([.,;:!?)])").expect("punctuation pattern is a valid regex"))
}

/// Remove whole-word placeholder tokens and surrounding whitespace
pub fn sanitize_text(text: &str) -> String {
    if !text.contains(ABSENT_PLACEHOLDER) {
        return text.trim().to_string();
    }
    let stripped = placeholder_re().replace_all(text, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    // Only text that held a placeholder is re-spaced; clean args pass through as-is
    space_before_punct_re()
        .replace_all(&collapsed, "$1")
        .into_owned()
}

/// Sanitize each argument, dropping any that end up empty
pub fn sanitize_args(args: Vec<String>) -> Vec<String> {
    args.into_iter()
        .map(|a| sanitize_text(&a))
        .filter(|a| !a.is_empty())
        .collect()
}

/// Strip placeholder tokens from every string the plan carries
pub fn sanitize_plan(plan: TranscodePlan) -> TranscodePlan {
    TranscodePlan {
        decode_args: sanitize_args(plan.decode_args),
        encode_args: sanitize_args(plan.encode_args),
        trace_log: sanitize_args(plan.trace_log),
        ..plan
    }
}
