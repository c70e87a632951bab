//! Skip detection for files that already match the output policy.

use super::types::{MediaDescriptor, TargetPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceCheck {
    pub skip: bool,
    pub reason: String,
}

impl ComplianceCheck {
    fn skip(reason: String) -> Self {
        Self { skip: true, reason }
    }

    fn process(reason: String) -> Self {
        Self { skip: false, reason }
    }
}

/// Decide whether `descriptor` already satisfies `target`.
///
/// A codec match alone never skips: both dimensions must also be within the
/// target bounds. A dimension of 0 (unknown) counts as within bounds.
pub fn is_already_compliant(descriptor: &MediaDescriptor, target: &TargetPolicy) -> ComplianceCheck {
    if !descriptor.is_video() {
        return ComplianceCheck::process(format!(
            "Medium is {}, not video; no compliance opinion.",
            descriptor.medium
        ));
    }

    let codec_matches = descriptor
        .normalized_codec()
        .is_some_and(|c| c == target.codec);
    if !codec_matches {
        return ComplianceCheck::process(format!(
            "Codec {} differs from {}; transcoding.",
            descriptor.codec_label(),
            target.codec
        ));
    }

    let res = descriptor.resolution_label();
    let width_ok = descriptor.width <= target.width;
    let height_ok = descriptor.height <= target.height;
    if !(width_ok && height_ok) {
        return ComplianceCheck::process(format!(
            "{} detected but {} > {}; rescaling.",
            target.codec.to_uppercase(),
            res,
            target.label()
        ));
    }

    let mut reason = format!(
        "Already {} and \u{2264}{} ({}). Skipping.",
        target.codec.to_uppercase(),
        target.label(),
        res
    );
    // TODO: confirm with the library owner whether unknown dimensions should force a re-encode
    if descriptor.width == 0 || descriptor.height == 0 {
        reason.push_str(" Resolution was not fully reported; assumed within bounds.");
    }
    ComplianceCheck::skip(reason)
}
