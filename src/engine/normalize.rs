//! Input preparation for intent matching.

/// Lower-case the message for substring matching.
///
/// No trimming, tokenizing or stemming is done; rules match on raw
/// containment.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}
