use serde::{Deserialize, Serialize};

/// Default container nesting limit. Real movies nest a handful of levels.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Knobs for a decode run.
///
/// Deserializes from a partial JSON object; missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Check that each length-prefixed action consumes exactly its declared
    /// operand bytes.
    pub strict_action_lengths: bool,
    /// Maximum container nesting. `None` removes the limit; each level then
    /// costs stack, so only use it on trusted input.
    pub max_depth: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strict_action_lengths: true,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl DecodeOptions {
    /// Options matching decoders that trust action length fields blindly.
    pub fn lenient() -> Self {
        Self {
            strict_action_lengths: false,
            ..Self::default()
        }
    }
}
