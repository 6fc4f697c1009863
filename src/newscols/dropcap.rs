//! # Drop Capital Presets
//!
//! The drop capital is configured by a single size token. Font metrics are
//! never stored independently: they are a fixed function of the preset.
//!
//! | Preset | `fontSize` | `lineHeight` |
//! |--------|------------|--------------|
//! | `small` | `3.8rem` | `3.5rem` |
//! | `large` | `6.2rem` | `5.2rem` |
//!
//! Any other token, including an absent one, resolves to `small`. Stored
//! documents from before the attribute existed, or with metrics that disagree
//! with their `size`, are healed on deserialization by the same rule.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Tokens accepted by the `dropCapSize` selector.
pub const DROP_CAP_SIZES: &[&str] = &["small", "large"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropCapPreset {
    #[default]
    Small,
    Large,
}

impl DropCapPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropCapPreset::Small => "small",
            DropCapPreset::Large => "large",
        }
    }

    pub fn font_size(&self) -> &'static str {
        match self {
            DropCapPreset::Small => "3.8rem",
            DropCapPreset::Large => "6.2rem",
        }
    }

    pub fn line_height(&self) -> &'static str {
        match self {
            DropCapPreset::Small => "3.5rem",
            DropCapPreset::Large => "5.2rem",
        }
    }
}

impl fmt::Display for DropCapPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved drop capital size: the preset plus its derived metrics.
///
/// Only the preset is held; `font_size` and `line_height` are looked up, so
/// the three can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DropCapSize {
    preset: DropCapPreset,
}

impl DropCapSize {
    pub fn size(&self) -> DropCapPreset {
        self.preset
    }

    pub fn font_size(&self) -> &'static str {
        self.preset.font_size()
    }

    pub fn line_height(&self) -> &'static str {
        self.preset.line_height()
    }

    /// Resolve from whatever a host or a stored document handed us: a bare
    /// token, a `{size, fontSize, lineHeight}` object, or anything else.
    pub fn from_raw(raw: &serde_json::Value) -> Self {
        let token = match raw {
            serde_json::Value::String(s) => Some(s.as_str()),
            serde_json::Value::Object(map) => map.get("size").and_then(|v| v.as_str()),
            _ => None,
        };
        resolve_drop_cap_size(token)
    }
}

impl From<DropCapPreset> for DropCapSize {
    fn from(preset: DropCapPreset) -> Self {
        Self { preset }
    }
}

/// Map a size token to its preset. Total: unknown or absent tokens give `small`.
pub fn resolve_drop_cap_size(token: Option<&str>) -> DropCapSize {
    let preset = match token {
        Some("large") => DropCapPreset::Large,
        Some("small") => DropCapPreset::Small,
        other => {
            if let Some(unknown) = other {
                log::debug!("unknown drop cap size {:?}, using small", unknown);
            }
            DropCapPreset::Small
        }
    };
    DropCapSize { preset }
}

impl Serialize for DropCapSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DropCapSize", 3)?;
        state.serialize_field("size", self.preset.as_str())?;
        state.serialize_field("fontSize", self.font_size())?;
        state.serialize_field("lineHeight", self.line_height())?;
        state.end()
    }
}

// Stored metrics are ignored; only `size` is trusted.
impl<'de> Deserialize<'de> for DropCapSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(DropCapSize::from_raw(&raw))
    }
}
