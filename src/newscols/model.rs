//! # Domain Model: the Attribute Set
//!
//! [`AttributeSet`] is the single source of truth for one block instance. It
//! is created with defaults when the block is inserted, mutated one field at a
//! time by editing events, and persisted as a flat camelCase property bag in
//! the block's comment delimiter.
//!
//! ## Invariants
//!
//! - Bounded integers are always inside their declared [`Bounds`]. Fields are
//!   private; the only writer is [`AttributeSet::set_attr`], which refuses
//!   out-of-range values, and raw input reaches it through
//!   [`crate::clamp::normalize`].
//! - `dropCapSize` metrics always match its preset (see [`crate::dropcap`]).
//! - Absent optional fields stay absent; they never become empty strings.
//!
//! ## Persisted Form
//!
//! ```text
//! {"textColor":"#222","padding":{"top":"20px",...},"columnCount":4,
//!  "columnRuleStyle":"solid","dropCapSize":{"size":"small","fontSize":"3.8rem","lineHeight":"3.5rem"}}
//! ```
//!
//! Loading starts from the block profile's defaults and re-normalizes every
//! stored field, so hand-edited or legacy documents load into a valid set: a
//! missing key takes its default (a missing `dropCapSize` resolves to the
//! `small` preset), out-of-range numbers are clamped and unknown rule styles
//! keep the default. A field that is absent in memory is written as `null`
//! when it has a default, so it stays absent on reload.
//!
//! [`Bounds`]: crate::attributes::Bounds

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::attributes::{get_spec, AttrSideEffect, AttrValue};
use crate::block::Profile;
use crate::clamp::normalize;
use crate::dropcap::DropCapSize;

/// Tokens accepted by the `columnRuleStyle` selector.
pub const RULE_STYLES: &[&str] = &["none", "solid", "dotted", "dashed", "double", "groove", "ridge"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStyle {
    None,
    Solid,
    Dotted,
    Dashed,
    Double,
    Groove,
    Ridge,
}

impl RuleStyle {
    /// Parse a selector token. Matching is exact; unknown tokens give `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "none" => Some(RuleStyle::None),
            "solid" => Some(RuleStyle::Solid),
            "dotted" => Some(RuleStyle::Dotted),
            "dashed" => Some(RuleStyle::Dashed),
            "double" => Some(RuleStyle::Double),
            "groove" => Some(RuleStyle::Groove),
            "ridge" => Some(RuleStyle::Ridge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStyle::None => "none",
            RuleStyle::Solid => "solid",
            RuleStyle::Dotted => "dotted",
            RuleStyle::Dashed => "dashed",
            RuleStyle::Double => "double",
            RuleStyle::Groove => "groove",
            RuleStyle::Ridge => "ridge",
        }
    }
}

impl fmt::Display for RuleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-sided spacing box. Each side is a CSS length passed through from the
/// host's box control, or absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: Option<String>,
    pub right: Option<String>,
    pub bottom: Option<String>,
    pub left: Option<String>,
}

impl Padding {
    pub fn uniform(length: &str) -> Self {
        Self {
            top: Some(length.to_string()),
            right: Some(length.to_string()),
            bottom: Some(length.to_string()),
            left: Some(length.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sides().iter().all(|(_, v)| v.is_none())
    }

    /// Sides in CSS order: top, right, bottom, left.
    pub fn sides(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("top", self.top.as_deref()),
            ("right", self.right.as_deref()),
            ("bottom", self.bottom.as_deref()),
            ("left", self.left.as_deref()),
        ]
    }

    /// Persisted form: an object of the present sides.
    pub fn to_json(&self) -> Value {
        let sides = self
            .sides()
            .into_iter()
            .filter_map(|(side, value)| value.map(|v| (side.to_string(), Value::from(v))))
            .collect();
        Value::Object(sides)
    }

    /// Read a box-control value: an object of sides, a single length applied
    /// to every side, a bare number of pixels, or `null` to clear.
    ///
    /// Returns `None` for shapes that cannot be a spacing box.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => Some(Self::default()),
            Value::String(_) | Value::Number(_) => {
                Some(normalize_length(raw).map_or_else(Self::default, |len| Self::uniform(&len)))
            }
            Value::Object(map) => {
                let side = |name: &str| map.get(name).and_then(normalize_length);
                Some(Self {
                    top: side("top"),
                    right: side("right"),
                    bottom: side("bottom"),
                    left: side("left"),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.sides().iter().map(|(_, v)| v.unwrap_or("-")).collect();
        f.write_str(&parts.join(" "))
    }
}

/// True when `value` can sit inside one declaration of an inline `style`
/// attribute without opening another declaration or rule.
pub fn is_declaration_value(value: &str) -> bool {
    !value.contains([';', ':', '{', '}', '"', '<', '>'])
}

fn normalize_length(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty() && is_declaration_value(trimmed)).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(format!("{}px", n)),
        _ => None,
    }
}

/// The configuration of one block instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSet {
    background_color: Option<String>,
    text_color: Option<String>,
    column_rule_color: Option<String>,
    drop_cap_color: Option<String>,
    padding: Option<Padding>,
    column_count: Option<u32>,
    column_width: Option<u32>,
    column_gap: Option<u32>,
    column_rule_style: Option<RuleStyle>,
    column_rule_width: Option<u32>,
    drop_cap_size: Option<DropCapSize>,
}

impl Default for AttributeSet {
    /// Insertion defaults of the full profile.
    fn default() -> Self {
        Self::for_profile(&Profile::FULL)
    }
}

impl AttributeSet {
    /// An attribute set with no fields present.
    pub fn empty() -> Self {
        Self {
            background_color: None,
            text_color: None,
            column_rule_color: None,
            drop_cap_color: None,
            padding: None,
            column_count: None,
            column_width: None,
            column_gap: None,
            column_rule_style: None,
            column_rule_width: None,
            drop_cap_size: None,
        }
    }

    /// The attribute set of a freshly inserted block: the schema default of
    /// every attribute `profile` supports, run through the same
    /// normalization as user input. Unsupported attributes stay absent.
    pub fn for_profile(profile: &Profile) -> Self {
        let mut attrs = Self::empty();
        for spec in profile.attributes() {
            if let Some(raw) = spec.default {
                attrs.apply_raw(spec.name, &Value::String(raw.to_string()));
            }
        }
        attrs
    }

    /// Load a persisted property bag for a block of `profile`.
    ///
    /// Starts from the profile defaults. A missing key keeps its default, an
    /// explicit `null` clears the field, anything else is normalized like
    /// user input; values that cannot be normalized keep the default.
    /// Keys of unsupported or unknown attributes are ignored.
    pub fn from_bag(bag: &Map<String, Value>, profile: &Profile) -> Self {
        let mut attrs = Self::for_profile(profile);
        for spec in profile.attributes() {
            match bag.get(spec.name) {
                None => {}
                Some(Value::Null) => attrs.clear(spec.name),
                Some(raw) => {
                    if attrs.apply_raw(spec.name, raw).is_none() {
                        log::debug!("dropping stored {} value {}", spec.name, raw);
                    }
                }
            }
        }
        attrs
    }

    /// The persisted property bag for a block of `profile`: every present
    /// supported field, plus `null` for defaulted fields that are absent so
    /// that [`from_bag`](Self::from_bag) does not restore their default.
    pub fn to_bag(&self, profile: &Profile) -> Map<String, Value> {
        let mut bag = Map::new();
        for spec in profile.attributes() {
            match self.get_attr(spec.name) {
                Some(value) => {
                    bag.insert(spec.name.to_string(), value.to_json());
                }
                None if spec.default.is_some() => {
                    bag.insert(spec.name.to_string(), Value::Null);
                }
                None => {}
            }
        }
        bag
    }

    /// Builder form of a raw write: normalize `raw` for `name` and store it.
    /// Rejected or unknown writes leave the set unchanged.
    pub fn with(mut self, name: &str, raw: impl Into<Value>) -> Self {
        self.apply_raw(name, &raw.into());
        self
    }

    fn apply_raw(&mut self, name: &str, raw: &Value) -> Option<AttrSideEffect> {
        let value = normalize(name, raw, self)?;
        self.set_attr(name, value)
    }

    fn clear(&mut self, name: &str) {
        match name {
            "backgroundColor" => self.background_color = None,
            "textColor" => self.text_color = None,
            "columnRuleColor" => self.column_rule_color = None,
            "dropCapColor" => self.drop_cap_color = None,
            "padding" => self.padding = None,
            "columnCount" => self.column_count = None,
            "columnWidth" => self.column_width = None,
            "columnGap" => self.column_gap = None,
            "columnRuleStyle" => self.column_rule_style = None,
            "columnRuleWidth" => self.column_rule_width = None,
            "dropCapSize" => self.drop_cap_size = None,
            _ => {}
        }
    }

    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn column_rule_color(&self) -> Option<&str> {
        self.column_rule_color.as_deref()
    }

    pub fn drop_cap_color(&self) -> Option<&str> {
        self.drop_cap_color.as_deref()
    }

    pub fn padding(&self) -> Option<&Padding> {
        self.padding.as_ref()
    }

    pub fn column_count(&self) -> Option<u32> {
        self.column_count
    }

    pub fn column_width(&self) -> Option<u32> {
        self.column_width
    }

    pub fn column_gap(&self) -> Option<u32> {
        self.column_gap
    }

    pub fn column_rule_style(&self) -> Option<RuleStyle> {
        self.column_rule_style
    }

    pub fn column_rule_width(&self) -> Option<u32> {
        self.column_rule_width
    }

    pub fn drop_cap_size(&self) -> Option<DropCapSize> {
        self.drop_cap_size
    }

    /// Get an attribute value by its stored name.
    ///
    /// Returns `None` if the name is not recognized or the field is absent.
    pub fn get_attr(&self, name: &str) -> Option<AttrValue> {
        match name {
            "backgroundColor" => self.background_color.clone().map(|c| AttrValue::Color(Some(c))),
            "textColor" => self.text_color.clone().map(|c| AttrValue::Color(Some(c))),
            "columnRuleColor" => self.column_rule_color.clone().map(|c| AttrValue::Color(Some(c))),
            "dropCapColor" => self.drop_cap_color.clone().map(|c| AttrValue::Color(Some(c))),
            "padding" => self.padding.clone().map(AttrValue::Spacing),
            "columnCount" => self.column_count.map(AttrValue::Integer),
            "columnWidth" => self.column_width.map(AttrValue::Integer),
            "columnGap" => self.column_gap.map(AttrValue::Integer),
            "columnRuleStyle" => self.column_rule_style.map(AttrValue::RuleStyle),
            "columnRuleWidth" => self.column_rule_width.map(AttrValue::Integer),
            "dropCapSize" => self.drop_cap_size.map(AttrValue::DropCap),
            _ => None,
        }
    }

    /// Set a normalized attribute value by its stored name.
    ///
    /// Returns `None` if the name is not recognized, the value kind doesn't
    /// match, or an integer lies outside the attribute's bounds; the set is
    /// left unchanged in all three cases. Otherwise reports whether the stored
    /// value actually changed.
    pub fn set_attr(&mut self, name: &str, value: AttrValue) -> Option<AttrSideEffect> {
        match name {
            "backgroundColor" => {
                let color = value.as_color()?.map(str::to_string);
                Some(replace(&mut self.background_color, color))
            }
            "textColor" => {
                let color = value.as_color()?.map(str::to_string);
                Some(replace(&mut self.text_color, color))
            }
            "columnRuleColor" => {
                let color = value.as_color()?.map(str::to_string);
                Some(replace(&mut self.column_rule_color, color))
            }
            "dropCapColor" => {
                let color = value.as_color()?.map(str::to_string);
                Some(replace(&mut self.drop_cap_color, color))
            }
            "padding" => {
                let padding = value.as_spacing()?.clone();
                let padding = (!padding.is_empty()).then_some(padding);
                Some(replace(&mut self.padding, padding))
            }
            "columnCount" => {
                let count = bounded(name, value.as_integer()?)?;
                Some(replace(&mut self.column_count, Some(count)))
            }
            "columnWidth" => {
                let width = bounded(name, value.as_integer()?)?;
                Some(replace(&mut self.column_width, Some(width)))
            }
            "columnGap" => {
                let gap = bounded(name, value.as_integer()?)?;
                Some(replace(&mut self.column_gap, Some(gap)))
            }
            "columnRuleStyle" => {
                let style = value.as_rule_style()?;
                Some(replace(&mut self.column_rule_style, Some(style)))
            }
            "columnRuleWidth" => {
                let width = bounded(name, value.as_integer()?)?;
                Some(replace(&mut self.column_rule_width, Some(width)))
            }
            "dropCapSize" => {
                // Coupled: metrics always follow the preset
                let size = value.as_drop_cap()?;
                Some(replace(&mut self.drop_cap_size, Some(size)))
            }
            _ => None,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> AttrSideEffect {
    if *slot == value {
        AttrSideEffect::None
    } else {
        *slot = value;
        AttrSideEffect::Restyle
    }
}

fn bounded(name: &str, value: u32) -> Option<u32> {
    let bounds = get_spec(name)?.bounds?;
    bounds.contains(value).then_some(value)
}

impl Serialize for AttributeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_bag(&Profile::FULL).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bag = Map::<String, Value>::deserialize(deserializer)?;
        Ok(AttributeSet::from_bag(&bag, &Profile::FULL))
    }
}
