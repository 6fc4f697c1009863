//! Attribute specifications and registry.
//!
//! This module defines the schema for block attributes: what kind of value
//! each one holds, its allowed range or option set, its default, and which
//! block capability it belongs to.

use crate::dropcap::DROP_CAP_SIZES;
use crate::model::RULE_STYLES;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Colour string from the host colour picker, or absent.
    Color,

    /// Four-sided box of CSS lengths (e.g. `padding`).
    Spacing,

    /// Whole number of pixels (or columns), constrained to [`Bounds`].
    Integer,

    /// Closed set of string tokens (e.g. `columnRuleStyle`).
    Enum,

    /// Preset token that resolves to derived values (e.g. `dropCapSize`).
    Preset,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Color => "color",
            AttributeKind::Spacing => "spacing",
            AttributeKind::Integer => "integer",
            AttributeKind::Enum => "enum",
            AttributeKind::Preset => "preset",
        }
    }
}

/// Optional block features. A block profile lists the ones it supports;
/// attributes tied to an unsupported capability are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Padding,
    RuleColor,
    DropCap,
}

/// Inclusive numeric range for an `Integer` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp an already-integral value into range.
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }

    /// Clamp a coerced number into range, then round to the nearest whole value.
    ///
    /// Callers must filter NaN beforehand; infinities clamp to the nearest bound.
    pub fn clamp_f64(&self, value: f64) -> u32 {
        let clamped = value.clamp(f64::from(self.min), f64::from(self.max));
        // Rounding inside integral bounds cannot leave the range.
        clamped.round() as u32
    }
}

/// Specification for a single attribute.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    /// The attribute name as stored in the persisted property bag (camelCase)
    pub name: &'static str,

    /// The kind of value this attribute holds
    pub kind: AttributeKind,

    /// Allowed range, for `Integer` attributes
    pub bounds: Option<Bounds>,

    /// Allowed tokens, for `Enum` and `Preset` attributes
    pub options: &'static [&'static str],

    /// Raw default applied when an instance is inserted, normalized like any
    /// other input. `None` means the attribute starts absent.
    pub default: Option<&'static str>,

    /// Capability a block profile must support for this attribute to apply
    pub capability: Option<Capability>,
}

impl AttributeSpec {
    const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self {
            name,
            kind,
            bounds: None,
            options: &[],
            default: None,
            capability: None,
        }
    }

    const fn bounded(mut self, min: u32, max: u32) -> Self {
        self.bounds = Some(Bounds::new(min, max));
        self
    }

    const fn one_of(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    const fn default_to(mut self, raw: &'static str) -> Self {
        self.default = Some(raw);
        self
    }

    const fn requires(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    /// The default of an `Integer` attribute, already inside its bounds.
    pub fn default_integer(&self) -> Option<u32> {
        let bounds = self.bounds?;
        let parsed = self.default?.parse::<u32>().ok()?;
        Some(bounds.clamp(parsed))
    }
}

/// Registry of all block attributes.
///
/// This is the single source of truth for attribute metadata. Order here is
/// the order used when listing the schema.
pub const ATTRIBUTES: &[AttributeSpec] = &[
    // Colours
    AttributeSpec::new("backgroundColor", AttributeKind::Color),
    AttributeSpec::new("textColor", AttributeKind::Color),
    AttributeSpec::new("columnRuleColor", AttributeKind::Color).requires(Capability::RuleColor),
    AttributeSpec::new("dropCapColor", AttributeKind::Color).requires(Capability::DropCap),
    // Dimensions
    AttributeSpec::new("padding", AttributeKind::Spacing)
        .default_to("20px")
        .requires(Capability::Padding),
    // Column layout
    AttributeSpec::new("columnCount", AttributeKind::Integer)
        .bounded(2, 6)
        .default_to("4"),
    AttributeSpec::new("columnWidth", AttributeKind::Integer)
        .bounded(120, 500)
        .default_to("200"),
    AttributeSpec::new("columnGap", AttributeKind::Integer)
        .bounded(10, 100)
        .default_to("40"),
    // Column separator
    AttributeSpec::new("columnRuleStyle", AttributeKind::Enum)
        .one_of(RULE_STYLES)
        .default_to("solid"),
    AttributeSpec::new("columnRuleWidth", AttributeKind::Integer)
        .bounded(1, 8)
        .default_to("1"),
    // Drop capital
    AttributeSpec::new("dropCapSize", AttributeKind::Preset)
        .one_of(DROP_CAP_SIZES)
        .default_to("small")
        .requires(Capability::DropCap),
];

/// Look up an attribute spec by name.
pub fn get_spec(name: &str) -> Option<&'static AttributeSpec> {
    ATTRIBUTES.iter().find(|spec| spec.name == name)
}
