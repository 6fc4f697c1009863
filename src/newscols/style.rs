//! # Style Derivation
//!
//! [`derive_style`] projects an [`AttributeSet`] onto a [`StyleDeclaration`]:
//! an ordered list of CSS property/value pairs used verbatim as the inline
//! style of the block wrapper, in the editor and in saved markup alike.
//!
//! The projection performs no clamping and reads nothing but its arguments.
//! Equal attribute sets give equal declarations, which is what keeps the
//! editing and persisted renders identical.
//!
//! ## Property order
//!
//! ```text
//! background-color  color
//! padding-top  padding-right  padding-bottom  padding-left
//! column-count  column-width  column-gap
//! column-rule-style  column-rule-width  column-rule-color
//! --drop-cap-color  --drop-cap-font-size  --drop-cap-line-height
//! ```
//!
//! Absent fields, and fields the block profile does not support, produce no
//! property. Pixel quantities carry a `px` unit; `column-count` is unitless.
//! The three `--drop-cap-*` custom properties are consumed by the front-end
//! stylesheet that draws the drop capital.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::block::Profile;
use crate::model::AttributeSet;

/// A single `name: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleProperty {
    pub name: String,
    pub value: String,
}

/// Ordered inline style of a block wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleDeclaration {
    properties: Vec<StyleProperty>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: &str, value: impl Into<String>) {
        self.properties.push(StyleProperty {
            name: name.to_string(),
            value: value.into(),
        });
    }

    fn push_opt(&mut self, name: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.properties.iter()
    }

    /// Inline style text as the host serializer writes it: `name:value`
    /// pairs joined by `;`, no spaces, no trailing separator.
    pub fn to_css_text(&self) -> String {
        self.properties
            .iter()
            .map(|p| format!("{}:{}", p.name, p.value))
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Parse inline style text back into a declaration. Tolerates
    /// whitespace, empty segments and a trailing `;`; segments without a
    /// `:` are skipped.
    pub fn parse_css_text(text: &str) -> Self {
        let mut decl = Self::new();
        for segment in text.split(';') {
            let Some((name, value)) = segment.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if !name.is_empty() {
                decl.push(name, value);
            }
        }
        decl
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_text())
    }
}

impl Serialize for StyleDeclaration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.properties.len()))?;
        for prop in &self.properties {
            map.serialize_entry(&prop.name, &prop.value)?;
        }
        map.end()
    }
}

fn px(value: u32) -> String {
    format!("{}px", value)
}

/// Derive the wrapper style for `attrs` under `profile`.
///
/// Expects an attribute set that already went through normalization; it is
/// projected as-is.
pub fn derive_style(attrs: &AttributeSet, profile: &Profile) -> StyleDeclaration {
    let supported = |name: &str| profile.supports_attr(name);
    let mut decl = StyleDeclaration::new();

    decl.push_opt("background-color", attrs.background_color());
    decl.push_opt("color", attrs.text_color());

    if supported("padding") {
        if let Some(padding) = attrs.padding() {
            for (side, value) in padding.sides() {
                decl.push_opt(&format!("padding-{}", side), value);
            }
        }
    }

    decl.push_opt("column-count", attrs.column_count().map(|c| c.to_string()));
    decl.push_opt("column-width", attrs.column_width().map(px));
    decl.push_opt("column-gap", attrs.column_gap().map(px));
    decl.push_opt("column-rule-style", attrs.column_rule_style().map(|s| s.as_str()));
    decl.push_opt("column-rule-width", attrs.column_rule_width().map(px));
    if supported("columnRuleColor") {
        decl.push_opt("column-rule-color", attrs.column_rule_color());
    }

    if supported("dropCapColor") {
        decl.push_opt("--drop-cap-color", attrs.drop_cap_color());
    }
    if supported("dropCapSize") {
        if let Some(size) = attrs.drop_cap_size() {
            decl.push("--drop-cap-font-size", size.font_size());
            decl.push("--drop-cap-line-height", size.line_height());
        }
    }

    decl
}
