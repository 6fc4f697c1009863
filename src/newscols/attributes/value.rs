//! Attribute value types and side effects.
//!
//! [`AttrValue`] is the typed, already-normalized form of an attribute value.
//! It is what [`crate::clamp::normalize`] produces and what
//! [`AttributeSet::set_attr`](crate::model::AttributeSet::set_attr) accepts.

use serde_json::{json, Value};

use crate::dropcap::DropCapSize;
use crate::model::{Padding, RuleStyle};

/// Runtime representation of a normalized attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Colour override; `None` clears the override
    Color(Option<String>),

    /// Four-sided spacing box
    Spacing(Padding),

    /// Bounded whole number
    Integer(u32),

    /// Column rule style token
    RuleStyle(RuleStyle),

    /// Drop capital preset with its derived metrics
    DropCap(DropCapSize),
}

impl AttrValue {
    /// Get the colour if this is a Color value.
    pub fn as_color(&self) -> Option<Option<&str>> {
        match self {
            AttrValue::Color(c) => Some(c.as_deref()),
            _ => None,
        }
    }

    pub fn as_spacing(&self) -> Option<&Padding> {
        match self {
            AttrValue::Spacing(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            AttrValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_rule_style(&self) -> Option<RuleStyle> {
        match self {
            AttrValue::RuleStyle(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_drop_cap(&self) -> Option<DropCapSize> {
        match self {
            AttrValue::DropCap(d) => Some(*d),
            _ => None,
        }
    }

    /// Short human-readable form, used in command messages.
    /// Value as written to the persisted property bag.
    pub fn to_json(&self) -> Value {
        match self {
            AttrValue::Color(c) => c.as_deref().map_or(Value::Null, Value::from),
            AttrValue::Spacing(p) => p.to_json(),
            AttrValue::Integer(v) => Value::from(*v),
            AttrValue::RuleStyle(s) => Value::from(s.as_str()),
            AttrValue::DropCap(d) => json!({
                "size": d.size().as_str(),
                "fontSize": d.font_size(),
                "lineHeight": d.line_height(),
            }),
        }
    }

    pub fn display(&self) -> String {
        match self {
            AttrValue::Color(Some(c)) => c.clone(),
            AttrValue::Color(None) => "(none)".to_string(),
            AttrValue::Spacing(p) => p.to_string(),
            AttrValue::Integer(v) => v.to_string(),
            AttrValue::RuleStyle(s) => s.to_string(),
            AttrValue::DropCap(d) => d.size().to_string(),
        }
    }
}

/// What the caller has to do after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrSideEffect {
    /// The stored value did not change; no re-render needed.
    None,

    /// The stored value changed; the style declaration must be re-derived.
    Restyle,
}
