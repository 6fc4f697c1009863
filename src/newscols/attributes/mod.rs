//! # Attribute System
//!
//! Every configurable property of a columns block is described once, in the
//! [`ATTRIBUTES`] registry. The registry is pure data: names, value kinds,
//! numeric bounds, enumerated options, defaults, and the capability a block
//! profile must offer before the attribute takes effect.
//!
//! ## Attribute Kinds
//!
//! | Kind | Attributes | Stored as |
//! |------|------------|-----------|
//! | `Color` | `backgroundColor`, `textColor`, `columnRuleColor`, `dropCapColor` | optional string |
//! | `Spacing` | `padding` | four optional CSS lengths |
//! | `Integer` | `columnCount`, `columnWidth`, `columnGap`, `columnRuleWidth` | bounded `u32` |
//! | `Enum` | `columnRuleStyle` | [`RuleStyle`](crate::model::RuleStyle) |
//! | `Preset` | `dropCapSize` | [`DropCapSize`](crate::dropcap::DropCapSize) |
//!
//! ## Usage
//!
//! ```ignore
//! // Reading an attribute
//! let count = attrs.get_attr("columnCount");
//!
//! // Writing a normalized value
//! let effect = attrs.set_attr("columnCount", AttrValue::Integer(3));
//! ```
//!
//! Raw values coming from an editing surface go through
//! [`crate::clamp::normalize`] first; `set_attr` only accepts values that are
//! already valid.

mod spec;
mod value;

pub use spec::{get_spec, AttributeKind, AttributeSpec, Bounds, Capability, ATTRIBUTES};
pub use value::{AttrSideEffect, AttrValue};
