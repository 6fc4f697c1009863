//! # Clamp / Normalize Engine
//!
//! Turns a raw value from an editing control into a valid [`AttrValue`], or
//! rejects it. Raw values arrive as JSON because that is what host controls
//! emit: number inputs send strings or numbers, colour pickers send a string
//! or nothing, selectors send tokens, box controls send objects.
//!
//! ## Rules per kind
//!
//! | Kind | Accepted | Fallback |
//! |------|----------|----------|
//! | `Integer` | anything numeric, then `max(min, min(max, n))`, rounded | prior value, else schema default |
//! | `Enum` | exactly one of the declared tokens | rejected, field unchanged |
//! | `Preset` | any value; resolved by [`resolve_drop_cap_size`] | `small` |
//! | `Color` | a string (trimmed) or `null`; no `;` `:` `{` `}` | empty string clears, unsafe text rejected |
//! | `Spacing` | see [`Padding::from_raw`] | rejected |
//!
//! Every function here is pure. Clamping a value that is already valid
//! returns it unchanged.

use serde_json::Value;

use crate::attributes::{get_spec, AttrValue, AttributeKind, AttributeSpec, Bounds};
use crate::dropcap::DropCapSize;
use crate::model::{is_declaration_value, AttributeSet, Padding, RuleStyle};

/// Numeric coercion of a raw control value.
///
/// Numbers pass through; strings are trimmed and parsed. Empty strings,
/// NaN, booleans, `null`, arrays and objects are not numeric.
pub fn coerce_number(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    (!value.is_nan()).then_some(value)
}

/// Clamp a raw value into `bounds`. Non-numeric input yields `fallback`,
/// itself clamped so the result is always in range.
pub fn clamp_integer(bounds: Bounds, raw: &Value, fallback: u32) -> u32 {
    match coerce_number(raw) {
        Some(value) => bounds.clamp_f64(value),
        None => {
            log::debug!("non-numeric input {}, keeping {}", raw, fallback);
            bounds.clamp(fallback)
        }
    }
}

/// Normalize `raw` for the attribute described by `spec`.
///
/// `prior` is the currently stored value, used as the fallback for
/// non-numeric input. Returns `None` when the write must be rejected and the
/// stored value kept.
pub fn clamp(spec: &AttributeSpec, raw: &Value, prior: Option<&AttrValue>) -> Option<AttrValue> {
    match spec.kind {
        AttributeKind::Integer => {
            let bounds = spec.bounds?;
            let fallback = prior
                .and_then(AttrValue::as_integer)
                .or_else(|| spec.default_integer())
                .unwrap_or(bounds.min);
            Some(AttrValue::Integer(clamp_integer(bounds, raw, fallback)))
        }
        AttributeKind::Enum => {
            let token = raw.as_str()?;
            match RuleStyle::parse(token) {
                Some(style) => Some(AttrValue::RuleStyle(style)),
                None => {
                    log::debug!("rejecting {} value {:?}", spec.name, token);
                    None
                }
            }
        }
        AttributeKind::Preset => Some(AttrValue::DropCap(DropCapSize::from_raw(raw))),
        AttributeKind::Color => match raw {
            Value::Null => Some(AttrValue::Color(None)),
            Value::String(s) => {
                let trimmed = s.trim();
                if !is_declaration_value(trimmed) {
                    log::debug!("rejecting {} value {:?}", spec.name, trimmed);
                    return None;
                }
                Some(AttrValue::Color(
                    (!trimmed.is_empty()).then(|| trimmed.to_string()),
                ))
            }
            _ => None,
        },
        AttributeKind::Spacing => Padding::from_raw(raw).map(AttrValue::Spacing),
    }
}

/// Normalize a raw value for the attribute called `name`, using the value
/// currently stored in `attrs` as the prior.
///
/// Returns `None` for unknown attribute names and for rejected writes.
pub fn normalize(name: &str, raw: &Value, attrs: &AttributeSet) -> Option<AttrValue> {
    let spec = get_spec(name)?;
    let prior = attrs.get_attr(name);
    clamp(spec, raw, prior.as_ref())
}
