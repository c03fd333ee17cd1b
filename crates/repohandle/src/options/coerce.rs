//! Value coercion rules.
//!
//! Turns a caller's [`Input`] into the canonical [`OptValue`] for an option,
//! or rejects it. Coercion never touches the store: the caller writes the
//! result only on success, so a rejected input leaves the old value alone.
//!
//! | Kind | Accepted | Absent |
//! |------|----------|--------|
//! | Bool | bool, int (non-zero is true), `true/false/1/0/yes/no/on/off` | default |
//! | Int | int, bool; checked against the catalog bounds | default |
//! | Str | any string, verbatim | per option |
//! | StringList | bare string, list of strings/absent markers | per option |
//! | PairList | list of 2-tuples of strings | absent |
//! | Enum | set member name (any case) | default |
//! | Callback | callback of the slot's kind | absent |
//! | Data | anything | absent |

use std::sync::Arc;

use super::enums::canonical_name;
use super::spec::{OptionKind, OptionSpec};
use super::value::{Input, OptValue};
use crate::error::{HandleError, Result};

/// Outcome of coercing one input.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Value(OptValue),
    /// The input asks for the option to be cleared; see
    /// [`OptionSpec::clear_value`] for what that means per option.
    Clear,
}

impl Coerced {
    /// Resolve to the value that should be stored.
    pub fn into_value(self, spec: &OptionSpec) -> OptValue {
        match self {
            Coerced::Value(value) => value,
            Coerced::Clear => spec.clear_value(),
        }
    }
}

pub fn coerce(spec: &'static OptionSpec, input: Input) -> Result<Coerced> {
    if input.is_absent() {
        return Ok(Coerced::Clear);
    }

    let value = match spec.kind {
        OptionKind::Bool => OptValue::Bool(to_bool(spec, input)?),
        OptionKind::Int => OptValue::Int(to_int(spec, input)?),
        OptionKind::Str => match input {
            Input::Str(s) => OptValue::Str(Some(s)),
            other => return Err(mismatch(spec, &other)),
        },
        OptionKind::StringList => OptValue::List(Some(to_string_list(spec, input)?)),
        OptionKind::PairList => OptValue::Pairs(Some(to_pairs(spec, input)?)),
        OptionKind::Enum(set) => match input {
            Input::Str(s) => match canonical_name(set, &s) {
                Some(name) => OptValue::Enum(name),
                None => {
                    return Err(HandleError::invalid(
                        spec.name,
                        format!("'{}' is not one of: {}", s, set.join(", ")),
                    ))
                }
            },
            other => return Err(mismatch(spec, &other)),
        },
        OptionKind::Callback(kind) => match input {
            Input::Callback(cb) if cb.kind() == kind => OptValue::Callback(Some(cb)),
            Input::Callback(cb) => {
                return Err(HandleError::invalid(
                    spec.name,
                    format!(
                        "expected a {} callback, got a {} callback",
                        kind.as_str(),
                        cb.kind().as_str()
                    ),
                ))
            }
            other => return Err(mismatch(spec, &other)),
        },
        OptionKind::Data => match input {
            Input::Data(data) => OptValue::Data(Some(data)),
            other => OptValue::Data(Some(Arc::new(other))),
        },
    };

    Ok(Coerced::Value(value))
}

fn mismatch(spec: &OptionSpec, input: &Input) -> HandleError {
    HandleError::invalid(
        spec.name,
        format!("expected {}, got {}", spec.kind.as_str(), input.shape()),
    )
}

fn to_bool(spec: &OptionSpec, input: Input) -> Result<bool> {
    match input {
        Input::Bool(b) => Ok(b),
        Input::Int(i) => Ok(i != 0),
        Input::Str(s) => parse_truth(&s).ok_or_else(|| {
            HandleError::invalid(spec.name, format!("'{}' is not a boolean", s))
        }),
        other => Err(mismatch(spec, &other)),
    }
}

fn parse_truth(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn to_int(spec: &OptionSpec, input: Input) -> Result<i64> {
    let value = match input {
        Input::Int(i) => i,
        Input::Bool(b) => i64::from(b),
        other => return Err(mismatch(spec, &other)),
    };
    if let Some(min) = spec.min {
        if value < min {
            return Err(HandleError::invalid(
                spec.name,
                format!("{} is below the minimum of {}", value, min),
            ));
        }
    }
    if let Some(max) = spec.max {
        if value > max {
            return Err(HandleError::invalid(
                spec.name,
                format!("{} is above the maximum of {}", value, max),
            ));
        }
    }
    Ok(value)
}

fn to_string_list(spec: &OptionSpec, input: Input) -> Result<Vec<String>> {
    match input {
        // A single URL is accepted as a one-element list.
        Input::Str(s) => Ok(vec![s]),
        Input::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Input::Absent => {}
                    Input::Str(s) => out.push(s),
                    other => {
                        return Err(HandleError::invalid(
                            spec.name,
                            format!("list elements must be strings, got {}", other.shape()),
                        ))
                    }
                }
            }
            Ok(out)
        }
        other => Err(mismatch(spec, &other)),
    }
}

fn to_pairs(spec: &OptionSpec, input: Input) -> Result<Vec<(String, String)>> {
    let items = match input {
        Input::List(items) => items,
        other => return Err(mismatch(spec, &other)),
    };

    items
        .into_iter()
        .map(|item| match item {
            Input::Tuple(parts) => match <[Input; 2]>::try_from(parts) {
                Ok([Input::Str(key), Input::Str(value)]) => Ok((key, value)),
                _ => Err(HandleError::invalid(
                    spec.name,
                    "pairs must hold exactly two strings",
                )),
            },
            other => Err(HandleError::invalid(
                spec.name,
                format!("list elements must be pairs, got {}", other.shape()),
            )),
        })
        .collect()
}
