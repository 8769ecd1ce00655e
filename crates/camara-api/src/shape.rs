//! Coercion between untyped JSON and typed models.
//!
//! serde does the structural work. This module adds the required-field
//! pre-check for shapes and maps serde's error messages onto the crate's
//! data-binding taxonomy (`MissingRequiredField`, `InvalidValue`,
//! `TypeMismatch`).

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::Error;
use crate::model::{CheckShape, Model};

/// Coerce a JSON object into model `M`.
///
/// Required fields are checked against `M::FIELDS` first, at every nesting
/// level, so that a missing or `null` required key is reported by its wire
/// name before serde runs.
pub fn coerce<M: Model>(value: Value) -> Result<M, Error> {
    let Value::Object(map) = &value else {
        return Err(Error::TypeMismatch {
            model: M::NAME,
            message: format!("expected a JSON object, got {}", kind_of(&value)),
        });
    };

    M::check_fields(map)?;
    decode_as(value, M::NAME)
}

/// Decode any JSON value into `T`.
///
/// Used for response bodies, where `T` may be a model, a `Vec` of models or
/// `()` for endpoints without content. Required fields follow the same
/// rules as [`coerce`]; unknown object keys are ignored.
pub fn decode<T: DeserializeOwned + CheckShape>(value: Value) -> Result<T, Error> {
    T::check_shape(&value)?;
    decode_as(value, short_type_name::<T>())
}

/// Enforce the fields a discriminated shape needs for its current tag.
///
/// `variants` pairs each tag literal with the wire names it requires. An
/// absent or unknown tag is left for enum coercion to report.
pub(crate) fn check_variant(
    map: &Map<String, Value>,
    model: &'static str,
    tag: &str,
    variants: &[(&str, &[&str])],
) -> Result<(), Error> {
    let Some(Value::String(current)) = map.get(tag) else {
        return Ok(());
    };
    let Some((_, needs)) = variants.iter().find(|(literal, _)| *literal == current.as_str()) else {
        return Ok(());
    };

    match needs.iter().find(|wire| map.get(**wire).is_none_or(Value::is_null)) {
        Some(missing) => Err(Error::MissingRequiredField {
            model,
            field: (*missing).to_owned(),
        }),
        None => Ok(()),
    }
}

/// Serialize `value` into a JSON object.
pub fn to_object<T: Serialize>(value: &T, model: &'static str) -> Result<Map<String, Value>, Error> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::TypeMismatch {
            model,
            message: format!("serialized to {} instead of an object", kind_of(&other)),
        }),
        Err(e) => Err(classify(model, &e)),
    }
}

fn decode_as<T: DeserializeOwned>(value: Value, model: &'static str) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| classify(model, &e))
}

/// Map a serde error onto the data-binding taxonomy.
///
/// serde_json reports every data error through one category, so the
/// variant is recovered from the message. serde's derive formats these
/// messages as ``missing field `x` `` and
/// ``unknown variant `x`, expected one of `a`, `b` ``.
pub(crate) fn classify(model: &'static str, err: &serde_json::Error) -> Error {
    let message = err.to_string();

    if let Some(rest) = message.strip_prefix("missing field ") {
        if let Some(field) = first_quoted(rest) {
            return Error::MissingRequiredField {
                model,
                field: field.to_owned(),
            };
        }
    }

    if let Some(rest) = message.strip_prefix("unknown variant ") {
        if let Some(value) = first_quoted(rest) {
            let allowed = rest
                .split_once("expected one of ")
                .map(|(_, list)| all_quoted(list))
                .or_else(|| {
                    rest.split_once("expected ")
                        .map(|(_, single)| all_quoted(single))
                })
                .unwrap_or_default();
            return Error::InvalidValue {
                kind: model,
                value: value.to_owned(),
                allowed,
            };
        }
    }

    Error::TypeMismatch { model, message }
}

fn first_quoted(s: &str) -> Option<&str> {
    let start = s.find('`')? + 1;
    let len = s.get(start..)?.find('`')?;
    s.get(start..start + len)
}

fn all_quoted(s: &str) -> Vec<String> {
    s.split('`')
        .skip(1)
        .step_by(2)
        .map(str::to_owned)
        .collect()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `camara_api::qod::SessionInfo` → `SessionInfo`; any `Vec<_>` → `list`.
fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    match full.split_once('<') {
        Some((outer, _)) if outer.ends_with("Vec") => "list",
        _ => full.rsplit("::").next().unwrap_or(full),
    }
}
