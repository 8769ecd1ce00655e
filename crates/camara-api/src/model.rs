//! Field contracts shared by every payload type.
//!
//! Models are declared with the crate-internal `model!` macro, which emits
//! the struct, its serde attributes, the `FIELDS` descriptor table, a
//! one-call `new` constructor, `with_*` copy-on-write setters and an
//! incremental builder. Enums are declared with `api_enum!` and implement
//! [`ApiEnum`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::IntoEnumIterator;

use crate::Error;
use crate::shape;

// ── Field descriptors ───────────────────────────────────────────────

/// Static description of one model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Canonical Rust field name (`subscription_id`).
    pub name: &'static str,
    /// JSON key / header name used on the wire (`subscriptionId`).
    pub wire: &'static str,
    /// Whether the field must be present for the model to be valid.
    pub required: bool,
    /// Declared Rust type, for diagnostics.
    pub ty: &'static str,
}

impl Field {
    pub const fn required(name: &'static str, wire: &'static str, ty: &'static str) -> Self {
        Self {
            name,
            wire,
            required: true,
            ty,
        }
    }

    pub const fn optional(name: &'static str, wire: &'static str, ty: &'static str) -> Self {
        Self {
            name,
            wire,
            required: false,
            ty,
        }
    }
}

// ── Model ───────────────────────────────────────────────────────────

/// A typed JSON object shape with a declared field table.
pub trait Model:
    Serialize + DeserializeOwned + CheckShape + Clone + PartialEq + Send + Sync + 'static
{
    /// Model name used in error messages.
    const NAME: &'static str;

    /// Every field, required ones first, in wire order.
    const FIELDS: &'static [Field];

    /// Required-field check of a JSON object keyed by wire names.
    ///
    /// A `null` required key counts as missing. Present values are checked
    /// against their own field type, so nested models and lists of models
    /// follow the same rule. Type errors are left to deserialization.
    fn check_fields(map: &Map<String, Value>) -> Result<(), Error>;

    /// Look up a field by canonical or wire name.
    fn field(name: &str) -> Option<&'static Field> {
        Self::FIELDS
            .iter()
            .find(|f| f.name == name || f.wire == name)
    }

    /// Coerce an untyped JSON object into this model.
    ///
    /// Applies required/optional, enum and timestamp rules at every nesting
    /// level. Unknown keys are ignored.
    fn from_shape(shape: impl Into<Value>) -> Result<Self, Error> {
        shape::coerce(shape.into())
    }

    /// Serialize into a JSON object keyed by wire names. Absent optional
    /// fields are omitted.
    fn to_shape(&self) -> Result<Map<String, Value>, Error> {
        shape::to_object(self, Self::NAME)
    }
}

// ── Shape checks ────────────────────────────────────────────────────

/// Required-field check for any value a model field can hold.
///
/// Models recurse through [`Model::check_fields`], lists check each
/// element and scalars accept anything.
pub trait CheckShape {
    fn check_shape(_value: &Value) -> Result<(), Error> {
        Ok(())
    }
}

macro_rules! scalar_shapes {
    ($($ty:ty),* $(,)?) => {
        $( impl CheckShape for $ty {} )*
    };
}

scalar_shapes!((), bool, i32, i64, f64, String, Value, DateTime<Utc>, NaiveDate);

impl<T: CheckShape> CheckShape for Vec<T> {
    fn check_shape(value: &Value) -> Result<(), Error> {
        match value {
            Value::Array(items) => items.iter().try_for_each(T::check_shape),
            _ => Ok(()),
        }
    }
}

// ── Enums ───────────────────────────────────────────────────────────

/// A closed, string-backed vocabulary.
pub trait ApiEnum:
    Copy + Eq + std::str::FromStr + IntoEnumIterator + Into<&'static str> + 'static
{
    /// Enum name used in error messages.
    const NAME: &'static str;

    /// The exact wire literal for this member.
    fn as_str(self) -> &'static str {
        self.into()
    }

    /// Every permitted wire literal, in declaration order.
    fn allowed() -> Vec<&'static str> {
        Self::iter().map(Into::into).collect()
    }

    /// Match a raw string against the permitted literals (case-sensitive).
    fn coerce(raw: &str) -> Result<Self, Error> {
        raw.parse().map_err(|_| Error::InvalidValue {
            kind: Self::NAME,
            value: raw.to_owned(),
            allowed: Self::allowed().into_iter().map(str::to_owned).collect(),
        })
    }
}

// ── Field conversion ────────────────────────────────────────────────

/// Conversion accepted by builder setters.
///
/// Besides the typed value itself, setters take the untyped forms a caller
/// would naturally have on hand: string literals for enum and timestamp
/// fields, and JSON shapes for nested models. Conversion may fail; builders
/// record the first failure and report it from `build()`.
pub trait IntoField<T> {
    fn into_field(self) -> Result<T, Error>;
}

impl<T> IntoField<T> for T {
    fn into_field(self) -> Result<T, Error> {
        Ok(self)
    }
}

impl IntoField<String> for &str {
    fn into_field(self) -> Result<String, Error> {
        Ok(self.to_owned())
    }
}

impl<E: ApiEnum> IntoField<E> for &str {
    fn into_field(self) -> Result<E, Error> {
        E::coerce(self)
    }
}

impl<E: ApiEnum> IntoField<E> for String {
    fn into_field(self) -> Result<E, Error> {
        E::coerce(&self)
    }
}

impl<E: ApiEnum> IntoField<Vec<E>> for Vec<&str> {
    fn into_field(self) -> Result<Vec<E>, Error> {
        self.into_iter().map(E::coerce).collect()
    }
}

impl<E: ApiEnum, const N: usize> IntoField<Vec<E>> for [&str; N] {
    fn into_field(self) -> Result<Vec<E>, Error> {
        self.into_iter().map(E::coerce).collect()
    }
}

impl IntoField<Vec<String>> for Vec<&str> {
    fn into_field(self) -> Result<Vec<String>, Error> {
        Ok(self.into_iter().map(str::to_owned).collect())
    }
}

impl IntoField<DateTime<Utc>> for &str {
    fn into_field(self) -> Result<DateTime<Utc>, Error> {
        DateTime::parse_from_rfc3339(self)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| Error::TypeMismatch {
                model: "DateTime",
                message: format!("`{self}` is not an RFC 3339 date-time: {e}"),
            })
    }
}

impl IntoField<NaiveDate> for &str {
    fn into_field(self) -> Result<NaiveDate, Error> {
        NaiveDate::parse_from_str(self, "%Y-%m-%d").map_err(|e| Error::TypeMismatch {
            model: "NaiveDate",
            message: format!("`{self}` is not an ISO 8601 date: {e}"),
        })
    }
}

impl<M: Model> IntoField<M> for Value {
    fn into_field(self) -> Result<M, Error> {
        M::from_shape(self)
    }
}

impl<M: Model> IntoField<M> for Map<String, Value> {
    fn into_field(self) -> Result<M, Error> {
        M::from_shape(self)
    }
}

impl<M: Model> IntoField<Vec<M>> for Vec<Value> {
    fn into_field(self) -> Result<Vec<M>, Error> {
        self.into_iter().map(M::from_shape).collect()
    }
}

/// Every member of `E` coerces back from its own wire literal.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn assert_enum_idempotent<E: ApiEnum + std::fmt::Debug>() {
    let literals = E::allowed();
    assert_eq!(literals.len(), E::iter().count(), "{} has duplicate literals", E::NAME);
    for member in E::iter() {
        assert_eq!(E::coerce(member.as_str()).unwrap(), member);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::types::{Device, DeviceIpv4Address};

    #[test]
    fn field_lookup_accepts_both_names() {
        let by_canonical = DeviceIpv4Address::field("public_address");
        let by_wire = DeviceIpv4Address::field("publicAddress");
        assert_eq!(by_canonical, by_wire);
        assert!(by_canonical.is_some_and(|f| f.required));
        assert!(DeviceIpv4Address::field("nope").is_none());
    }

    #[test]
    fn rfc3339_strings_convert_to_utc() {
        let ts: DateTime<Utc> = "2024-01-01T02:00:00+02:00".into_field().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00+00:00");

        let bad: Result<DateTime<Utc>, _> = "yesterday".into_field();
        assert!(matches!(bad, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn iso_dates_convert() {
        let date: NaiveDate = "1990-04-17".into_field().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 4, 17).unwrap());
    }

    #[test]
    fn json_shapes_convert_to_models() {
        let device: Device = json!({
            "phoneNumber": "+123456789",
            "ipv4Address": { "publicAddress": "84.125.93.10", "publicPort": 59765 }
        })
        .into_field()
        .unwrap();

        assert_eq!(device.phone_number.as_deref(), Some("+123456789"));
        let ipv4 = device.ipv4_address.unwrap();
        assert_eq!(ipv4.public_address, "84.125.93.10");
        assert_eq!(ipv4.public_port, Some(59765));
        assert_eq!(ipv4.private_address, None);
    }
}
