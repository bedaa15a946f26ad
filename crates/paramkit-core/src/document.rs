//! Typed field access for attribute documents.
//!
//! A document is a JSON object. Readers return [`AttrError::MissingField`] when
//! a field is absent and [`AttrError::WrongShape`] when it has the wrong type.
//!
//! JSON has no literal for non-finite floats. They are written as the strings
//! `"inf"`, `"-inf"` and `"nan"` and every float reader accepts them back.

use serde_json::{Map, Value};

use crate::error::{AttrError, AttrResult};

/// Borrowed view of a document object.
pub type Fields = Map<String, Value>;

pub fn as_object(doc: &Value) -> AttrResult<&Fields> {
    doc.as_object().ok_or(AttrError::NotAnObject)
}

pub fn field<'a>(doc: &'a Fields, name: &str) -> AttrResult<&'a Value> {
    doc.get(name).ok_or_else(|| AttrError::missing(name))
}

pub fn read_bool(doc: &Fields, name: &str) -> AttrResult<bool> {
    field(doc, name)?
        .as_bool()
        .ok_or_else(|| AttrError::shape(name, "boolean"))
}

pub fn read_f32(doc: &Fields, name: &str) -> AttrResult<f32> {
    number_f32(field(doc, name)?).ok_or_else(|| AttrError::shape(name, "number"))
}

pub fn read_i32(doc: &Fields, name: &str) -> AttrResult<i32> {
    number_i32(field(doc, name)?).ok_or_else(|| AttrError::shape(name, "32-bit integer"))
}

pub fn read_u32(doc: &Fields, name: &str) -> AttrResult<u32> {
    field(doc, name)?
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| AttrError::shape(name, "unsigned 32-bit integer"))
}

pub fn read_string(doc: &Fields, name: &str) -> AttrResult<String> {
    field(doc, name)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AttrError::shape(name, "string"))
}

pub fn read_f32_vec(doc: &Fields, name: &str) -> AttrResult<Vec<f32>> {
    array(doc, name)?
        .iter()
        .map(number_f32)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AttrError::shape(name, "array of numbers"))
}

pub fn read_i32_vec(doc: &Fields, name: &str) -> AttrResult<Vec<i32>> {
    array(doc, name)?
        .iter()
        .map(number_i32)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AttrError::shape(name, "array of 32-bit integers"))
}

pub fn read_string_vec(doc: &Fields, name: &str) -> AttrResult<Vec<String>> {
    array(doc, name)?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| AttrError::shape(name, "array of strings"))
}

/// Fixed-size float array such as `[x, y]` or `[r, g, b, a]`.
pub fn read_f32_array<const N: usize>(doc: &Fields, name: &str) -> AttrResult<[f32; N]> {
    let values = read_f32_vec(doc, name)?;
    <[f32; N]>::try_from(values).map_err(|_| AttrError::shape(name, format!("array of {N} numbers")))
}

fn array<'a>(doc: &'a Fields, name: &str) -> AttrResult<&'a Vec<Value>> {
    field(doc, name)?
        .as_array()
        .ok_or_else(|| AttrError::shape(name, "array"))
}

fn number_f32(v: &Value) -> Option<f32> {
    match v {
        Value::String(s) => match s.as_str() {
            "inf" => Some(f32::INFINITY),
            "-inf" => Some(f32::NEG_INFINITY),
            "nan" => Some(f32::NAN),
            _ => None,
        },
        _ => v.as_f64().map(|x| x as f32),
    }
}

// ── Writing ───────────────────────────────────────────────────────────────────

/// A number as written to a document.
pub trait DocNumber: Copy {
    fn to_value(self) -> Value;
}

impl DocNumber for f32 {
    fn to_value(self) -> Value {
        if self.is_nan() {
            Value::from("nan")
        } else if self.is_infinite() {
            Value::from(if self > 0.0 { "inf" } else { "-inf" })
        } else {
            Value::from(self)
        }
    }
}

impl DocNumber for i32 {
    fn to_value(self) -> Value {
        Value::from(self)
    }
}

pub fn number_array<T: DocNumber>(values: &[T]) -> Value {
    Value::Array(values.iter().map(|v| v.to_value()).collect())
}

/// serde adapter for `f32` fields of document-bound structs.
pub mod doc_f32 {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::{number_f32, DocNumber};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        value.to_value().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        number_f32(&value).ok_or_else(|| D::Error::custom("expected a number"))
    }
}

/// serde adapter for `[f32; N]` fields of document-bound structs.
pub mod doc_f32_array {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use super::{number_array, number_f32};

    pub fn serialize<S: Serializer, const N: usize>(
        values: &[f32; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        number_array(values).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[f32; N], D::Error> {
        let value = Value::deserialize(deserializer)?;
        value
            .as_array()
            .and_then(|items| items.iter().map(number_f32).collect::<Option<Vec<_>>>())
            .and_then(|items| <[f32; N]>::try_from(items).ok())
            .ok_or_else(|| D::Error::custom(format!("expected an array of {N} numbers")))
    }
}

fn number_i32(v: &Value) -> Option<i32> {
    v.as_i64().and_then(|x| i32::try_from(x).ok())
}
