//! Numeric coercion for heterogeneous stored values.
//!
//! Numbers are used as stored. Strings are trimmed and parsed as an integer
//! first, then as a float; `"42"` yields an integer number and `"3.14"` a
//! float number. Anything else is a type mismatch.

use serde_json::{Number, Value};

use super::convert::value_type_name;
use super::error::{Error, ErrorKind};

pub(crate) fn coerce(key: &str, value: &Value) -> Result<Number, Error> {
    match value {
        Value::Number(number) => Ok(number.clone()),
        Value::String(text) => parse_number(text.trim()).ok_or_else(|| {
            Error::new(ErrorKind::TypeMismatch)
                .with_message(format!("string {text:?} cannot be cast to number"))
                .with_key(key)
        }),
        other => Err(Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "{} cannot be cast to number",
                value_type_name(other)
            ))
            .with_key(key)),
    }
}

fn parse_number(text: &str) -> Option<Number> {
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }
    if let Ok(uint) = text.parse::<u64>() {
        return Some(Number::from(uint));
    }
    // Non-finite floats have no JSON form.
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

pub(crate) fn to_i64(key: &str, number: &Number) -> Result<i64, Error> {
    if let Some(int) = number.as_i64() {
        return Ok(int);
    }
    if number.is_u64() {
        return Err(out_of_range(key, number, "i64"));
    }
    match number.as_f64() {
        // Both bounds are exclusive: integer text below i64::MIN rounds to -2^63 as f64.
        Some(float) if float.fract() == 0.0 => {
            if float > i64::MIN as f64 && float < i64::MAX as f64 {
                Ok(float as i64)
            } else {
                Err(out_of_range(key, number, "i64"))
            }
        }
        _ => Err(Error::new(ErrorKind::TypeMismatch)
            .with_message(format!("{number} is not an integer"))
            .with_key(key)),
    }
}

pub(crate) fn to_i32(key: &str, number: &Number) -> Result<i32, Error> {
    let wide = to_i64(key, number)?;
    i32::try_from(wide).map_err(|_| out_of_range(key, number, "i32"))
}

/// Float coercion for `get_f64`. Unlike [`coerce`], strings such as
/// `"Infinity"` or `"NaN"` yield non-finite floats.
pub(crate) fn coerce_f64(key: &str, value: &Value) -> Result<f64, Error> {
    if let Value::String(text) = value {
        let trimmed = text.trim();
        if trimmed.parse::<i64>().is_err() {
            if let Ok(float) = trimmed.parse::<f64>() {
                return Ok(float);
            }
        }
    }
    to_f64(key, &coerce(key, value)?)
}

pub(crate) fn to_f64(key: &str, number: &Number) -> Result<f64, Error> {
    number.as_f64().ok_or_else(|| {
        Error::new(ErrorKind::TypeMismatch)
            .with_message(format!("{number} cannot be represented as f64"))
            .with_key(key)
    })
}

fn out_of_range(key: &str, number: &Number, target: &str) -> Error {
    Error::new(ErrorKind::TypeMismatch)
        .with_message(format!("{number} is out of range for {target}"))
        .with_key(key)
}
