//! Typed views over stored JSON values.
//!
//! [`JsonType`] is the checked cast used by `Document::get_as` and the list
//! accessors. [`DocumentType`] is implemented by typed wrappers around a
//! [`Document`] that can be built from a nested JSON object.

use serde_json::{Map, Number, Value};

use super::document::Document;
use super::error::{Error, ErrorKind};

/// Short runtime type label used in mismatch messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A type a stored [`Value`] can be cast to without coercion.
pub trait JsonType: Sized {
    const NAME: &'static str;

    fn from_json(value: &Value) -> Option<Self>;

    /// Whether this value stands for JSON `null`. Only meaningful for [`Value`].
    fn is_null(&self) -> bool {
        false
    }
}

impl JsonType for Value {
    const NAME: &'static str = "value";

    fn from_json(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

impl JsonType for String {
    const NAME: &'static str = "string";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl JsonType for bool {
    const NAME: &'static str = "boolean";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl JsonType for i64 {
    const NAME: &'static str = "i64";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl JsonType for i32 {
    const NAME: &'static str = "i32";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|int| i32::try_from(int).ok())
    }
}

impl JsonType for u64 {
    const NAME: &'static str = "u64";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_u64()
    }
}

impl JsonType for f64 {
    const NAME: &'static str = "f64";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl JsonType for Number {
    const NAME: &'static str = "number";

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(number.clone()),
            _ => None,
        }
    }
}

impl JsonType for Vec<Value> {
    const NAME: &'static str = "array";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_array().cloned()
    }
}

impl JsonType for Map<String, Value> {
    const NAME: &'static str = "object";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_object().cloned()
    }
}

impl JsonType for Document {
    const NAME: &'static str = "document";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Document::from_map)
    }
}

pub(crate) fn cast<T: JsonType>(key: &str, value: &Value) -> Result<T, Error> {
    T::from_json(value).ok_or_else(|| {
        Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "{} cannot be cast to {}",
                value_type_name(value),
                T::NAME
            ))
            .with_key(key)
    })
}

/// A typed document view that can be materialized from a nested JSON object.
///
/// Implementors provide the zero-argument constructor explicitly instead of
/// relying on runtime introspection:
///
/// ```
/// use dyndoc::api::{Document, DocumentType, Error};
///
/// #[derive(Default)]
/// struct Tag(Document);
///
/// impl DocumentType for Tag {
///     const TYPE_NAME: &'static str = "Tag";
///
///     fn construct() -> Result<Self, Error> {
///         Ok(Self::default())
///     }
///
///     fn document_mut(&mut self) -> &mut Document {
///         &mut self.0
///     }
/// }
/// ```
pub trait DocumentType: Sized {
    const TYPE_NAME: &'static str;

    fn construct() -> Result<Self, Error>;

    fn document_mut(&mut self) -> &mut Document;
}

impl DocumentType for Document {
    const TYPE_NAME: &'static str = "Document";

    fn construct() -> Result<Self, Error> {
        Ok(Document::new())
    }

    fn document_mut(&mut self) -> &mut Document {
        self
    }
}

/// Builds a fresh `T` through `factory` and merges `value`'s entries into it.
pub(crate) fn materialize<T, F>(
    key: &str,
    type_name: &str,
    value: &Value,
    factory: F,
) -> Result<T, Error>
where
    T: DocumentType,
    F: FnOnce() -> Result<T, Error>,
{
    let Value::Object(entries) = value else {
        return Err(Error::new(ErrorKind::TypeMismatch)
            .with_message(format!(
                "{} cannot be materialized as {type_name}",
                value_type_name(value)
            ))
            .with_key(key));
    };
    let mut target = factory().map_err(|err| construction_error(key, type_name, err))?;
    target.document_mut().append_all(entries.clone());
    Ok(target)
}

fn construction_error(key: &str, type_name: &str, err: Error) -> Error {
    if err.kind() == ErrorKind::Construction {
        return err;
    }
    Error::new(ErrorKind::Construction)
        .with_message(format!("failed to construct {type_name}"))
        .with_key(key)
        .with_source(err)
}
