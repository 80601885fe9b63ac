//! JSON and YAML helpers mapping failures to [`TypicalError::Serde`].

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;

use crate::errors::{ErrorInfo, TypicalError};
use crate::value::{Dict, Value};

fn serde_error(code: &str, err: impl ToString) -> TypicalError {
    TypicalError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, TypicalError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, TypicalError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, TypicalError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml_deserialize", err))
}

/// Parses a JSON document straight into a runtime [`Value`].
pub fn value_from_json_slice(data: &[u8]) -> Result<Value, TypicalError> {
    let json: JsonValue = from_json_slice(data)?;
    Ok(Value::from(json))
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::None,
            JsonValue::Bool(flag) => Value::Bool(flag),
            JsonValue::Number(number) => match number.as_i64() {
                Some(int) => Value::Int(int),
                None => number.as_f64().map_or(Value::None, Value::Float),
            },
            JsonValue::String(text) => Value::Str(text),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Dict(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect::<Dict>(),
            ),
        }
    }
}
