pub mod present {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Keeps an explicit `null` as `Some(Value::Null)`; an absent field stays `None`
    /// through `#[serde(default)]`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Some)
    }
}

pub mod trace {
    use serde::ser::SerializeMap;
    use serde::Serializer;

    /// Writes a stack trace as `{ "stack": ... }`, or `{}` when there is none.
    pub fn serialize<S>(stack: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(stack.iter().count()))?;
        if let Some(stack) = stack {
            map.serialize_entry("stack", stack)?;
        }
        map.end()
    }
}
