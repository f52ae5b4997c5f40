use serde_json::{Map, Value};

/// Wire form shared by shape and metadata descriptors: `{"type": ..., "args"?: {...}}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct TaggedRepr {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) args: Option<Value>,
}

impl TaggedRepr {
    pub(crate) fn bare(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            args: None,
        }
    }

    pub(crate) fn with_args(kind: &str, args: Map<String, Value>) -> Self {
        Self {
            kind: kind.to_owned(),
            args: Some(Value::Object(args)),
        }
    }

    /// Read a tagged record out of an arbitrary JSON value; `None` if it is not one.
    pub(crate) fn from_value(v: &Value) -> Option<Self> {
        let obj = v.as_object()?;
        let kind = obj.get("type")?.as_str()?.to_owned();
        let args = obj.get("args").filter(|a| !a.is_null()).cloned();
        Some(Self { kind, args })
    }

    pub(crate) fn into_value(self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_owned(), Value::String(self.kind));
        if let Some(args) = self.args {
            obj.insert("args".to_owned(), args);
        }
        Value::Object(obj)
    }

    /// Deserialize `args` into `T`, treating missing args as an empty object.
    pub(crate) fn args_as<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.args {
            Some(a) => T::deserialize(a),
            None => T::deserialize(Value::Object(Map::new())),
        }
    }
}
