//! `serde_json` integration.
//!
//! JSON objects are map-like beans: each text-keyed member becomes an
//! attribute. Arrays become sequences, so they flatten the usual way.

use crate::{Bean, Value};

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::from(u)
                } else {
                    n.as_f64().map_or_else(|| Self::Opaque(n.to_string()), Self::Float)
                }
            }
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(items) => Self::Seq(items.iter().map(Self::from).collect()),
            serde_json::Value::Object(members) => Self::Map(
                members
                    .iter()
                    .map(|(k, v)| (Self::Str(k.clone()), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Self::from(&v)
    }
}

impl Bean for serde_json::Value {
    fn entries(&self) -> Option<Vec<(Value, Value)>> {
        self.as_object().map(|members| {
            members
                .iter()
                .map(|(k, v)| (Value::Str(k.clone()), Value::from(v)))
                .collect()
        })
    }
}
