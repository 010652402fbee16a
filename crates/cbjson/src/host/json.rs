use serde_json::{Number, Value};

use crate::value::{Classify, Variant};

impl Classify for Value {
    fn classify(&self) -> Variant<'_> {
        match self {
            Value::Null => Variant::Null,
            Value::Bool(b) => Variant::Bool(*b),
            Value::Number(n) => n.classify(),
            Value::String(s) => Variant::text(s.as_str()),
            Value::Array(items) => Variant::sequence(items),
            Value::Object(map) => Variant::mapping(map),
        }
    }
}

impl Classify for Number {
    fn classify(&self) -> Variant<'_> {
        if let Some(i) = self.as_i64() {
            Variant::Int(i)
        } else if let Some(u) = self.as_u64() {
            Variant::UInt(u)
        } else if let Some(f) = self.as_f64() {
            Variant::Float(f)
        } else {
            Variant::Unsupported
        }
    }
}
