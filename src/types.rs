use serde_json::{Map, Value};

/// One parsed unit of input: field name to value, in source order.
pub type Record = Map<String, Value>;
