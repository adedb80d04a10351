// Per-side diff models as produced by the upstream three-way diff.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single output item, kept opaque apart from the mime-type hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputItem(pub Value);

impl OutputItem {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn output_type(&self) -> Option<&str> {
        self.0.get("output_type").and_then(Value::as_str)
    }

    /// The representation a content renderer should be asked for: the first
    /// key of a rich `data` bundle, `text/plain` for streams and errors, and
    /// `application/json` for anything else.
    pub fn mimetype(&self) -> String {
        if let Some(Value::Object(data)) = self.0.get("data") {
            if let Some(key) = data.keys().next() {
                return key.clone();
            }
        }
        match self.output_type() {
            Some("stream") | Some("error") => "text/plain".to_string(),
            _ => "application/json".to_string(),
        }
    }

    /// The payload matching `mimetype()`.
    pub fn content(&self) -> &Value {
        if let Some(Value::Object(data)) = self.0.get("data") {
            if let Some(first) = data.values().next() {
                return first;
            }
        }
        match self.output_type() {
            Some("stream") => self.0.get("text").unwrap_or(&self.0),
            Some("error") => self.0.get("traceback").unwrap_or(&self.0),
            _ => &self.0,
        }
    }
}

/// Diff of one field (source or metadata) between base and one side.
/// `value` is the content on that side; either may be absent for
/// added/deleted content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffModel {
    #[serde(default)]
    pub base: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unchanged: bool,
    #[serde(default)]
    pub mimetype: Option<String>,
}

impl DiffModel {
    pub fn unchanged(text: &str) -> Self {
        Self {
            base: Some(Value::String(text.to_string())),
            value: Some(Value::String(text.to_string())),
            unchanged: true,
            mimetype: None,
        }
    }

    pub fn changed(base: Option<Value>, value: Option<Value>) -> Self {
        Self {
            base,
            value,
            unchanged: false,
            mimetype: None,
        }
    }

    /// Strings and lists of strings (line-split sources) are text-like.
    pub fn is_text_like(&self) -> bool {
        [&self.base, &self.value]
            .into_iter()
            .flatten()
            .all(is_text_value)
    }

    pub fn mimetype(&self) -> &str {
        match self.mimetype.as_deref() {
            Some(m) => m,
            None if self.is_text_like() => "text/plain",
            None => "application/json",
        }
    }

    pub fn base_text(&self) -> Option<String> {
        self.base.as_ref().and_then(value_text)
    }

    pub fn value_text(&self) -> Option<String> {
        self.value.as_ref().and_then(value_text)
    }
}

fn is_text_value(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Array(parts) => parts.iter().all(Value::is_string),
        _ => false,
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => parts
            .iter()
            .map(|p| p.as_str())
            .collect::<Option<Vec<_>>>()
            .map(|lines| lines.concat()),
        _ => None,
    }
}

/// One aligned output slot on one side of the merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputDiffModel {
    #[serde(default)]
    pub base: Option<OutputItem>,
    #[serde(default)]
    pub value: Option<OutputItem>,
    #[serde(default)]
    pub unchanged: bool,
}

/// Diff of a whole cell between base and one side (local, remote or merged).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellDiffModel {
    #[serde(default)]
    pub added: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub unchanged: bool,
    #[serde(default)]
    pub source: DiffModel,
    #[serde(default)]
    pub metadata: DiffModel,
    #[serde(default)]
    pub outputs: Vec<OutputDiffModel>,
}

impl CellDiffModel {
    /// Output items present on this side, in order.
    pub fn side_outputs(&self) -> Vec<OutputItem> {
        self.outputs.iter().filter_map(|o| o.value.clone()).collect()
    }

    /// Output items present in base, in order.
    pub fn base_outputs(&self) -> Vec<OutputItem> {
        self.outputs.iter().filter_map(|o| o.base.clone()).collect()
    }

    pub fn outputs_unchanged(&self) -> bool {
        self.outputs.iter().all(|o| o.unchanged)
    }
}
