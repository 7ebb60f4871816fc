use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Template variables. Keys are variable names; values are any JSON value.
pub type TemplateData = Map<String, Value>;

/// Options that control how the document is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Output filename, without the `.pdf` extension.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
}

/// Body of a generate request.
///
/// Serializes to `{"data": {...}, "options": {...}}`, leaving out `data`
/// when it is empty and `options` when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: TemplateData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerateOptions>,
}

impl GenerateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one template variable, replacing any previous value.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replaces all template variables.
    pub fn with_template_data(mut self, data: TemplateData) -> Self {
        self.data = data;
        self
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.options = Some(GenerateOptions {
            filename: filename.into(),
        });
        self
    }
}
