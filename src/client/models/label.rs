//! Label resource

use serde::{Deserialize, Serialize};

/// A label attached to content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Label ID (absent when posting)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Namespace prefix, normally `global`
    pub prefix: String,

    /// Label text
    pub name: String,
}

/// Label payload for the add-labels endpoint
#[derive(Debug, Clone, Serialize)]
pub struct NewLabel {
    pub prefix: String,
    pub name: String,
}

impl NewLabel {
    /// A label in the `global` namespace.
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            prefix: "global".to_string(),
            name: name.into(),
        }
    }
}
