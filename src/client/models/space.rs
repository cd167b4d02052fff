//! Space resource

use serde::{Deserialize, Serialize};

use super::Links;

/// A Confluence space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Space {
    /// Numeric space ID (absent in some older API responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Space key, e.g. `DEV`
    pub key: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Space type: `global` or `personal`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,

    /// Resource links
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}
