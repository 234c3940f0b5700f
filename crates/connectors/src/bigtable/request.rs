use super::filter::RowFilter;
use crate::error::WireError;
use serde::{Deserialize, Serialize};

/// A read request as sent to the storage engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RowFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_limit: Option<u64>,
}

impl ScanRequest {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            filter: None,
            rows_limit: None,
        }
    }

    pub fn with_filter(mut self, filter: Option<RowFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_rows_limit(mut self, limit: Option<u64>) -> Self {
        self.rows_limit = limit;
        self
    }

    pub fn to_json(&self) -> Result<String, WireError> {
        serde_json::to_string(self).map_err(WireError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, WireError> {
        serde_json::from_str(json).map_err(WireError::Decode)
    }
}
