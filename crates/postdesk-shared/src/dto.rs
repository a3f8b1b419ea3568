//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string of the post count operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountQuery {
    /// `"1"` counts online posts, any other value offline ones.
    pub online: Option<String>,
}

/// Self-description of an exposed resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDocument {
    pub resource: String,
    pub operations: Vec<OperationDocument>,
    /// Field names of each projection context.
    pub contexts: Vec<ContextDocument>,
    pub filters: Vec<FilterDocument>,
    pub pagination: PaginationDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDocument {
    pub name: String,
    pub method: String,
    pub path: String,
    pub summary: String,
    pub input: String,
    pub output: String,
    pub paginated: bool,
    pub success_status: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextDocument {
    pub name: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDocument {
    pub parameter: String,
    pub field: String,
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDocument {
    pub page_parameter: String,
    pub items_per_page_parameter: String,
    pub items_per_page: u64,
    pub maximum_items_per_page: u64,
    pub client_items_per_page: bool,
}
