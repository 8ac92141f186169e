//! Template Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Evaluation template record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub created_by: RecordId,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
