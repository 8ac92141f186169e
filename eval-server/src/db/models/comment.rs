//! Comment Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Discussion comment on an evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: RecordId,
    pub evaluation: RecordId,
    pub author: RecordId,
    pub content: String,
    #[serde(default)]
    pub parent_comment: Option<RecordId>,
    pub created_at: i64,
    pub updated_at: i64,
}
