//! Comment Model

use super::employee::EmployeeSummary;
use serde::{Deserialize, Serialize};

/// 评论内容最大长度（字符数）
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Comment on an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Evaluation reference (String ID)
    pub evaluation: String,
    /// Author reference (String ID)
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_info: Option<EmployeeSummary>,
    pub content: String,
    /// Parent comment reference for replies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create comment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentCreate {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
}

/// Update comment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentUpdate {
    #[serde(default)]
    pub content: String,
}
