//! Template Model

use super::employee::EmployeeSummary;
use serde::{Deserialize, Serialize};

/// Evaluation template (rubric)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// 有序的评估类别
    pub categories: Vec<String>,
    /// Creator reference (String ID)
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<EmployeeSummary>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Template {
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// 嵌入到评估中的模板信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
}

/// Create / update template payload
///
/// 缺省字段按空值处理，由服务端统一校验。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatePayload {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}
