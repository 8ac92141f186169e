//! Database Models
//!
//! 存储层记录，引用字段使用 `RecordId`；对外格式见 `shared::models`。

pub mod comment;
pub mod evaluation;
pub mod template;
pub mod user;

pub use comment::Comment;
pub use evaluation::Evaluation;
pub use template::Template;
pub use user::User;

pub use surrealdb::RecordId;
