//! User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::User;
use shared::models::{EmployeeCreate, EmployeeUpdate, Role};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// 列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub department: Option<String>,
    pub role: Option<Role>,
}

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find users matching the filter, ordered by department then name
    pub async fn find_all(&self, filter: &UserFilter) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM user
                WHERE ($department = NONE OR department = $department)
                  AND ($role = NONE OR role = $role)
                ORDER BY department, last_name, first_name"#,
            )
            .bind(("department", filter.department.clone()))
            .bind(("role", filter.role))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find all users of a department
    pub async fn find_by_department(&self, department: &str) -> RepoResult<Vec<User>> {
        self.find_all(&UserFilter {
            department: Some(department.to_string()),
            role: None,
        })
        .await
    }

    /// Find user by id ("user:xxx" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let Some(thing) = parse_record_id("user", id) else {
            return Ok(None);
        };
        let user: Option<User> = self.base.db().select(thing).await?;
        Ok(user)
    }

    /// Batch load users for joins
    pub async fn find_by_ids(&self, ids: Vec<RecordId>) -> RepoResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE id INSIDE $ids")
            .bind(("ids", ids))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Find user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", normalize_email(email)))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<User> {
        let email = normalize_email(&data.email);
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::EmailTaken);
        }

        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;
        let now = now_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    email = $email,
                    password_hash = $password_hash,
                    first_name = $first_name,
                    last_name = $last_name,
                    department = $department,
                    role = $role,
                    avatar = $avatar,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("email", email))
            .bind(("password_hash", password_hash))
            .bind(("first_name", data.first_name.trim().to_string()))
            .bind(("last_name", data.last_name.trim().to_string()))
            .bind(("department", data.department.trim().to_string()))
            .bind(("role", data.role.unwrap_or_default()))
            .bind(("avatar", data.avatar))
            .bind(("now", now))
            .await
            .map_err(duplicate_email)?;

        let created: Option<User> = result.take(0).map_err(duplicate_email)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user; absent fields are kept
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<User> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound("Employee not found".to_string()))?;

        let email = match data.email {
            Some(ref email) => {
                let email = normalize_email(email);
                if email != existing.email
                    && self.find_by_email(&email).await?.is_some()
                {
                    return Err(RepoError::EmailTaken);
                }
                email
            }
            None => existing.email.clone(),
        };

        let password_hash = match data.password {
            Some(ref password) => User::hash_password(password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            None => existing.password_hash.clone(),
        };

        let trimmed = |value: Option<String>, current: &str| {
            value
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| current.to_string())
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    email = $email,
                    password_hash = $password_hash,
                    first_name = $first_name,
                    last_name = $last_name,
                    department = $department,
                    role = $role,
                    avatar = $avatar,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", existing.id.clone()))
            .bind(("email", email))
            .bind(("password_hash", password_hash))
            .bind(("first_name", trimmed(data.first_name, &existing.first_name)))
            .bind(("last_name", trimmed(data.last_name, &existing.last_name)))
            .bind(("department", trimmed(data.department, &existing.department)))
            .bind(("role", data.role.unwrap_or(existing.role)))
            .bind(("avatar", data.avatar.or(existing.avatar)))
            .bind(("now", now_millis()))
            .await
            .map_err(duplicate_email)?;

        result
            .take::<Option<User>>(0)
            .map_err(duplicate_email)?
            .ok_or_else(|| RepoError::NotFound("Employee not found".to_string()))
    }
}

/// 邮箱统一小写存储
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 并发注册撞上唯一索引时按重复处理
fn duplicate_email(err: surrealdb::Error) -> RepoError {
    match RepoError::from(err) {
        RepoError::Duplicate(_) => RepoError::EmailTaken,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DatabaseLocation;
    use crate::db::DbService;

    async fn repo() -> UserRepository {
        let service = DbService::connect(&DatabaseLocation::Memory, "test", "test")
            .await
            .unwrap();
        UserRepository::new(service.db)
    }

    fn payload(email: &str, department: &str, role: Option<Role>) -> EmployeeCreate {
        EmployeeCreate {
            email: email.into(),
            password: "secret1".into(),
            first_name: "Test".into(),
            last_name: "User".into(),
            department: department.into(),
            role,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo().await;
        let user = repo
            .create(payload("Jane@Example.com", "IT", None))
            .await
            .unwrap();

        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.role, Role::Employee);
        assert!(user.verify_password("secret1").unwrap());

        let by_email = repo.find_by_email("JANE@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(user.id.clone()));

        let by_id = repo.find_by_id(&user.id.to_string()).await.unwrap();
        assert!(by_id.is_some());
        assert!(repo.find_by_id("evaluation:nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = repo().await;
        repo.create(payload("a@example.com", "IT", None)).await.unwrap();
        let err = repo
            .create(payload("a@example.com", "HR", None))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::EmailTaken));
    }

    #[tokio::test]
    async fn test_filter_and_update() {
        let repo = repo().await;
        let manager = repo
            .create(payload("m@example.com", "IT", Some(Role::Manager)))
            .await
            .unwrap();
        repo.create(payload("e@example.com", "IT", None)).await.unwrap();
        repo.create(payload("s@example.com", "Sales", None)).await.unwrap();

        assert_eq!(repo.find_by_department("IT").await.unwrap().len(), 2);
        let managers = repo
            .find_all(&UserFilter {
                department: None,
                role: Some(Role::Manager),
            })
            .await
            .unwrap();
        assert_eq!(managers.len(), 1);

        let updated = repo
            .update(
                &manager.id.to_string(),
                EmployeeUpdate {
                    department: Some("Sales".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.department, "Sales");
        assert_eq!(updated.email, "m@example.com");
        assert!(updated.verify_password("secret1").unwrap());

        let err = repo
            .update(
                &manager.id.to_string(),
                EmployeeUpdate {
                    email: Some("e@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::EmailTaken));
    }
}
