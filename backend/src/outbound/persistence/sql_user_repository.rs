//! SQL-backed [`UserRepository`].

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, PasswordHash, Role, User, UserAccount, UserId};

use super::sql_error_mapping::map_basic_sql_error;
use super::{Database, SqlError, SqlRow};

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, role";

#[derive(Debug, Clone)]
pub struct SqlUserRepository {
    db: Database,
}

impl SqlUserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn map_error(error: SqlError) -> UserRepositoryError {
    map_basic_sql_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn decode_user(row: &SqlRow) -> Result<User, UserRepositoryError> {
    let role = row
        .text("role")
        .map_err(map_error)?
        .parse::<Role>()
        .map_err(|err| UserRepositoryError::query(err.to_string()))?;
    Ok(User {
        id: UserId::new(row.integer("id").map_err(map_error)?),
        name: row.text("name").map_err(map_error)?,
        email: row.text("email").map_err(map_error)?,
        role,
    })
}

fn decode_account(row: &SqlRow) -> Result<UserAccount, UserRepositoryError> {
    let stored = row.text("password_hash").map_err(map_error)?;
    let password_hash = PasswordHash::parse(&stored)
        .map_err(|err| UserRepositoryError::query(format!("stored password hash: {err}")))?;
    Ok(UserAccount {
        user: decode_user(row)?,
        password_hash,
    })
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserRepositoryError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = ?");
        let row = self
            .db
            .fetch_one(&sql, &[email.into()])
            .await
            .map_err(map_error)?;
        row.as_ref().map(decode_account).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, UserRepositoryError> {
        let row = self
            .db
            .fetch_one(
                "SELECT id, name, email, role FROM users WHERE name = ? ORDER BY id LIMIT 1",
                &[name.into()],
            )
            .await
            .map_err(map_error)?;
        row.as_ref().map(decode_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let params = [
            user.name.as_str().into(),
            user.email.as_str().into(),
            user.password_hash.encode().into(),
            user.role.as_str().into(),
        ];
        let row = self
            .db
            .fetch_one(
                "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?) RETURNING id",
                &params,
            )
            .await
            .map_err(|err| match err {
                SqlError::UniqueViolation { .. } => {
                    UserRepositoryError::duplicate_email(user.email.as_str())
                }
                other => map_error(other),
            })?
            .ok_or_else(|| UserRepositoryError::query("insert returned no id"))?;

        Ok(User {
            id: UserId::new(row.integer("id").map_err(map_error)?),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        })
    }
}
