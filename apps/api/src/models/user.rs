use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user row as stored. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// User model safe for client responses -- no password_hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<UserRow> for PublicUser {
    fn from(row: UserRow) -> Self {
        PublicUser {
            user_id: row.user_id,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
            created_at: row.created_at,
            last_login: row.last_login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_drops_password_hash() {
        let row = UserRow {
            user_id: Uuid::new_v4(),
            username: "ihsan".to_string(),
            email: "ihsan@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            full_name: "Ihsan Khan".to_string(),
            created_at: Utc::now(),
            last_login: None,
        };

        let public: PublicUser = row.clone().into();
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$12$secret"));
        assert_eq!(public.username, row.username);
    }
}
