use anyhow::Result;
use rusqlite::{params, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::User};

fn row_to_user(row: &Row) -> Result<User> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(User {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        avatar_url: row.get("avatar_url")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn get_user_by_external_id(&self, external_id: &str) -> Result<Option<User>> {
        let external_id = external_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, email, display_name, avatar_url, created_at, updated_at
                 FROM users
                 WHERE external_id = ?1",
            )?;

            let mut rows = stmt.query(params![external_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_user(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    pub async fn insert_user(&self, user: &User) -> Result<()> {
        let record = user.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO users (id, external_id, email, display_name, avatar_url, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id,
                    record.external_id,
                    record.email,
                    record.display_name,
                    record.avatar_url,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }
}
