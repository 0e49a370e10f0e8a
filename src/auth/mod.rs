pub mod commands;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{Database, User};

/// Profile fields the identity provider exposes for an authenticated
/// session. Sign-in itself happens in the webview; the core only ever sees
/// the resulting profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProfile {
    pub subject: String,
    pub email: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl IdentityProfile {
    pub fn display_name(&self) -> String {
        let name = [self.given_name.as_deref(), self.family_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let name = name.trim();

        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

fn user_from_profile(profile: &IdentityProfile) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4().to_string(),
        external_id: profile.subject.clone(),
        email: profile.email.clone(),
        display_name: profile.display_name(),
        avatar_url: profile.avatar_url.clone(),
        created_at: now,
        updated_at: now,
    }
}

/// Return the internal record for an authenticated identity, creating it the
/// first time the identity is seen.
pub async fn find_or_create_user(db: &Database, profile: &IdentityProfile) -> Result<User> {
    if let Some(existing) = db.get_user_by_external_id(&profile.subject).await? {
        return Ok(existing);
    }

    let user = user_from_profile(profile);
    db.insert_user(&user).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(subject: &str) -> IdentityProfile {
        IdentityProfile {
            subject: subject.to_string(),
            email: "ada@example.com".to_string(),
            given_name: Some("Ada".to_string()),
            family_name: Some("Lovelace".to_string()),
            avatar_url: None,
        }
    }

    fn temp_db() -> Database {
        let path = std::env::temp_dir().join(format!("finsight-test-{}.sqlite3", Uuid::new_v4()));
        Database::new(path).unwrap()
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(profile("sub-1").display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_tolerates_partial_profiles() {
        let mut partial = profile("sub-1");
        partial.family_name = None;
        assert_eq!(partial.display_name(), "Ada");

        partial.given_name = None;
        assert_eq!(partial.display_name(), "ada@example.com");
    }

    #[tokio::test]
    async fn resolving_twice_returns_the_same_record() {
        let db = temp_db();
        let profile = profile("google-oauth2|12345");

        let first = find_or_create_user(&db, &profile).await.unwrap();
        let second = find_or_create_user(&db, &profile).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.display_name, "Ada Lovelace");
        assert_eq!(second.external_id, "google-oauth2|12345");
    }

    #[tokio::test]
    async fn unknown_identity_is_absent_until_resolved() {
        let db = temp_db();
        assert!(db
            .get_user_by_external_id("never-seen")
            .await
            .unwrap()
            .is_none());
    }
}
