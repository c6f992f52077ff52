//! Profile Handler
//!
//! Read and edit of the caller's profile. A profile row is normally created
//! at registration; `ensure` also creates one on first read so accounts
//! predating that invariant still get one, idempotently.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Currency, DomainError, MAX_PHONE_LEN};
use crate::error::AppError;

use super::UpdateProfileCommand;

/// A user's profile record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub phone: String,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

type ProfileRow = (Uuid, Uuid, String, String, String, DateTime<Utc>, DateTime<Utc>);

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let (id, user_id, bio, phone, currency, created_at, updated_at) = row;
        // The column only ever holds symbols we wrote; anything else means
        // the table was edited behind our back.
        let currency = currency
            .parse()
            .map_err(|_| AppError::Internal(format!("Unknown currency '{}' in profiles table", currency)))?;

        Ok(Self {
            id,
            user_id,
            bio,
            phone,
            currency,
            created_at,
            updated_at,
        })
    }
}

/// Handler for profile read and update
pub struct ProfileHandler {
    pool: PgPool,
}

impl ProfileHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the user's profile, creating a default one if absent.
    /// Safe to call repeatedly; concurrent first calls resolve to the same
    /// row through the unique user_id constraint.
    pub async fn ensure(&self, user_id: Uuid) -> Result<Profile, AppError> {
        if let Some(row) = self.fetch(user_id).await? {
            return Profile::try_from(row);
        }

        sqlx::query(
            r#"
            INSERT INTO profiles (id, user_id, bio, phone, currency, created_at, updated_at)
            VALUES ($1, $2, '', '', $3, NOW(), NOW())
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Currency::default().symbol())
        .execute(&self.pool)
        .await?;

        let row = self
            .fetch(user_id)
            .await?
            .ok_or_else(|| AppError::Internal("Profile missing after ensure".to_string()))?;

        Profile::try_from(row)
    }

    /// Edit the user's profile; only provided fields change. Validation
    /// failures leave the stored row untouched.
    pub async fn update(
        &self,
        user_id: Uuid,
        command: UpdateProfileCommand,
    ) -> Result<Profile, AppError> {
        let current = self.ensure(user_id).await?;

        let bio = command.bio.unwrap_or(current.bio);
        let phone = match command.phone {
            Some(raw) => validate_phone(&raw)?,
            None => current.phone,
        };
        let currency = match command.currency {
            Some(raw) => raw.parse::<Currency>()?,
            None => current.currency,
        };

        let row: ProfileRow = sqlx::query_as(
            r#"
            UPDATE profiles
            SET bio = $2, phone = $3, currency = $4, updated_at = NOW()
            WHERE user_id = $1
            RETURNING id, user_id, bio, phone, currency, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&bio)
        .bind(&phone)
        .bind(currency.symbol())
        .fetch_one(&self.pool)
        .await?;

        Profile::try_from(row)
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<ProfileRow>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT id, user_id, bio, phone, currency, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Validate a phone value: bounded length, stored as given otherwise.
fn validate_phone(raw: &str) -> Result<String, DomainError> {
    let value = raw.trim();
    let len = value.chars().count();
    if len > MAX_PHONE_LEN {
        return Err(DomainError::PhoneTooLong(len));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_accepts_short_values() {
        assert_eq!(validate_phone(" +33 6 12 34 56 78 ").unwrap(), "+33 6 12 34 56 78");
        assert_eq!(validate_phone("").unwrap(), "");
    }

    #[test]
    fn test_validate_phone_rejects_overlong_values() {
        let long = "0".repeat(MAX_PHONE_LEN + 1);
        assert!(matches!(
            validate_phone(&long),
            Err(DomainError::PhoneTooLong(_))
        ));
    }
}
