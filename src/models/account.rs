use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::error::DomainError;

/// A customer account. Owns users, addresses, and devices; the `active`
/// flag lives only in storage, every query filters on it.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub salt: String,
    pub name: String,
    pub verified: bool,
    pub receives_updates: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: &str, name: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            email: email.to_string(),
            password_hash: String::new(),
            salt: String::new(),
            name: name.to_string(),
            verified: false,
            receives_updates: false,
            created_at: timestamp,
            modified_at: timestamp,
        }
    }

    /// Hash and store the password with the given per-account salt.
    pub fn set_password(&mut self, password: &str, salt: &str) -> Result<(), DomainError> {
        let digest = bcrypt::hash(format!("{}{}", password, salt), bcrypt::DEFAULT_COST)
            .context("password hashing failed")?;
        self.password_hash = digest;
        self.salt = salt.to_string();
        self.modified_at = Utc::now();
        Ok(())
    }

    pub fn verify_password(&self, password: &str) -> bool {
        bcrypt::verify(format!("{}{}", password, self.salt), &self.password_hash)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_verifies_and_rejects() {
        let mut account = Account::new("a@x.com", "A", Utc::now());
        account.set_password("pw", "salt-1").unwrap();
        assert!(account.verify_password("pw"));
        assert!(!account.verify_password("wrong"));
        assert_ne!(account.password_hash, "pw");
    }

    #[test]
    fn salt_participates_in_the_digest() {
        let mut a = Account::new("a@x.com", "A", Utc::now());
        a.set_password("pw", "salt-1").unwrap();
        let mut b = a.clone();
        b.salt = "salt-2".into();
        assert!(!b.verify_password("pw"));
    }
}
