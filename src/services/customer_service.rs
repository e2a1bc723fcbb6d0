//! Accounts and their nested users and addresses.
//!
//! All deletes are soft: rows keep their data but drop out of every query
//! once `active` is cleared. Nested resources are fetched by primary key
//! first and only then checked against the owning account, so a row that
//! exists under another account is reported with the same wire error as a
//! row that does not exist at all.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::datastore::DataStore;
use crate::dto::{AccountRequest, AddressRequest, UserRequest};
use crate::error::DomainError;
use crate::models::{Account, Address, User};
use crate::ownership::check_ownership;
use crate::pagination::{PageRequest, PageResult};

#[derive(Clone)]
pub struct CustomerService {
    store: DataStore,
}

impl CustomerService {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    // -- accounts -----------------------------------------------------------

    pub async fn add_account(&self, request: &AccountRequest) -> Result<Account, DomainError> {
        request.validate()?;
        let now = Utc::now();
        let mut account = Account::new(&request.email, &request.name, now);
        account.receives_updates = request.receives_updates;
        let salt = Uuid::new_v4().to_string();
        account.set_password(&request.password, &salt)?;

        let created = sqlx::query_as::<_, Account>(
            "INSERT INTO accounts \
             (email, password_hash, salt, name, verified, receives_updates, created_at, modified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.salt)
        .bind(&account.name)
        .bind(account.verified)
        .bind(account.receives_updates)
        .bind(account.created_at)
        .bind(account.modified_at)
        .fetch_one(&self.store.writer)
        .await?;

        info!(account_id = created.id, "account created");
        Ok(created)
    }

    pub async fn fetch_account(&self, account_id: i64) -> Result<Account, DomainError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1 AND active = TRUE")
            .bind(account_id)
            .fetch_optional(&self.store.reader)
            .await?
            .ok_or(DomainError::NotFoundAccountById)
    }

    pub async fn fetch_account_by_email(&self, email: &str) -> Result<Account, DomainError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1 AND active = TRUE")
            .bind(email)
            .fetch_optional(&self.store.reader)
            .await?
            .ok_or(DomainError::NotFoundAccountByEmail)
    }

    /// Credential check for the login and refresh flows. A wrong password and
    /// an unknown email both surface as Unauthorized.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account, DomainError> {
        let account = self
            .fetch_account_by_email(email)
            .await
            .map_err(|_| DomainError::Unauthorized)?;
        if !account.verify_password(password) {
            return Err(DomainError::Unauthorized);
        }
        Ok(account)
    }

    pub async fn update_account(
        &self,
        account_id: i64,
        request: &AccountRequest,
    ) -> Result<Account, DomainError> {
        request.validate()?;
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET email = $1, name = $2, receives_updates = $3, modified_at = $4 \
             WHERE id = $5 AND active = TRUE RETURNING *",
        )
        .bind(&request.email)
        .bind(&request.name)
        .bind(request.receives_updates)
        .bind(Utc::now())
        .bind(account_id)
        .fetch_optional(&self.store.writer)
        .await?
        .ok_or(DomainError::NotFoundAccountById)
    }

    pub async fn delete_account(&self, account_id: i64) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE accounts SET active = FALSE, modified_at = $1 \
             WHERE id = $2 AND active = TRUE",
        )
        .bind(Utc::now())
        .bind(account_id)
        .execute(&self.store.writer)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFoundAccountById);
        }
        info!(account_id, "account deactivated");
        Ok(())
    }

    pub async fn list_accounts(
        &self,
        page: PageRequest,
    ) -> Result<PageResult<Account>, DomainError> {
        let rows = sqlx::query_as::<_, Account>(
            "SELECT * FROM accounts WHERE active = TRUE ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE active = TRUE")
                .fetch_one(&self.store.reader)
                .await?;
        Ok(PageResult::new(rows, page, total))
    }

    // -- users --------------------------------------------------------------

    pub async fn add_user(
        &self,
        account_id: i64,
        request: &UserRequest,
    ) -> Result<User, DomainError> {
        request.validate()?;
        let now = Utc::now();
        let created = sqlx::query_as::<_, User>(
            "INSERT INTO users \
             (account_id, email, cell, first_name, last_name, verified, receives_updates, \
              created_at, modified_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7, $8) RETURNING *",
        )
        .bind(account_id)
        .bind(&request.email)
        .bind(&request.cell)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(request.receives_updates)
        .bind(now)
        .bind(now)
        .fetch_one(&self.store.writer)
        .await?;
        info!(account_id, user_id = created.id, "user created");
        Ok(created)
    }

    pub async fn fetch_user(&self, account_id: i64, user_id: i64) -> Result<User, DomainError> {
        let user =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND active = TRUE")
                .bind(user_id)
                .fetch_optional(&self.store.reader)
                .await?
                .ok_or(DomainError::NotFoundUserById)?;
        check_ownership(user.account_id, account_id, DomainError::NotOwnedUserById)?;
        Ok(user)
    }

    pub async fn update_user(
        &self,
        account_id: i64,
        user_id: i64,
        request: &UserRequest,
    ) -> Result<User, DomainError> {
        request.validate()?;
        self.fetch_user(account_id, user_id).await?;
        sqlx::query_as::<_, User>(
            "UPDATE users SET email = $1, cell = $2, first_name = $3, last_name = $4, \
             receives_updates = $5, modified_at = $6 \
             WHERE id = $7 AND active = TRUE RETURNING *",
        )
        .bind(&request.email)
        .bind(&request.cell)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(request.receives_updates)
        .bind(Utc::now())
        .bind(user_id)
        .fetch_optional(&self.store.writer)
        .await?
        .ok_or(DomainError::NotFoundUserById)
    }

    pub async fn delete_user(&self, account_id: i64, user_id: i64) -> Result<(), DomainError> {
        self.fetch_user(account_id, user_id).await?;
        sqlx::query(
            "UPDATE users SET active = FALSE, modified_at = $1 WHERE id = $2 AND active = TRUE",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.store.writer)
        .await?;
        info!(account_id, user_id, "user deactivated");
        Ok(())
    }

    pub async fn list_users(
        &self,
        account_id: i64,
        page: PageRequest,
    ) -> Result<PageResult<User>, DomainError> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE account_id = $1 AND active = TRUE \
             ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(account_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE account_id = $1 AND active = TRUE",
        )
        .bind(account_id)
        .fetch_one(&self.store.reader)
        .await?;
        Ok(PageResult::new(rows, page, total))
    }

    // -- addresses ----------------------------------------------------------

    pub async fn add_address(
        &self,
        account_id: i64,
        request: &AddressRequest,
    ) -> Result<Address, DomainError> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Address>(
            "INSERT INTO addresses \
             (account_id, name, address_line1, address_line2, city, state, postal_code, \
              country, created_at, modified_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
        )
        .bind(account_id)
        .bind(&request.name)
        .bind(&request.address_line1)
        .bind(&request.address_line2)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.postal_code)
        .bind(&request.country)
        .bind(now)
        .bind(now)
        .fetch_one(&self.store.writer)
        .await?;
        info!(account_id, address_id = created.id, "address created");
        Ok(created)
    }

    pub async fn fetch_address(
        &self,
        account_id: i64,
        address_id: i64,
    ) -> Result<Address, DomainError> {
        let address = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE id = $1 AND active = TRUE",
        )
        .bind(address_id)
        .fetch_optional(&self.store.reader)
        .await?
        .ok_or(DomainError::NotFoundAddressById)?;
        check_ownership(address.account_id, account_id, DomainError::NotOwnedAddressById)?;
        Ok(address)
    }

    pub async fn update_address(
        &self,
        account_id: i64,
        address_id: i64,
        request: &AddressRequest,
    ) -> Result<Address, DomainError> {
        self.fetch_address(account_id, address_id).await?;
        sqlx::query_as::<_, Address>(
            "UPDATE addresses SET name = $1, address_line1 = $2, address_line2 = $3, \
             city = $4, state = $5, postal_code = $6, country = $7, modified_at = $8 \
             WHERE id = $9 AND active = TRUE RETURNING *",
        )
        .bind(&request.name)
        .bind(&request.address_line1)
        .bind(&request.address_line2)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.postal_code)
        .bind(&request.country)
        .bind(Utc::now())
        .bind(address_id)
        .fetch_optional(&self.store.writer)
        .await?
        .ok_or(DomainError::NotFoundAddressById)
    }

    pub async fn delete_address(
        &self,
        account_id: i64,
        address_id: i64,
    ) -> Result<(), DomainError> {
        self.fetch_address(account_id, address_id).await?;
        sqlx::query(
            "UPDATE addresses SET active = FALSE, modified_at = $1 \
             WHERE id = $2 AND active = TRUE",
        )
        .bind(Utc::now())
        .bind(address_id)
        .execute(&self.store.writer)
        .await?;
        info!(account_id, address_id, "address deactivated");
        Ok(())
    }

    pub async fn list_addresses(
        &self,
        account_id: i64,
        page: PageRequest,
    ) -> Result<PageResult<Address>, DomainError> {
        let rows = sqlx::query_as::<_, Address>(
            "SELECT * FROM addresses WHERE account_id = $1 AND active = TRUE \
             ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(account_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.store.reader)
        .await?;
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM addresses WHERE account_id = $1 AND active = TRUE",
        )
        .bind(account_id)
        .fetch_one(&self.store.reader)
        .await?;
        Ok(PageResult::new(rows, page, total))
    }
}
