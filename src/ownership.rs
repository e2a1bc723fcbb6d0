//! Resource-ownership validation.
//!
//! Every account-scoped resource is loaded by its own primary key first, so
//! its true owning account is known, and only then compared against the
//! caller. A mismatch is a hard deny with not-found semantics; the role claim
//! is never consulted.

use crate::error::DomainError;

/// Allow the operation only when the resource belongs to the principal's
/// account. On mismatch the supplied `deny` error is returned, which maps to
/// the same wire response as a nonexistent resource.
pub fn check_ownership(
    resource_account_id: i64,
    principal_account_id: i64,
    deny: DomainError,
) -> Result<(), DomainError> {
    if resource_account_id == principal_account_id {
        Ok(())
    } else {
        Err(deny)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_accounts_are_allowed() {
        assert!(check_ownership(5, 5, DomainError::NotOwnedDeviceById).is_ok());
    }

    #[test]
    fn mismatched_accounts_are_denied_with_the_given_error() {
        let err = check_ownership(5, 6, DomainError::NotOwnedDeviceById).unwrap_err();
        assert!(matches!(err, DomainError::NotOwnedDeviceById));

        let err = check_ownership(1, 2, DomainError::NotOwnedAddressById).unwrap_err();
        assert!(matches!(err, DomainError::NotOwnedAddressById));
    }
}
