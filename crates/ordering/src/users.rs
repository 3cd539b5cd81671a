//! User directory collaborator.
//!
//! Account management is out of this crate's hands; pricing only needs the
//! customer's birth date.

use async_trait::async_trait;
use chrono::NaiveDate;

use pronto_core::UserId;

use crate::db::RepositoryError;

/// Resolves user identifiers to profile data needed by ordering.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Birth date for the user, if the profile has one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup itself fails.
    async fn birth_date(&self, id: UserId) -> Result<Option<NaiveDate>, RepositoryError>;
}
