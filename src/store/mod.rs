mod memory;
mod postgres;

pub use memory::InMemoryRecipientStore;
pub use postgres::PgRecipientStore;

use async_trait::async_trait;

use crate::domain::{NewRecipient, Recipient, RecipientDetails, RecipientId, UserId};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("recipient {0} was not found")]
    NotFound(RecipientId),
    /// The store refused the write; the message is the store's own.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Remote persistence of recipient records. Each call either succeeds once or
/// fails once; implementations never retry.
#[async_trait]
pub trait RecipientStore: Send + Sync {
    /// Recipients owned by `user_id`, ordered by ascending id.
    async fn list(&self, user_id: UserId) -> Result<Vec<Recipient>, StoreError>;

    async fn insert(&self, new_recipient: NewRecipient) -> Result<Recipient, StoreError>;

    /// Overwrites the attributes that are `Some` in `changes`, scoped to the owner.
    async fn update(
        &self,
        user_id: UserId,
        recipient_id: RecipientId,
        changes: RecipientDetails,
    ) -> Result<Recipient, StoreError>;

    async fn delete(&self, recipient_id: RecipientId) -> Result<(), StoreError>;
}
