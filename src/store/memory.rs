use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::{RecipientStore, StoreError};
use crate::domain::{
    DEFAULT_COUNTRY_ISO3, NewRecipient, Recipient, RecipientDetails, RecipientId, UserId,
};

#[derive(Default)]
struct Rows {
    last_id: i64,
    recipients: Vec<Recipient>,
}

/// Process-local store, for running the dashboard without a database.
/// Ids are handed out sequentially starting at 1.
#[derive(Default)]
pub struct InMemoryRecipientStore {
    rows: Mutex<Rows>,
}

impl InMemoryRecipientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipientStore for InMemoryRecipientStore {
    async fn list(&self, user_id: UserId) -> Result<Vec<Recipient>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .recipients
            .iter()
            .filter(|recipient| recipient.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, new_recipient: NewRecipient) -> Result<Recipient, StoreError> {
        let mut rows = self.rows.lock().await;
        rows.last_id += 1;
        let now = Utc::now();
        let mut details = new_recipient.details;
        details
            .country_iso3
            .get_or_insert_with(|| DEFAULT_COUNTRY_ISO3.to_owned());
        let recipient = Recipient::new(
            RecipientId(rows.last_id),
            new_recipient.user_id,
            details,
            now,
            now,
        );
        rows.recipients.push(recipient.clone());
        Ok(recipient)
    }

    async fn update(
        &self,
        user_id: UserId,
        recipient_id: RecipientId,
        changes: RecipientDetails,
    ) -> Result<Recipient, StoreError> {
        let mut rows = self.rows.lock().await;
        let recipient = rows
            .recipients
            .iter_mut()
            .find(|recipient| {
                recipient.recipient_id() == recipient_id && recipient.user_id == user_id
            })
            .ok_or(StoreError::NotFound(recipient_id))?;

        recipient.details.apply(&changes);
        recipient.updated_at = Utc::now();
        Ok(recipient.clone())
    }

    async fn delete(&self, recipient_id: RecipientId) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        let position = rows
            .recipients
            .iter()
            .position(|recipient| recipient.recipient_id() == recipient_id)
            .ok_or(StoreError::NotFound(recipient_id))?;
        rows.recipients.remove(position);
        Ok(())
    }
}
