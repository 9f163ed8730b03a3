use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::{
    domain::{
        NewRecipient, Recipient, RecipientDetails, RecipientId, RecipientUpdate, User, UserId,
    },
    store::{RecipientStore, StoreError},
};

#[derive(thiserror::Error, Debug)]
pub enum RecipientError {
    /// Passed through unchanged, so the message is exactly the store's.
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("recipient operation was interrupted: {0}")]
    Interrupted(String),
}

impl RecipientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecipientError::Store(StoreError::NotFound(_)))
    }
}

/// One in-flight store call. Resolves exactly once; dropping it does not
/// abort the call, which keeps running on the runtime.
#[must_use = "the outcome of a store call is only observable by awaiting it"]
pub struct PendingOperation<T> {
    handle: JoinHandle<Result<T, StoreError>>,
}

impl<T: Send + 'static> PendingOperation<T> {
    fn spawn<F>(call: F) -> Self
    where
        F: Future<Output = Result<T, StoreError>> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(call.in_current_span()),
        }
    }

    fn resolved(value: T) -> Self {
        Self::spawn(async move { Ok(value) })
    }
}

impl<T> Future for PendingOperation<T> {
    type Output = Result<T, RecipientError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(outcome)) => {
                if let Err(e) = &outcome {
                    tracing::error!("{}", e);
                }
                Poll::Ready(outcome.map_err(RecipientError::from))
            }
            Poll::Ready(Err(join_error)) => {
                tracing::error!("{}", join_error);
                Poll::Ready(Err(RecipientError::Interrupted(join_error.to_string())))
            }
        }
    }
}

/// Turns store calls into awaitable single-outcome operations. No retries,
/// no validation and no deduplication happen here.
#[derive(Clone)]
pub struct RecipientOperations {
    store: Arc<dyn RecipientStore>,
}

impl RecipientOperations {
    pub fn new(store: Arc<dyn RecipientStore>) -> Self {
        Self { store }
    }

    /// Recipients owned by `user_id`, in the store's order. Without a user
    /// there is nothing to fetch and the result is empty.
    #[tracing::instrument(name = "Fetching recipients", skip(self))]
    pub fn fetch_recipients(&self, user_id: Option<UserId>) -> PendingOperation<Vec<Recipient>> {
        let Some(user_id) = user_id else {
            return PendingOperation::resolved(Vec::new());
        };
        let store = Arc::clone(&self.store);
        PendingOperation::spawn(async move { store.list(user_id).await })
    }

    #[tracing::instrument(
        name = "Adding a new recipient",
        skip(self, user, candidate),
        fields(user_id = %user.user_id)
    )]
    pub fn add_recipient(
        &self,
        user: &User,
        candidate: RecipientDetails,
    ) -> PendingOperation<Recipient> {
        let store = Arc::clone(&self.store);
        let new_recipient = NewRecipient {
            user_id: user.user_id,
            details: candidate,
        };
        PendingOperation::spawn(async move { store.insert(new_recipient).await })
    }

    #[tracing::instrument(
        name = "Updating a recipient",
        skip(self, user, update),
        fields(user_id = %user.user_id, recipient_id = %update.recipient_id)
    )]
    pub fn update_recipient(
        &self,
        user: &User,
        update: RecipientUpdate,
    ) -> PendingOperation<Recipient> {
        let store = Arc::clone(&self.store);
        let user_id = user.user_id;
        PendingOperation::spawn(async move {
            store
                .update(user_id, update.recipient_id, update.updated_recipient)
                .await
        })
    }

    #[tracing::instrument(name = "Deleting a recipient", skip(self))]
    pub fn delete_recipient(&self, recipient_id: RecipientId) -> PendingOperation<()> {
        let store = Arc::clone(&self.store);
        PendingOperation::spawn(async move { store.delete(recipient_id).await })
    }
}
