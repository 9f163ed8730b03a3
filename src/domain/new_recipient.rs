use super::recipient::{RecipientDetails, UserId};

/// A recipient on its way into the store: it has an owner but no id yet.
#[derive(Debug, Clone)]
pub struct NewRecipient {
    pub user_id: UserId,
    pub details: RecipientDetails,
}
