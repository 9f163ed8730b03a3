mod new_recipient;
mod recipient;
mod recipient_email;
mod recipient_name;
mod validation;

pub use new_recipient::NewRecipient;
pub use recipient::{
    DEFAULT_COUNTRY_ISO3, Recipient, RecipientDetails, RecipientDraft, RecipientField,
    RecipientId, RecipientUpdate, UnknownField, User, UserId,
};
pub use recipient_email::RecipientEmail;
pub use recipient_name::RecipientName;
pub use validation::{ValidationErrors, is_valid, validate};
