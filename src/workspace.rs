use crate::{
    dialog::RecipientDialogs,
    domain::{
        Recipient, RecipientField, RecipientId, RecipientUpdate, User, ValidationErrors, validate,
    },
    form::RecipientForm,
    operations::{RecipientError, RecipientOperations},
};

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("there is no open recipient dialog to submit")]
    DialogClosed,
    #[error("the recipient has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Operation(#[from] RecipientError),
}

/// Everything one signed-in user's recipients page needs: the working set,
/// the dialogs and the edit buffer behind them.
pub struct RecipientWorkspace {
    user: User,
    operations: RecipientOperations,
    dialogs: RecipientDialogs,
    form: RecipientForm,
    recipients: Vec<Recipient>,
}

impl RecipientWorkspace {
    pub fn new(user: User, operations: RecipientOperations) -> Self {
        Self {
            user,
            operations,
            dialogs: RecipientDialogs::new(),
            form: RecipientForm::default(),
            recipients: Vec::new(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn dialogs(&self) -> &RecipientDialogs {
        &self.dialogs
    }

    pub fn form(&self) -> &RecipientForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RecipientForm {
        &mut self.form
    }

    /// Validation of whatever the buffer currently holds.
    pub fn errors(&self) -> ValidationErrors {
        validate(self.form.details())
    }

    #[tracing::instrument(
        name = "Refreshing the recipient working set",
        skip(self),
        fields(user_id = %self.user.user_id)
    )]
    pub async fn refresh(&mut self) -> Result<(), RecipientError> {
        self.recipients = self
            .operations
            .fetch_recipients(Some(self.user.user_id))
            .await?;
        Ok(())
    }

    pub fn open_add(&mut self) {
        self.dialogs.open_add_dialog();
        self.form.reset();
    }

    pub fn open_edit(&mut self, recipient: &Recipient) {
        self.dialogs.open_edit_dialog(recipient.clone());
        self.form.reset_to(recipient.into());
    }

    /// Closes the dialog and throws the buffer away. The stored record is
    /// untouched.
    pub fn cancel(&mut self) {
        self.dialogs.close_dialogs();
        self.form.reset();
    }

    /// Creates or updates depending on whether the buffer carries an id.
    /// On failure the dialog stays open and the buffer is kept for a retry.
    #[tracing::instrument(
        name = "Submitting the recipient dialog",
        skip(self),
        fields(user_id = %self.user.user_id)
    )]
    pub async fn submit(&mut self) -> Result<Recipient, SubmitError> {
        if !self.dialogs.is_open() {
            return Err(SubmitError::DialogClosed);
        }

        let errors = self.errors();
        if !errors.is_valid() {
            return Err(SubmitError::Invalid(errors));
        }

        let draft = self.form.draft().clone();
        let saved = match draft.recipient_id {
            None => {
                let created = self
                    .operations
                    .add_recipient(&self.user, draft.details)
                    .await?;
                self.recipients.push(created.clone());
                created
            }
            Some(recipient_id) => {
                let updated = self
                    .operations
                    .update_recipient(
                        &self.user,
                        RecipientUpdate {
                            recipient_id,
                            updated_recipient: draft.details,
                        },
                    )
                    .await?;
                if let Some(slot) = self
                    .recipients
                    .iter_mut()
                    .find(|recipient| recipient.recipient_id() == recipient_id)
                {
                    *slot = updated.clone();
                }
                updated
            }
        };

        self.dialogs.close_dialogs();
        self.form.reset();
        Ok(saved)
    }

    #[tracing::instrument(name = "Deleting a recipient from the working set", skip(self))]
    pub async fn delete(&mut self, recipient_id: RecipientId) -> Result<(), RecipientError> {
        self.operations.delete_recipient(recipient_id).await?;
        self.recipients
            .retain(|recipient| recipient.recipient_id() != recipient_id);
        Ok(())
    }

    /// Case-insensitive match on names and email, in working-set order.
    pub fn search(&self, query: &str) -> Vec<&Recipient> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.recipients.iter().collect();
        }
        const SEARCHED: [RecipientField; 3] = [
            RecipientField::FirstNames,
            RecipientField::LastNames,
            RecipientField::EmailAddress,
        ];
        self.recipients
            .iter()
            .filter(|recipient| {
                SEARCHED.iter().any(|field| {
                    recipient
                        .details
                        .get(*field)
                        .is_some_and(|value| value.to_lowercase().contains(&needle))
                })
            })
            .collect()
    }
}
