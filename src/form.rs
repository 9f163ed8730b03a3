//! The edit buffer behind the add and edit dialogs.
//!
//! Holding the buffer has no side effects: validation and persistence are run
//! by whoever owns the form, against [`RecipientForm::draft`].

use crate::domain::{RecipientDetails, RecipientDraft, RecipientField, UnknownField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientForm {
    draft: RecipientDraft,
}

impl Default for RecipientForm {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RecipientForm {
    /// Starts from `initial`, or from the blank add-dialog record.
    pub fn new(initial: Option<RecipientDraft>) -> Self {
        Self {
            draft: initial.unwrap_or_else(RecipientDraft::empty),
        }
    }

    pub fn draft(&self) -> &RecipientDraft {
        &self.draft
    }

    pub fn details(&self) -> &RecipientDetails {
        &self.draft.details
    }

    pub fn update_field(&mut self, field: RecipientField, value: impl Into<String>) {
        self.draft.details.set(field, Some(value.into()));
    }

    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownField> {
        let field = name.parse::<RecipientField>()?;
        self.update_field(field, value);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.draft = RecipientDraft::empty();
    }

    pub fn reset_to(&mut self, draft: RecipientDraft) {
        self.draft = draft;
    }
}
