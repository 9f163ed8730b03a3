use crate::domain::Recipient;

/// Which recipient dialog is on screen. Exactly one state is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogState {
    #[default]
    Closed,
    AddOpen,
    EditOpen(Recipient),
}

/// Dialog state for one dashboard session. Every transition is allowed from
/// every state; gating a submission on validity is the caller's business.
#[derive(Debug, Clone, Default)]
pub struct RecipientDialogs {
    state: DialogState,
}

impl RecipientDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    #[tracing::instrument(name = "Opening the add recipient dialog", skip(self))]
    pub fn open_add_dialog(&mut self) {
        self.state = DialogState::AddOpen;
    }

    #[tracing::instrument(
        name = "Opening the edit recipient dialog",
        skip(self, recipient),
        fields(recipient_id = %recipient.recipient_id())
    )]
    pub fn open_edit_dialog(&mut self, recipient: Recipient) {
        self.state = DialogState::EditOpen(recipient);
    }

    #[tracing::instrument(name = "Closing recipient dialogs", skip(self))]
    pub fn close_dialogs(&mut self) {
        self.state = DialogState::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.state != DialogState::Closed
    }

    pub fn is_add_open(&self) -> bool {
        self.state == DialogState::AddOpen
    }

    pub fn is_edit_open(&self) -> bool {
        matches!(self.state, DialogState::EditOpen(_))
    }

    pub fn editing_recipient(&self) -> Option<&Recipient> {
        match &self.state {
            DialogState::EditOpen(recipient) => Some(recipient),
            _ => None,
        }
    }
}
