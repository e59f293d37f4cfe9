/// Pending user interaction on the page. Replaces blocking prompt/confirm
/// dialogs with explicit modes resolved by separate confirm/cancel requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Editing {
        id: i64,
    },
    ConfirmingClear,
}

impl Interaction {
    pub fn editing_id(&self) -> Option<i64> {
        match self {
            Self::Editing { id } => Some(*id),
            _ => None,
        }
    }

    pub fn is_confirming_clear(&self) -> bool {
        matches!(self, Self::ConfirmingClear)
    }

    pub fn begin_edit(&mut self, id: i64) {
        *self = Self::Editing { id };
    }

    pub fn request_clear(&mut self) {
        *self = Self::ConfirmingClear;
    }

    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Drops an edit in progress for an item that no longer exists.
    pub fn forget(&mut self, id: i64) {
        if self.editing_id() == Some(id) {
            *self = Self::Idle;
        }
    }
}
