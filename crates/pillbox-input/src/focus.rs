#![forbid(unsafe_code)]

//! Focus bookkeeping.
//!
//! The control holds the focused target explicitly and updates it on every
//! transition, instead of re-deriving it from render state. The host applies
//! platform focus whenever a dispatch reports
//! [`FOCUS_CHANGED`](pillbox_core::Dispatch::FOCUS_CHANGED).

use pillbox_core::PillId;

/// What currently holds keyboard focus inside the control.
///
/// The text field is the terminal element after the last pill, so arrowing
/// right off the final pill lands on `Field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FocusTarget {
    /// The editable text field.
    #[default]
    Field,
    /// A specific pill.
    Pill(PillId),
}

impl FocusTarget {
    /// Whether the field holds focus.
    #[must_use]
    pub const fn is_field(&self) -> bool {
        matches!(self, Self::Field)
    }

    /// The focused pill's id, if a pill holds focus.
    #[must_use]
    pub const fn pill(&self) -> Option<PillId> {
        match self {
            Self::Pill(id) => Some(*id),
            Self::Field => None,
        }
    }
}
