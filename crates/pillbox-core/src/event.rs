#![forbid(unsafe_code)]

//! Canonical input/event types for the pill control.
//!
//! The hosting environment (a document, a TUI runtime, a test harness) owns
//! event delivery: it translates its native input into these types, hands
//! them to the control, and applies the returned [`Dispatch`] flags to its
//! own dispatch mechanism. All events derive `Clone`, `PartialEq`, and `Eq`
//! for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish
//!   press from repeat.
//! - `Modifiers` use bitflags for easy combination.
//! - Pointer events are pre-resolved by the host: hit-testing which pill (or
//!   which affordance) was pressed is a rendering concern, so the host
//!   reports the target, not coordinates.

use bitflags::bitflags;

use crate::id::PillId;

/// Canonical input event.
///
/// Every event the control consumes from its host, scoped to the control's
/// own container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event, delivered while the control has focus (either on
    /// the text field or on one of the pills).
    Key(KeyEvent),

    /// A pointer event, pre-resolved to its target by the host.
    Pointer(PointerEvent),

    /// The rejection-feedback animation finished.
    ///
    /// Purely cosmetic: the control forwards this to its renderer so the
    /// transient "rejected" affordance can be cleared.
    FeedbackEnded,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the control recognizes.
///
/// Hosts map their native key identifiers into these; anything that does not
/// map can simply be dropped before reaching the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Backspace key.
    Backspace,

    /// Delete key.
    Delete,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Home key.
    Home,

    /// End key.
    End,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event, already resolved to its logical target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// The dismiss affordance ("×") of a pill was pressed.
    Dismiss(PillId),

    /// The body of a pill was pressed.
    ///
    /// Hosts whose platform moves focus natively on press report it here so
    /// the control's focus state stays in sync.
    Pill(PillId),

    /// Empty container space (not a pill) was pressed.
    Container,
}

bitflags! {
    /// What the host must do with the event after the control handled it.
    ///
    /// This generalizes a plain `handled: bool` return: embedded in a
    /// document, the control needs to suppress ambient behavior (a line
    /// break on Enter, a navigate-back on Backspace) independently of
    /// whether sibling handlers should still run.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Dispatch: u8 {
        /// Suppress the platform's default action for this event.
        const PREVENT_DEFAULT  = 0b0001;
        /// Stop the event from propagating to enclosing handlers.
        const STOP_PROPAGATION = 0b0010;
        /// Control state changed; the host should re-render.
        const CHANGED          = 0b0100;
        /// The focused target changed; the host should apply platform focus
        /// to the control's current focus target.
        const FOCUS_CHANGED    = 0b1000;
    }
}

impl Dispatch {
    /// Whether the control did anything with the event at all.
    #[must_use]
    pub const fn is_handled(&self) -> bool {
        !self.is_empty()
    }
}
