#![forbid(unsafe_code)]

//! Pill (tag/chip) input control core.
//!
//! A user types free text into an editable field, confirms an entry, and it
//! becomes a removable, keyboard-navigable token ("pill") alongside other
//! tokens, while the field keeps accepting input. Each pill carries a
//! human-visible value and an optional hidden key, produced by an injectable
//! resolver and gated by an injectable validator.
//!
//! The crate is host-agnostic: rendering sits behind the
//! [`PillRenderer`](render::PillRenderer) trait, and the host delivers
//! [`Event`](pillbox_core::Event)s and applies the returned
//! [`Dispatch`](pillbox_core::Dispatch) flags (default suppression,
//! propagation stop, platform focus moves).
//!
//! # Example
//!
//! ```
//! use pillbox_input::{KeyResolution, NoopRenderer, PillInput};
//!
//! let mut pills: PillInput<u64, _> = PillInput::new(NoopRenderer);
//! pills.on_pill_create(|value, _reject| {
//!     if value == "Alice" {
//!         KeyResolution::Key(42)
//!     } else {
//!         KeyResolution::NoKey
//!     }
//! });
//! pills.validate(|value, _key, reject| {
//!     if value.len() < 2 {
//!         reject.reject();
//!     }
//! });
//!
//! assert!(pills.append("Alice", None).is_some());
//! assert!(pills.append("A", None).is_none());
//! assert_eq!(pills.values(), ["Alice"]);
//! assert_eq!(pills.keys(), [Some(42)]);
//! ```

pub mod cache;
pub mod collection;
pub mod controller;
pub mod field;
pub mod focus;
pub mod pill;
pub mod pipeline;
pub mod render;
pub mod testing;

pub use cache::DerivedViews;
pub use collection::{ModificationClock, PillCollection, PillRecord};
pub use controller::PillInput;
pub use field::TextField;
pub use focus::FocusTarget;
pub use pill::{KeyResolution, PillData, Rejection};
pub use pipeline::{Resolver, ValidationPipeline, Validator};
pub use render::{NoopRenderer, PillRenderer, Slot};

// The boundary types hosts need alongside the control.
pub use pillbox_core::{Dispatch, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PillId, PointerEvent};
