#![forbid(unsafe_code)]

//! Boundary types for the Pillbox input control.
//!
//! This crate defines everything the control shares with its host: canonical
//! input events and key codes, the [`Dispatch`](event::Dispatch) flags a
//! handler returns, opaque pill identifiers, and the logging facade. It is
//! deliberately free of any rendering or state-machine logic so hosts and
//! renderers can depend on it without pulling in the control itself.

pub mod event;
pub mod id;
pub mod logging;

pub use event::{Dispatch, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent};
pub use id::{IdGen, PillId};

// Re-export tracing macros at crate root for ergonomic use. Without the
// feature, the `#[macro_export]` no-ops in `logging` land here instead.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
