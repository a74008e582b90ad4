#![forbid(unsafe_code)]

//! Test support: a renderer that records every call.
//!
//! Kept out of `#[cfg(test)]` so integration tests and embedding hosts can
//! use it to verify their own wiring.

use pillbox_core::PillId;

use crate::render::{PillRenderer, Slot};

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// A pill's visual unit was created.
    Mounted {
        /// The pill's id.
        id: PillId,
        /// The visible value at mount time.
        value: String,
        /// Where it was inserted.
        slot: Slot,
    },
    /// A pill's visual unit was torn down.
    Unmounted {
        /// The pill's id.
        id: PillId,
    },
    /// The rejection affordance was shown.
    Rejected,
    /// The rejection affordance was cleared.
    RejectionCleared,
}

/// A [`PillRenderer`] that records calls and tracks display order.
///
/// The display-order tracking mirrors what a real host's container would
/// show, so tests can assert that collection order and display order never
/// drift apart.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Every call, in order.
    pub ops: Vec<RenderOp>,
    display: Vec<(PillId, String)>,
}

impl RecordingRenderer {
    /// A fresh renderer with nothing recorded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids currently displayed, in display order.
    #[must_use]
    pub fn displayed_ids(&self) -> Vec<PillId> {
        self.display.iter().map(|(id, _)| *id).collect()
    }

    /// Visible values currently displayed, in display order.
    #[must_use]
    pub fn displayed_values(&self) -> Vec<&str> {
        self.display.iter().map(|(_, value)| value.as_str()).collect()
    }

    /// How many times the rejection affordance was shown.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, RenderOp::Rejected))
            .count()
    }
}

impl PillRenderer for RecordingRenderer {
    type Handle = PillId;

    fn mount(&mut self, id: PillId, value: &str, slot: Slot) -> Self::Handle {
        self.ops.push(RenderOp::Mounted {
            id,
            value: value.to_string(),
            slot,
        });
        match slot {
            Slot::Head => self.display.insert(0, (id, value.to_string())),
            Slot::Tail => self.display.push((id, value.to_string())),
        }
        id
    }

    fn unmount(&mut self, handle: Self::Handle) {
        self.ops.push(RenderOp::Unmounted { id: handle });
        self.display.retain(|(id, _)| *id != handle);
    }

    fn signal_rejection(&mut self) {
        self.ops.push(RenderOp::Rejected);
    }

    fn rejection_cleared(&mut self) {
        self.ops.push(RenderOp::RejectionCleared);
    }
}
