#![forbid(unsafe_code)]

//! Render seam.
//!
//! The control never draws anything. A [`PillRenderer`] turns a confirmed
//! pill into a focusable, removable visual unit and tears it down again; the
//! returned handle is owned by the pill's record and consumed exactly once,
//! on removal. Rejection feedback (typically a shake animation on the input
//! surface) is a renderer concern too: the control signals it, the host
//! reports when the animation ends, and the control forwards that back.

use pillbox_core::PillId;

/// Where a new pill is inserted, in display terms.
///
/// `Tail` sits immediately before the text-input slot; `Head` is the start
/// of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Insert at the start of the sequence.
    Head,
    /// Insert at the end of the sequence, before the input.
    Tail,
}

/// External collaborator that displays pills.
pub trait PillRenderer {
    /// Whatever the renderer needs to find the visual unit again.
    type Handle;

    /// Display a newly accepted pill at the given slot.
    fn mount(&mut self, id: PillId, value: &str, slot: Slot) -> Self::Handle;

    /// Remove a pill's visual unit. The handle is consumed.
    fn unmount(&mut self, handle: Self::Handle);

    /// Show the transient "creation rejected" affordance on the input
    /// surface.
    fn signal_rejection(&mut self);

    /// The rejection affordance's feedback animation completed; clear it.
    fn rejection_cleared(&mut self) {}
}

/// Renderer that displays nothing.
///
/// For headless use of the collection logic (and for hosts that drive their
/// display entirely from `data()` snapshots).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl PillRenderer for NoopRenderer {
    type Handle = ();

    fn mount(&mut self, _id: PillId, _value: &str, _slot: Slot) -> Self::Handle {}

    fn unmount(&mut self, _handle: Self::Handle) {}

    fn signal_rejection(&mut self) {}
}
