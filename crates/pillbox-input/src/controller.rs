#![forbid(unsafe_code)]

//! The public facade: wiring and the interaction state machine.
//!
//! [`PillInput`] owns the collection, the text field, the derived-view
//! caches, and the focused target, and interprets host events against them.
//! Keyboard handling depends on where focus sits:
//!
//! - **Field focused**: Enter confirms the trimmed text as a new pill
//!   (clearing the field only on acceptance), Backspace on an empty field
//!   pops the last pill, Left at offset 0 moves focus onto the last pill,
//!   and everything else is ordinary text editing.
//! - **Pill focused**: Left/Right walk the sequence (the field is the
//!   terminal element after the last pill), Backspace removes the focused
//!   pill and lands on its captured successor.
//!
//! All handling is synchronous and run-to-completion: each event observes
//! the fully settled state left by the previous one.

use pillbox_core::{Dispatch, Event, KeyCode, KeyEvent, KeyEventKind, PillId, PointerEvent};

use crate::cache::DerivedViews;
use crate::collection::{PillCollection, PillRecord};
use crate::field::TextField;
use crate::focus::FocusTarget;
use crate::pill::{KeyResolution, PillData, Rejection};
use crate::render::PillRenderer;

/// The pill input control.
///
/// Generic over the hidden-key type `K` and the renderer `R`. One instance
/// is fully independent of any other; all state lives in its fields.
pub struct PillInput<K, R: PillRenderer> {
    collection: PillCollection<K, R>,
    field: TextField,
    views: DerivedViews<K>,
    focus: FocusTarget,
}

impl<K, R: PillRenderer> PillInput<K, R> {
    /// An empty control displaying through `renderer`, with focus on the
    /// field.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            collection: PillCollection::new(renderer),
            field: TextField::new(),
            views: DerivedViews::new(),
            focus: FocusTarget::Field,
        }
    }

    /// Register the key-resolution callback (builder).
    #[must_use]
    pub fn with_resolver(
        mut self,
        resolver: impl FnMut(&str, &mut Rejection) -> KeyResolution<K> + 'static,
    ) -> Self {
        self.on_pill_create(resolver);
        self
    }

    /// Register the validator callback (builder).
    #[must_use]
    pub fn with_validator(
        mut self,
        validator: impl FnMut(&str, Option<&K>, &mut Rejection) + 'static,
    ) -> Self {
        self.validate(validator);
        self
    }

    /// Register the key-resolution callback, replacing any previous one.
    pub fn on_pill_create(
        &mut self,
        resolver: impl FnMut(&str, &mut Rejection) -> KeyResolution<K> + 'static,
    ) {
        self.collection.on_pill_create(resolver);
    }

    /// Register the validator callback, replacing any previous one.
    pub fn validate(&mut self, validator: impl FnMut(&str, Option<&K>, &mut Rejection) + 'static) {
        self.collection.validate(validator);
    }

    // --- Collection operations ---

    /// Create a pill at the end of the sequence. `None` means rejected.
    pub fn append(&mut self, value: &str, key: Option<K>) -> Option<PillId> {
        self.collection.append(value, key)
    }

    /// Create a pill at the start of the sequence. `None` means rejected.
    pub fn prepend(&mut self, value: &str, key: Option<K>) -> Option<PillId> {
        self.collection.prepend(value, key)
    }

    /// Remove a pill by id; unknown ids are a silent no-op.
    ///
    /// If the removed pill held focus, focus falls back to the field.
    pub fn remove(&mut self, id: PillId) -> Option<PillData<K>> {
        let removed = self.collection.remove(id);
        if removed.is_some() && self.focus == FocusTarget::Pill(id) {
            self.focus = FocusTarget::Field;
        }
        removed
    }

    /// Remove every pill and clear the text field.
    ///
    /// Idempotent: safe on an already-empty control.
    pub fn clear(&mut self) {
        self.collection.remove_all();
        self.field.clear();
        self.focus = FocusTarget::Field;
    }

    // --- Read views ---

    /// Snapshot of every pill's data, in order. Not cached.
    pub fn data(&self) -> Vec<PillData<K>>
    where
        K: Clone,
    {
        self.collection.data()
    }

    /// Every pill's key, in order, one entry per pill (`None` where a pill
    /// has no key). Cached; rebuilt only after a mutation.
    pub fn keys(&mut self) -> &[Option<K>]
    where
        K: Clone,
    {
        let stamp = self.collection.clock().stamp();
        let records = self.collection.records();
        self.views
            .keys(stamp, || records.iter().map(|r| r.key().cloned()).collect())
    }

    /// Every pill's visible value, in order. Cached; rebuilt only after a
    /// mutation.
    pub fn values(&mut self) -> &[String] {
        let stamp = self.collection.clock().stamp();
        let records = self.collection.records();
        self.views
            .values(stamp, || records.iter().map(|r| r.value().to_string()).collect())
    }

    /// Number of live pills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Whether the control has no pills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Look up a live pill.
    #[must_use]
    pub fn pill(&self, id: PillId) -> Option<&PillRecord<K, R::Handle>> {
        self.collection.get(id)
    }

    /// The current focus target.
    #[must_use]
    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    /// The text field.
    #[must_use]
    pub fn field(&self) -> &TextField {
        &self.field
    }

    /// The text field, mutably (e.g. to seed it programmatically).
    pub fn field_mut(&mut self) -> &mut TextField {
        &mut self.field
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        self.collection.renderer()
    }

    /// The renderer, mutably.
    pub fn renderer_mut(&mut self) -> &mut R {
        self.collection.renderer_mut()
    }

    // --- Event handling ---

    /// Interpret one host event.
    ///
    /// Returns the [`Dispatch`] flags the host must apply to its own event
    /// mechanism (default suppression, propagation stop, platform focus).
    pub fn handle_event(&mut self, event: &Event) -> Dispatch {
        let _span = pillbox_core::debug_span!("pill_input_event", focus = ?self.focus).entered();

        match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                match self.focus {
                    FocusTarget::Field => self.handle_field_key(key),
                    FocusTarget::Pill(id) => self.handle_pill_key(id, key),
                }
            }
            Event::Key(_) => Dispatch::empty(),
            Event::Pointer(pointer) => self.handle_pointer(*pointer),
            Event::FeedbackEnded => {
                // Cosmetic only; the renderer owns the affordance.
                self.collection.renderer_mut().rejection_cleared();
                Dispatch::empty()
            }
        }
    }

    fn handle_field_key(&mut self, key: &KeyEvent) -> Dispatch {
        match key.code {
            KeyCode::Enter => {
                // Enter never produces a line break, whatever the field
                // holds.
                let mut dispatch = Dispatch::PREVENT_DEFAULT;
                let text = self.field.trimmed().to_string();
                if !text.is_empty() && self.append(&text, None).is_some() {
                    self.field.clear();
                    dispatch |= Dispatch::STOP_PROPAGATION | Dispatch::CHANGED;
                }
                // On rejection the field is left as typed: it may be a typo
                // the user wants to fix.
                dispatch
            }
            KeyCode::Backspace if self.field.is_empty() => {
                let removed = self.collection.remove_last();
                let mut dispatch = Dispatch::PREVENT_DEFAULT;
                if removed.is_some() {
                    dispatch |= Dispatch::CHANGED;
                }
                dispatch
            }
            KeyCode::Left if self.field.caret_at_start() => match self.collection.last_id() {
                Some(last) => self.set_focus(FocusTarget::Pill(last)),
                None => Dispatch::empty(),
            },
            _ => {
                if self.field.handle_key(key) {
                    Dispatch::CHANGED
                } else {
                    Dispatch::empty()
                }
            }
        }
    }

    fn handle_pill_key(&mut self, id: PillId, key: &KeyEvent) -> Dispatch {
        match key.code {
            KeyCode::Left => match self.collection.predecessor_of(id) {
                Some(prev) => self.set_focus(FocusTarget::Pill(prev)),
                // The first pill has no predecessor slot; stay put.
                None => Dispatch::empty(),
            },
            KeyCode::Right => {
                let target = self
                    .collection
                    .successor_of(id)
                    .map(FocusTarget::Pill)
                    .unwrap_or(FocusTarget::Field);
                self.set_focus(target)
            }
            KeyCode::Backspace => {
                // Capture the landing target before the removal shifts the
                // sequence.
                let target = self
                    .collection
                    .successor_of(id)
                    .map(FocusTarget::Pill)
                    .unwrap_or(FocusTarget::Field);
                let removed = self.collection.remove(id);
                let mut dispatch = Dispatch::PREVENT_DEFAULT | self.set_focus(target);
                if removed.is_some() {
                    dispatch |= Dispatch::CHANGED;
                }
                dispatch
            }
            _ => Dispatch::empty(),
        }
    }

    fn handle_pointer(&mut self, pointer: PointerEvent) -> Dispatch {
        match pointer {
            PointerEvent::Dismiss(id) => {
                let target = self
                    .collection
                    .successor_of(id)
                    .map(FocusTarget::Pill)
                    .unwrap_or(FocusTarget::Field);
                let removed = self.collection.remove(id);
                let mut dispatch = self.set_focus(target);
                if removed.is_some() {
                    dispatch |= Dispatch::CHANGED;
                }
                dispatch
            }
            PointerEvent::Pill(id) => {
                if self.collection.get(id).is_some() {
                    self.set_focus(FocusTarget::Pill(id))
                } else {
                    Dispatch::empty()
                }
            }
            PointerEvent::Container => self.set_focus(FocusTarget::Field),
        }
    }

    fn set_focus(&mut self, target: FocusTarget) -> Dispatch {
        if self.focus == target {
            return Dispatch::empty();
        }
        self.focus = target;
        Dispatch::FOCUS_CHANGED
    }
}

impl<K, R: PillRenderer> std::fmt::Debug for PillInput<K, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillInput")
            .field("collection", &self.collection)
            .field("field", &self.field)
            .field("focus", &self.focus)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRenderer;
    use pillbox_core::Modifiers;

    fn control() -> PillInput<u32, RecordingRenderer> {
        PillInput::new(RecordingRenderer::new())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn type_text(control: &mut PillInput<u32, RecordingRenderer>, text: &str) {
        for c in text.chars() {
            control.handle_event(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn typing_goes_into_the_field() {
        let mut pills = control();
        type_text(&mut pills, "hi");
        assert_eq!(pills.field().value(), "hi");
        assert!(pills.is_empty());
    }

    #[test]
    fn enter_confirms_and_clears_field() {
        let mut pills = control();
        type_text(&mut pills, "Alice");
        let dispatch = pills.handle_event(&key(KeyCode::Enter));

        assert!(dispatch.contains(Dispatch::PREVENT_DEFAULT));
        assert!(dispatch.contains(Dispatch::STOP_PROPAGATION));
        assert!(dispatch.contains(Dispatch::CHANGED));
        assert_eq!(pills.values(), ["Alice"]);
        assert!(pills.field().is_empty());
    }

    #[test]
    fn enter_trims_before_confirming() {
        let mut pills = control();
        type_text(&mut pills, "  Alice  ");
        pills.handle_event(&key(KeyCode::Enter));
        assert_eq!(pills.values(), ["Alice"]);
    }

    #[test]
    fn enter_on_blank_field_only_suppresses_default() {
        let mut pills = control();
        type_text(&mut pills, "   ");
        let dispatch = pills.handle_event(&key(KeyCode::Enter));

        assert_eq!(dispatch, Dispatch::PREVENT_DEFAULT);
        assert!(pills.is_empty());
        // The whitespace stays; nothing was confirmed.
        assert_eq!(pills.field().value(), "   ");
    }

    #[test]
    fn rejected_enter_keeps_the_field_text() {
        let mut pills = control().with_validator(|value, _key, reject| {
            if value.len() < 2 {
                reject.reject();
            }
        });
        type_text(&mut pills, "A");
        let dispatch = pills.handle_event(&key(KeyCode::Enter));

        assert!(dispatch.contains(Dispatch::PREVENT_DEFAULT));
        assert!(!dispatch.contains(Dispatch::STOP_PROPAGATION));
        assert!(pills.is_empty());
        assert_eq!(pills.field().value(), "A");
        assert_eq!(pills.renderer().rejections(), 1);
    }

    #[test]
    fn backspace_on_empty_field_pops_pills_then_noops() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        pills.append("b", None).unwrap();

        let dispatch = pills.handle_event(&key(KeyCode::Backspace));
        assert!(dispatch.contains(Dispatch::CHANGED));
        assert_eq!(pills.values(), ["a"]);

        pills.handle_event(&key(KeyCode::Backspace));
        assert!(pills.is_empty());

        // Further backspaces are suppressed no-ops, not errors.
        let dispatch = pills.handle_event(&key(KeyCode::Backspace));
        assert_eq!(dispatch, Dispatch::PREVENT_DEFAULT);
        assert!(pills.is_empty());
    }

    #[test]
    fn backspace_with_text_edits_the_field() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        type_text(&mut pills, "x");

        let dispatch = pills.handle_event(&key(KeyCode::Backspace));
        assert_eq!(dispatch, Dispatch::CHANGED);
        assert!(pills.field().is_empty());
        assert_eq!(pills.len(), 1);
    }

    #[test]
    fn left_at_offset_zero_focuses_last_pill() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        let b = pills.append("b", None).unwrap();

        let dispatch = pills.handle_event(&key(KeyCode::Left));
        assert!(dispatch.contains(Dispatch::FOCUS_CHANGED));
        assert_eq!(pills.focus(), FocusTarget::Pill(b));

        // Walk left to the first pill; a further Left is a no-op.
        pills.handle_event(&key(KeyCode::Left));
        assert_eq!(pills.focus(), FocusTarget::Pill(a));
        let dispatch = pills.handle_event(&key(KeyCode::Left));
        assert!(!dispatch.is_handled());
        assert_eq!(pills.focus(), FocusTarget::Pill(a));
    }

    #[test]
    fn left_with_no_pills_is_noop() {
        let mut pills = control();
        let dispatch = pills.handle_event(&key(KeyCode::Left));
        assert!(!dispatch.is_handled());
        assert!(pills.focus().is_field());
    }

    #[test]
    fn left_mid_text_moves_the_caret_not_focus() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        type_text(&mut pills, "xy");

        let dispatch = pills.handle_event(&key(KeyCode::Left));
        assert_eq!(dispatch, Dispatch::CHANGED);
        assert!(pills.focus().is_field());
        assert_eq!(pills.field().cursor(), 1);
    }

    #[test]
    fn right_walks_back_to_the_field() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        let b = pills.append("b", None).unwrap();

        pills.handle_event(&key(KeyCode::Left));
        pills.handle_event(&key(KeyCode::Left));
        assert_eq!(pills.focus(), FocusTarget::Pill(a));

        pills.handle_event(&key(KeyCode::Right));
        assert_eq!(pills.focus(), FocusTarget::Pill(b));
        let dispatch = pills.handle_event(&key(KeyCode::Right));
        assert!(dispatch.contains(Dispatch::FOCUS_CHANGED));
        assert!(pills.focus().is_field());
    }

    #[test]
    fn backspace_on_focused_pill_lands_on_successor() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        let b = pills.append("b", None).unwrap();

        // Focus `a`.
        pills.handle_event(&key(KeyCode::Left));
        pills.handle_event(&key(KeyCode::Left));
        assert_eq!(pills.focus(), FocusTarget::Pill(a));

        let dispatch = pills.handle_event(&key(KeyCode::Backspace));
        assert!(dispatch.contains(Dispatch::PREVENT_DEFAULT));
        assert!(dispatch.contains(Dispatch::CHANGED));
        assert!(dispatch.contains(Dispatch::FOCUS_CHANGED));
        assert_eq!(pills.focus(), FocusTarget::Pill(b));
        assert_eq!(pills.values(), ["b"]);
    }

    #[test]
    fn backspace_on_last_pill_lands_on_the_field() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        pills.handle_event(&key(KeyCode::Left));

        pills.handle_event(&key(KeyCode::Backspace));
        assert!(pills.focus().is_field());
        assert!(pills.is_empty());
    }

    #[test]
    fn dismiss_click_removes_and_focuses_successor() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        let b = pills.append("b", None).unwrap();

        let dispatch = pills.handle_event(&Event::Pointer(PointerEvent::Dismiss(a)));
        assert!(dispatch.contains(Dispatch::CHANGED));
        assert_eq!(pills.focus(), FocusTarget::Pill(b));
        assert_eq!(pills.values(), ["b"]);
    }

    #[test]
    fn dismiss_click_on_unknown_id_is_noop() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        let dispatch = pills.handle_event(&Event::Pointer(PointerEvent::Dismiss(PillId::from_raw(999))));
        assert!(!dispatch.contains(Dispatch::CHANGED));
        assert_eq!(pills.len(), 1);
    }

    #[test]
    fn container_click_focuses_the_field() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        pills.handle_event(&key(KeyCode::Left));
        assert!(!pills.focus().is_field());

        let dispatch = pills.handle_event(&Event::Pointer(PointerEvent::Container));
        assert!(dispatch.contains(Dispatch::FOCUS_CHANGED));
        assert!(pills.focus().is_field());
    }

    #[test]
    fn pill_press_syncs_focus() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        let dispatch = pills.handle_event(&Event::Pointer(PointerEvent::Pill(a)));
        assert_eq!(pills.focus(), FocusTarget::Pill(a));
        assert!(dispatch.contains(Dispatch::FOCUS_CHANGED));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut pills = control();
        type_text(&mut pills, "x");
        let release = Event::Key(KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release));
        let dispatch = pills.handle_event(&release);
        assert!(!dispatch.is_handled());
        assert!(pills.is_empty());
    }

    #[test]
    fn feedback_end_is_forwarded_to_the_renderer() {
        let mut pills = control().with_validator(|_value, _key, reject| reject.reject());
        type_text(&mut pills, "x");
        pills.handle_event(&key(KeyCode::Enter));
        pills.handle_event(&Event::FeedbackEnded);

        use crate::testing::RenderOp;
        assert_eq!(pills.renderer().ops.last(), Some(&RenderOp::RejectionCleared));
    }

    #[test]
    fn programmatic_remove_of_focused_pill_falls_back_to_field() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        pills.handle_event(&key(KeyCode::Left));
        assert_eq!(pills.focus(), FocusTarget::Pill(a));

        pills.remove(a).unwrap();
        assert!(pills.focus().is_field());
    }

    #[test]
    fn clear_resets_everything() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        type_text(&mut pills, "junk");
        pills.handle_event(&key(KeyCode::Left));

        pills.clear();
        assert!(pills.is_empty());
        assert!(pills.field().is_empty());
        assert!(pills.focus().is_field());

        // Idempotent on empty.
        pills.clear();
        assert!(pills.is_empty());
    }

    #[test]
    fn keys_on_pill_while_pill_focused_do_not_edit_field() {
        let mut pills = control();
        pills.append("a", None).unwrap();
        pills.handle_event(&key(KeyCode::Left));

        let dispatch = pills.handle_event(&key(KeyCode::Char('z')));
        assert!(!dispatch.is_handled());
        assert!(pills.field().is_empty());
    }

    #[test]
    fn ctrl_left_at_offset_zero_still_focuses_last_pill() {
        let mut pills = control();
        let a = pills.append("a", None).unwrap();
        let ctrl_left = Event::Key(KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::CTRL));
        pills.handle_event(&ctrl_left);
        assert_eq!(pills.focus(), FocusTarget::Pill(a));
    }
}
