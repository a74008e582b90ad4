#![forbid(unsafe_code)]

//! The ordered pill collection and its modification clock.
//!
//! The collection owns the live records (including each pill's renderer
//! handle), the per-instance id generator, the creation pipeline, and the
//! renderer. Insertion order is display order: the renderer is always told
//! the correct insertion position, and removal keeps the two in lockstep.
//!
//! Every structural mutation advances the [`ModificationClock`]; derived
//! views compare their as-of marks against it to decide staleness.

use pillbox_core::{IdGen, PillId};

use crate::pill::{KeyResolution, PillData, Rejection};
use crate::pipeline::ValidationPipeline;
use crate::render::{PillRenderer, Slot};

/// Monotonically non-decreasing mutation stamp.
///
/// Advanced on every structural mutation. Popping an empty collection still
/// advances it; cache readers tolerate the spurious staleness at the cost of
/// one redundant rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModificationClock {
    stamp: u64,
}

impl ModificationClock {
    /// A clock at stamp zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { stamp: 0 }
    }

    /// Record a structural mutation.
    pub fn advance(&mut self) {
        self.stamp += 1;
    }

    /// The current stamp.
    #[must_use]
    pub const fn stamp(&self) -> u64 {
        self.stamp
    }
}

/// One live pill: its data plus the renderer handle it owns.
pub struct PillRecord<K, H> {
    id: PillId,
    value: String,
    key: Option<K>,
    handle: H,
}

impl<K, H> PillRecord<K, H> {
    /// The pill's id.
    #[must_use]
    pub fn id(&self) -> PillId {
        self.id
    }

    /// The human-visible value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The hidden key, if one was resolved.
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}

impl<K, H> std::fmt::Debug for PillRecord<K, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillRecord")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("has_key", &self.key.is_some())
            .finish()
    }
}

/// Ordered, mutable collection of pills.
pub struct PillCollection<K, R: PillRenderer> {
    pills: Vec<PillRecord<K, R::Handle>>,
    id_gen: IdGen,
    clock: ModificationClock,
    pipeline: ValidationPipeline<K>,
    renderer: R,
}

impl<K, R: PillRenderer> PillCollection<K, R> {
    /// An empty collection displaying through `renderer`.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            pills: Vec::new(),
            id_gen: IdGen::new(),
            clock: ModificationClock::new(),
            pipeline: ValidationPipeline::new(),
            renderer,
        }
    }

    /// Register the key-resolution callback.
    pub fn on_pill_create(
        &mut self,
        resolver: impl FnMut(&str, &mut Rejection) -> KeyResolution<K> + 'static,
    ) {
        self.pipeline.set_resolver(resolver);
    }

    /// Register the validator callback.
    pub fn validate(&mut self, validator: impl FnMut(&str, Option<&K>, &mut Rejection) + 'static) {
        self.pipeline.set_validator(validator);
    }

    /// Create a pill at the end of the sequence (before the input slot).
    ///
    /// Returns the new pill's id, or `None` if the pipeline rejected the
    /// attempt. Callers must not pass a value that is empty post-trim.
    pub fn append(&mut self, value: &str, explicit_key: Option<K>) -> Option<PillId> {
        self.create(value, explicit_key, Slot::Tail)
    }

    /// Create a pill at the start of the sequence.
    pub fn prepend(&mut self, value: &str, explicit_key: Option<K>) -> Option<PillId> {
        self.create(value, explicit_key, Slot::Head)
    }

    fn create(&mut self, raw_value: &str, explicit_key: Option<K>, slot: Slot) -> Option<PillId> {
        let Some((value, key)) = self.pipeline.resolve(raw_value, explicit_key) else {
            pillbox_core::debug!(slot = ?slot, "pill creation rejected");
            self.renderer.signal_rejection();
            return None;
        };

        let id = self.id_gen.next_id();
        let handle = self.renderer.mount(id, &value, slot);
        let record = PillRecord {
            id,
            value,
            key,
            handle,
        };
        match slot {
            Slot::Head => self.pills.insert(0, record),
            Slot::Tail => self.pills.push(record),
        }
        self.clock.advance();
        pillbox_core::debug!(id = id.as_raw(), slot = ?slot, "pill created");
        Some(id)
    }

    /// Remove a pill by id.
    ///
    /// Unknown ids are a silent no-op (the host may race display state that
    /// is already gone). Last match wins on the scan; counter-allocated ids
    /// cannot actually collide.
    pub fn remove(&mut self, id: PillId) -> Option<PillData<K>> {
        let idx = self.position_of(id)?;
        let PillRecord {
            value, key, handle, ..
        } = self.pills.remove(idx);
        self.renderer.unmount(handle);
        self.clock.advance();
        pillbox_core::debug!(id = id.as_raw(), "pill removed");
        Some(PillData { value, key })
    }

    /// Remove the last pill in the sequence.
    ///
    /// The clock advances even when the collection is already empty.
    pub fn remove_last(&mut self) -> Option<PillData<K>> {
        let record = self.pills.pop();
        self.clock.advance();
        let PillRecord {
            value, key, handle, ..
        } = record?;
        self.renderer.unmount(handle);
        Some(PillData { value, key })
    }

    /// Remove every pill, back to front.
    ///
    /// Safe on an already-empty collection.
    pub fn remove_all(&mut self) {
        while !self.pills.is_empty() {
            self.remove_last();
        }
    }

    /// Snapshot of every pill's data, in order. Not cached.
    pub fn data(&self) -> Vec<PillData<K>>
    where
        K: Clone,
    {
        self.pills
            .iter()
            .map(|record| PillData {
                value: record.value.clone(),
                key: record.key.clone(),
            })
            .collect()
    }

    /// Number of live pills.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pills.len()
    }

    /// Whether the collection has no pills.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pills.is_empty()
    }

    /// Look up a live pill.
    #[must_use]
    pub fn get(&self, id: PillId) -> Option<&PillRecord<K, R::Handle>> {
        self.position_of(id).map(|idx| &self.pills[idx])
    }

    /// Id of the last pill in the sequence, if any.
    #[must_use]
    pub fn last_id(&self) -> Option<PillId> {
        self.pills.last().map(|record| record.id)
    }

    /// Id of the pill before `id` in the sequence.
    #[must_use]
    pub fn predecessor_of(&self, id: PillId) -> Option<PillId> {
        let idx = self.position_of(id)?;
        idx.checked_sub(1).map(|prev| self.pills[prev].id)
    }

    /// Id of the pill after `id` in the sequence.
    #[must_use]
    pub fn successor_of(&self, id: PillId) -> Option<PillId> {
        let idx = self.position_of(id)?;
        self.pills.get(idx + 1).map(|record| record.id)
    }

    /// The mutation clock.
    #[must_use]
    pub fn clock(&self) -> ModificationClock {
        self.clock
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The renderer, for forwarding feedback-lifecycle notifications.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub(crate) fn records(&self) -> &[PillRecord<K, R::Handle>] {
        &self.pills
    }

    fn position_of(&self, id: PillId) -> Option<usize> {
        self.pills.iter().rposition(|record| record.id == id)
    }
}

impl<K, R: PillRenderer> std::fmt::Debug for PillCollection<K, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PillCollection")
            .field("pills", &self.pills)
            .field("stamp", &self.clock.stamp())
            .finish()
    }
}
