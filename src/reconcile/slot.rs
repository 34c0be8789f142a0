// File: ./src/reconcile/slot.rs
//! Stage 2: one event per exact `[begin, end)` slot.
use crate::error::Result;
use crate::model::location::merge_locations;
use crate::model::title::merge_titles;
use crate::model::{EventRecord, Slot};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct SlotDeduplicator;

impl SlotDeduplicator {
    pub fn new() -> Self {
        Self
    }

    /// Combines two events sharing a slot. Text fields read `first` then
    /// `second`.
    pub fn combine(first: &EventRecord, second: &EventRecord) -> Result<EventRecord> {
        Ok(EventRecord {
            title: merge_titles(&first.title, &second.title)?,
            begin: first.begin.clone(),
            end: first.end.clone(),
            description: format!("{}\n{}", first.description, second.description),
            location: merge_locations(&first.location, &second.location)?,
        })
    }

    /// The input order of Stage 1 is not meaningful, so events are visited in
    /// canonical order and folded onto whatever already holds their slot.
    pub fn merge(&self, mut events: Vec<EventRecord>) -> Result<Vec<EventRecord>> {
        events.sort();
        let mut by_slot: HashMap<Slot, EventRecord> = HashMap::with_capacity(events.len());

        for event in events {
            let slot = event.slot();
            let next = match by_slot.remove(&slot) {
                Some(existing) => {
                    log::debug!(
                        "Merging '{}' into '{}' at {} - {}",
                        event.title,
                        existing.title,
                        slot.begin,
                        slot.end
                    );
                    Self::combine(&existing, &event)?
                }
                None => event,
            };
            by_slot.insert(slot, next);
        }

        let mut out: Vec<EventRecord> = by_slot.into_values().collect();
        out.sort();
        Ok(out)
    }
}
