// File: ./src/reconcile/adjacency.rs
//! Stage 1: fuse back-to-back sessions of the same title.
use crate::model::EventRecord;
use chrono::Duration;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct AdjacencyMerger {
    tolerance: Duration,
}

impl Default for AdjacencyMerger {
    fn default() -> Self {
        Self::new(Duration::minutes(10))
    }
}

impl AdjacencyMerger {
    pub fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// `candidate` starts exactly `tolerance` after `source` ends, or ends
    /// exactly `tolerance` before it starts.
    pub fn is_adjacent(&self, candidate: &EventRecord, source: &EventRecord) -> bool {
        let after = source.end.checked_shift(self.tolerance);
        let before = source.begin.checked_shift(-self.tolerance);
        candidate.title == source.title
            && (after.as_ref() == Some(&candidate.begin) || before.as_ref() == Some(&candidate.end))
    }

    /// Processes events in input order. Each event is compared on its own
    /// original boundaries, but accumulated entries carry the widened
    /// intervals of earlier merges, so chains collapse in a single pass.
    pub fn merge<I>(&self, events: I) -> Vec<EventRecord>
    where
        I: IntoIterator<Item = EventRecord>,
    {
        let mut merged: BTreeMap<usize, EventRecord> = BTreeMap::new();

        for (id, event) in events.into_iter().enumerate() {
            let neighbours: Vec<usize> = merged
                .iter()
                .filter(|(_, existing)| self.is_adjacent(existing, &event))
                .map(|(key, _)| *key)
                .collect();

            let mut candidate = event.clone();
            for key in neighbours {
                if let Some(neighbour) = merged.remove(&key) {
                    log::debug!(
                        "Fusing '{}' {} - {} with {} - {}",
                        event.title,
                        neighbour.begin,
                        neighbour.end,
                        event.begin,
                        event.end
                    );
                    if neighbour.begin < candidate.begin {
                        candidate.begin = neighbour.begin;
                    }
                    if neighbour.end > candidate.end {
                        candidate.end = neighbour.end;
                    }
                }
            }
            merged.insert(id, candidate);
        }

        merged.into_values().collect()
    }
}
