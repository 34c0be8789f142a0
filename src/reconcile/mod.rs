// File: ./src/reconcile/mod.rs
//! The three-stage reconciliation pipeline:
//! adjacency fusing, slot merging, then title rendering.
pub mod adjacency;
pub mod slot;

pub use adjacency::AdjacencyMerger;
pub use slot::SlotDeduplicator;

use crate::config::Config;
use crate::error::Result;
use crate::model::{EventRecord, TitleCodec};

/// Number of events present after each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub original: usize,
    pub after_adjacency: usize,
    pub after_slots: usize,
}

#[derive(Debug, Clone)]
pub struct Reconciled {
    pub events: Vec<EventRecord>,
    pub counts: StageCounts,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    codec: TitleCodec,
    adjacency: AdjacencyMerger,
    slots: SlotDeduplicator,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Pipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            codec: TitleCodec::from_config(config),
            adjacency: AdjacencyMerger::new(config.tolerance()),
            slots: SlotDeduplicator::new(),
        }
    }

    pub fn codec(&self) -> &TitleCodec {
        &self.codec
    }

    /// Stages 1 and 2. Titles stay in their canonical `COURSE MODE VENUE` form.
    pub fn reconcile(&self, events: Vec<EventRecord>) -> Result<(Vec<EventRecord>, StageCounts)> {
        let mut counts = StageCounts {
            original: events.len(),
            ..Default::default()
        };

        let fused = self.adjacency.merge(events);
        counts.after_adjacency = fused.len();
        log::debug!(
            "No. of events after merging similar classes next to each other: {}",
            counts.after_adjacency
        );

        let merged = self.slots.merge(fused)?;
        counts.after_slots = merged.len();
        log::debug!(
            "No. of events after merging classes in the same slot: {}",
            counts.after_slots
        );

        Ok((merged, counts))
    }

    /// Stage 3: only the title changes.
    pub fn render(&self, events: Vec<EventRecord>) -> Result<Vec<EventRecord>> {
        events
            .into_iter()
            .map(|event| {
                Ok(EventRecord {
                    title: self.codec.render_raw(&event.title)?,
                    ..event
                })
            })
            .collect()
    }

    /// Runs every stage. Nothing is returned unless the whole calendar
    /// reconciles; the result is in canonical order.
    pub fn run(&self, events: Vec<EventRecord>) -> Result<Reconciled> {
        log::debug!("Original no. of events: {}", events.len());
        let (merged, counts) = self.reconcile(events)?;
        let mut events = self.render(merged)?;
        events.sort();
        Ok(Reconciled { events, counts })
    }
}
