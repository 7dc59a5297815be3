//! The organism's narrative: an append-only record of its life
//!
//! Every tick appends at least one event; births, goal changes,
//! stressors, rejections, and death are recorded explicitly. The log is
//! never truncated or rewritten, and derived metrics (age, brushes with
//! death) are computed by reading it, not by keeping side counters.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::Tick;
use crate::goals::DriveKind;
use crate::metabolism::{FailReason, VitalsSnapshot};
use crate::perception::Action;
use crate::world::StressorKind;

/// One entry in the narrative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEvent {
    pub id: u64,
    pub tick: Tick,
    pub event_type: EventType,
    pub description: String,
    pub snapshot: VitalsSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventType {
    Birth,
    ActionTaken {
        action: Action,
        gained: f64,
        mishap: bool,
    },
    ActionRejected {
        action: Action,
    },
    GoalSpawned {
        drive: DriveKind,
    },
    GoalReleased {
        drive: DriveKind,
    },
    StressorStruck {
        kind: StressorKind,
    },
    Death {
        reason: FailReason,
    },
}

/// The complete narrative log
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityPersistence {
    pub events: Vec<NarrativeEvent>,
    next_event_id: u64,
}

impl IdentityPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event; returns its id
    pub fn record(
        &mut self,
        tick: Tick,
        event_type: EventType,
        description: String,
        snapshot: VitalsSnapshot,
    ) -> u64 {
        let id = self.next_event_id;
        self.next_event_id += 1;

        debug!(tick, event = ?event_type, "{}", description);

        self.events.push(NarrativeEvent {
            id,
            tick,
            event_type,
            description,
            snapshot,
        });

        id
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&NarrativeEvent> {
        self.events.last()
    }

    /// The trailing `n` events, oldest first
    pub fn tail(&self, n: usize) -> &[NarrativeEvent] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }

    pub fn events_at(&self, tick: Tick) -> impl Iterator<Item = &NarrativeEvent> {
        self.events.iter().filter(move |e| e.tick == tick)
    }

    /// Actions actually taken, in order
    pub fn actions(&self) -> impl Iterator<Item = (Tick, Action)> + '_ {
        self.events.iter().filter_map(|e| match e.event_type {
            EventType::ActionTaken { action, .. } => Some((e.tick, action)),
            _ => None,
        })
    }

    /// The death record, if the organism has one
    pub fn death(&self) -> Option<&NarrativeEvent> {
        self.events
            .iter()
            .rev()
            .find(|e| matches!(e.event_type, EventType::Death { .. }))
    }

    /// Ticks between the first and last recorded events
    pub fn age(&self) -> Tick {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.tick.saturating_sub(first.tick),
            _ => 0,
        }
    }

    /// How many times the organism entered the danger band of width `band`
    ///
    /// Counts transitions into the band, not ticks spent inside it, by
    /// scanning the recorded snapshots.
    pub fn near_death_count(&self, band: f64) -> usize {
        let mut count = 0;
        let mut inside = false;
        for event in &self.events {
            let now_inside = event.snapshot.in_danger_band(band);
            if now_inside && !inside {
                count += 1;
            }
            inside = now_inside;
        }
        count
    }
}
