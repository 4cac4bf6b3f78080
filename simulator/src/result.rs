use std::time::Duration;

use crate::{EncounterEvent, InstanceSummary, ResourceSnapshot, Ticks, TimedEvent};

#[derive(Debug)]
pub struct EncounterResultInner {
    pub source: Option<String>,
    pub events: Vec<TimedEvent>,
    pub duration: Duration,
    pub ticks: Ticks,
    pub survivors: Vec<InstanceSummary>,
    pub resources: ResourceSnapshot,
}

#[derive(Debug)]
pub enum EncounterResult {
    /// Every gremlin was removed.
    Cleared(EncounterResultInner),
    /// The tick limit ran out with gremlins still on the board.
    Timeout(EncounterResultInner),
}

impl EncounterResult {
    pub fn inner_ref(&self) -> &EncounterResultInner {
        match self {
            EncounterResult::Cleared(r) | EncounterResult::Timeout(r) => r,
        }
    }

    pub fn short_str(&self) -> String {
        match self {
            EncounterResult::Cleared(..) => "Cleared".to_string(),
            EncounterResult::Timeout(..) => "Timeout".to_string(),
        }
    }
}

impl std::fmt::Display for EncounterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner_ref();
        let mut res = match self {
            EncounterResult::Cleared(..) => {
                format!("[{:?}] Cleared at {}\n", inner.duration, inner.ticks)
            }
            EncounterResult::Timeout(..) => format!(
                "[{:?}] Timeout at {} with {} gremlin(s) left\n",
                inner.duration,
                inner.ticks,
                inner.survivors.len()
            ),
        };
        let mut last_line_was_tick = false;
        for TimedEvent(tick, event) in &inner.events {
            match event {
                EncounterEvent::Tick(n) => {
                    if !last_line_was_tick {
                        res.push_str(&format!("[{n}] Tick\n"));
                        last_line_was_tick = true;
                    }
                }
                e => {
                    last_line_was_tick = false;
                    res.push_str(&format!("  {e:?} @ {tick}\n"))
                }
            }
        }
        res.push_str(&format!("{}\n", inner.resources));
        write!(f, "{res}")
    }
}
