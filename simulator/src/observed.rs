use models::v1::{CounterSource, ForceType, ObservedCounter};
use serde::Deserialize;

/// Something the player did that adaptive gremlins may react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerAction {
    Damage {
        #[serde(default)]
        force: Option<ForceType>,
        amount: u32,
    },
    ExecutionAttempt,
    AdversaryKilled,
    CardPlayed,
}

/// Player-action counters accumulated since the owner's last adaptive check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObservationWindow {
    damage: [u64; 5],
    total_damage: u64,
    execution_attempts: u64,
    kills: u64,
    cards_played: u64,
}

impl ObservationWindow {
    pub fn record(&mut self, action: &PlayerAction) {
        match action {
            PlayerAction::Damage { force, amount } => {
                if let Some(force) = force {
                    self.damage[force.index()] += *amount as u64;
                }
                self.total_damage += *amount as u64;
            }
            PlayerAction::ExecutionAttempt => self.execution_attempts += 1,
            PlayerAction::AdversaryKilled => self.kills += 1,
            PlayerAction::CardPlayed => self.cards_played += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl CounterSource for ObservationWindow {
    fn count(&self, counter: ObservedCounter) -> u64 {
        match counter {
            ObservedCounter::Damage(force) => self.damage[force.index()],
            ObservedCounter::TotalDamage => self.total_damage,
            ObservedCounter::ExecutionAttempts => self.execution_attempts,
            ObservedCounter::AdversaryKills => self.kills,
            ObservedCounter::CardsPlayed => self.cards_played,
        }
    }
}
