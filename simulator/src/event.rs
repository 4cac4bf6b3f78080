use models::v1::{ForceType, Percentage};

use crate::{HitOutcome, InstanceId, PressureKind, Ticks};

/// Work the encounter hands to the card layer outside this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerRequest {
    Discard(u32),
    ShuffleHand,
    CopyLastCard,
}

/// Which cap an install event refers to. `None` force means the total cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapKind {
    Hard,
    Soft,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EncounterEvent {
    Tick(Ticks),
    Spawned(InstanceId, String),
    Summoned {
        summoner: Option<InstanceId>,
        summoned: InstanceId,
    },
    SummonBlocked(InstanceId, String),
    MoveEntered(InstanceId, usize),
    MoveFired(InstanceId, usize),
    Drained(Option<InstanceId>, ForceType, u32),
    Decayed(Option<InstanceId>, ForceType, u32),
    CapInstalled(Option<InstanceId>, CapKind, Option<ForceType>, u32),
    PressureApplied(Option<InstanceId>, PressureKind, u32),
    ConstraintsRemoved(InstanceId),
    /// An instance re-installed this many caps from its history.
    ConstraintsReinstated(InstanceId, usize),
    ArmorGained(InstanceId, u32),
    ShieldsGained(InstanceId, u32),
    ReflectIncreased(InstanceId, Percentage),
    Request(Option<InstanceId>, PlayerRequest),
    Hit(InstanceId, HitOutcome),
    Executed(InstanceId, bool),
    Died(InstanceId, String),
    Terminated,
}

/// An event stamped with the tick it happened on.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedEvent(pub Ticks, pub EncounterEvent);
