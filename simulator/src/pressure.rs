use indexmap::IndexMap;

use crate::{InstanceId, Overlay, OverlaySet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PressureKind {
    CardCostPenalty,
    HandSizeLimit,
    NoCardDraw,
    AmplifyDrains,
}

impl PressureKind {
    pub const ALL: [PressureKind; 4] = [
        PressureKind::CardCostPenalty,
        PressureKind::HandSizeLimit,
        PressureKind::NoCardDraw,
        PressureKind::AmplifyDrains,
    ];
}

impl std::fmt::Display for PressureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PressureKind::CardCostPenalty => "card_cost_penalty",
            PressureKind::HandSizeLimit => "hand_size_limit",
            PressureKind::NoCardDraw => "no_card_draw",
            PressureKind::AmplifyDrains => "amplify_drains",
        };
        write!(f, "{name}")
    }
}

/// Standing modifiers gremlins impose on the card layer. Nothing here is
/// enforced by the encounter itself, except drain amplification.
#[derive(Clone, Debug)]
pub struct PlayerPressure {
    modifiers: IndexMap<PressureKind, OverlaySet>,
}

impl Default for PlayerPressure {
    fn default() -> Self {
        Self {
            modifiers: PressureKind::ALL
                .into_iter()
                .map(|kind| (kind, OverlaySet::default()))
                .collect(),
        }
    }
}

impl PlayerPressure {
    pub fn install(&mut self, kind: PressureKind, overlay: Overlay) {
        self.modifiers.entry(kind).or_default().install(overlay);
    }

    /// Extra cost added to every card, summed over all sources.
    pub fn card_cost_penalty(&self) -> u32 {
        self.set(PressureKind::CardCostPenalty).sum()
    }

    /// The tightest hand size limit, if any.
    pub fn hand_size_limit(&self) -> Option<u32> {
        self.set(PressureKind::HandSizeLimit).min()
    }

    pub fn draw_locked(&self) -> bool {
        !self.set(PressureKind::NoCardDraw).is_empty()
    }

    /// Drain bonus granted to `source` by every other instance.
    pub fn drain_amplification(&self, source: Option<InstanceId>) -> u32 {
        self.set(PressureKind::AmplifyDrains).sum_excluding(source)
    }

    pub fn release_all_passive(&mut self) {
        self.modifiers
            .values_mut()
            .for_each(OverlaySet::release_all_passive);
    }

    pub fn release_passive(&mut self, source: InstanceId) {
        self.modifiers
            .values_mut()
            .for_each(|set| set.release_passive(source));
    }

    pub fn release_source(&mut self, source: InstanceId) {
        self.modifiers
            .values_mut()
            .for_each(|set| set.release_source(source));
    }

    pub fn expire(&mut self) {
        self.modifiers.values_mut().for_each(OverlaySet::expire);
    }

    fn set(&self, kind: PressureKind) -> &OverlaySet {
        &self.modifiers[&kind]
    }
}
