use models::v1::{Effect, EffectKind, ForceSelector, ForceType, SummonSpec, TargetScope};
use rand::Rng;

use crate::{
    CapKind, DispatchableEvent, Encounter, EncounterEvent, InstanceId, InstanceSummary, Overlay,
    OverlayDuration, PlayerRequest, PressureKind,
};

impl Encounter {
    /// Applies one effect on behalf of `source`.
    ///
    /// Overlays installed here (caps and pressure modifiers) carry `duration`
    /// and are tagged with `source` so they can be refreshed or released later.
    pub fn apply_effect(
        &mut self,
        source: Option<InstanceId>,
        effect: &Effect,
        duration: OverlayDuration,
    ) {
        let value = effect.magnitude.amount();
        match &effect.kind {
            EffectKind::Drain => {
                let amount = value.saturating_add(self.pressure.drain_amplification(source));
                for force in self.present_forces(effect.forces) {
                    let removed = self.pool.drain(force, amount);
                    if removed > 0 {
                        self.record(EncounterEvent::Drained(source, force, removed));
                    }
                }
            }
            EffectKind::Decay => {
                for force in self.present_forces(effect.forces) {
                    let removed = self.pool.drain(force, value);
                    if removed > 0 {
                        self.record(EncounterEvent::Decayed(source, force, removed));
                    }
                }
            }
            EffectKind::HardCap => {
                self.remember_cap(source, effect);
                for force in self.capped_forces(effect.forces) {
                    self.pool
                        .install_hard_cap(force, Overlay::new(value, duration, source));
                    self.record(EncounterEvent::CapInstalled(
                        source,
                        CapKind::Hard,
                        Some(force),
                        value,
                    ));
                }
            }
            EffectKind::SoftCap => {
                self.remember_cap(source, effect);
                for force in self.capped_forces(effect.forces) {
                    self.pool
                        .install_soft_cap(force, Overlay::new(value, duration, source));
                    self.record(EncounterEvent::CapInstalled(
                        source,
                        CapKind::Soft,
                        Some(force),
                        value,
                    ));
                }
            }
            EffectKind::TotalHardCap => {
                self.remember_cap(source, effect);
                self.pool
                    .install_total_cap(Overlay::new(value, duration, source));
                self.record(EncounterEvent::CapInstalled(source, CapKind::Hard, None, value));
            }
            EffectKind::Summon(spec) => self.summon(source, spec),
            EffectKind::GainArmor => {
                for id in self.scoped_instances(source, effect.scope) {
                    if let Some(instance) = self.registry.get_mut(id) {
                        instance.armor = instance.armor.saturating_add(value);
                        self.record(EncounterEvent::ArmorGained(id, value));
                    }
                }
            }
            EffectKind::GainShields => {
                for id in self.scoped_instances(source, effect.scope) {
                    if let Some(instance) = self.registry.get_mut(id) {
                        instance.shields = instance.shields.saturating_add(value);
                        self.record(EncounterEvent::ShieldsGained(id, value));
                    }
                }
            }
            EffectKind::ReflectIncrease => {
                let increase = effect.magnitude.as_percentage();
                for id in self.scoped_instances(source, effect.scope) {
                    if let Some(instance) = self.registry.get_mut(id) {
                        instance.increase_reflect(increase);
                        self.record(EncounterEvent::ReflectIncreased(id, increase));
                    }
                }
            }
            EffectKind::AmplifyDrains => {
                self.apply_pressure(source, PressureKind::AmplifyDrains, value, duration)
            }
            EffectKind::CardCostPenalty => {
                self.apply_pressure(source, PressureKind::CardCostPenalty, value, duration)
            }
            EffectKind::HandSizeLimit => {
                self.apply_pressure(source, PressureKind::HandSizeLimit, value, duration)
            }
            EffectKind::NoCardDraw => {
                self.apply_pressure(source, PressureKind::NoCardDraw, 1, duration)
            }
            EffectKind::ForceDiscard => {
                self.record(EncounterEvent::Request(source, PlayerRequest::Discard(value)))
            }
            EffectKind::ShuffleHand => {
                self.record(EncounterEvent::Request(source, PlayerRequest::ShuffleHand))
            }
            EffectKind::CopyLastCard => {
                self.record(EncounterEvent::Request(source, PlayerRequest::CopyLastCard))
            }
            EffectKind::RemoveConstraints => {
                if let Some(id) = source {
                    self.pool.release_source(id);
                    self.pressure.release_source(id);
                    self.record(EncounterEvent::ConstraintsRemoved(id));
                }
            }
            EffectKind::ReinstateConstraints => {
                let Some(id) = source else {
                    return;
                };
                let caps = self
                    .registry
                    .get(id)
                    .map(|instance| instance.installed_caps.clone())
                    .unwrap_or_default();
                for cap in &caps {
                    self.apply_effect(source, cap, duration);
                }
                self.record(EncounterEvent::ConstraintsReinstated(id, caps.len()));
            }
        }
    }

    fn remember_cap(&mut self, source: Option<InstanceId>, effect: &Effect) {
        if let Some(instance) = source.and_then(|id| self.registry.get_mut(id)) {
            instance.remember_cap(effect);
        }
    }

    fn apply_pressure(
        &mut self,
        source: Option<InstanceId>,
        kind: PressureKind,
        value: u32,
        duration: OverlayDuration,
    ) {
        self.pressure
            .install(kind, Overlay::new(value, duration, source));
        self.record(EncounterEvent::PressureApplied(source, kind, value));
    }

    /// Forces a drain or decay acts on. Selectors only consider forces the
    /// player currently holds.
    fn present_forces(&mut self, selector: Option<ForceSelector>) -> Vec<ForceType> {
        match selector {
            Some(ForceSelector::Fixed(force)) => vec![force],
            Some(ForceSelector::Largest) => self.pool.largest().into_iter().collect(),
            Some(ForceSelector::Smallest) => self.pool.smallest().into_iter().collect(),
            Some(ForceSelector::Random) => {
                let present = self.pool.present();
                match present.is_empty() {
                    true => vec![],
                    false => vec![present[self.rng.random_range(0..present.len())]],
                }
            }
            Some(ForceSelector::All) | None => ForceType::ALL.to_vec(),
        }
    }

    /// Force slots a cap installs on. Largest and smallest caps guard every
    /// slot so the player cannot dodge them by shifting resources.
    fn capped_forces(&mut self, selector: Option<ForceSelector>) -> Vec<ForceType> {
        match selector {
            Some(ForceSelector::Fixed(force)) => vec![force],
            Some(ForceSelector::Random) => {
                vec![ForceType::ALL[self.rng.random_range(0..ForceType::ALL.len())]]
            }
            _ => ForceType::ALL.to_vec(),
        }
    }

    fn scoped_instances(&self, source: Option<InstanceId>, scope: TargetScope) -> Vec<InstanceId> {
        match scope {
            TargetScope::This => source
                .filter(|id| self.registry.get(*id).is_some())
                .into_iter()
                .collect(),
            TargetScope::AllAdversaries => self
                .registry
                .iter()
                .filter(|instance| instance.is_alive())
                .map(|instance| instance.id)
                .collect(),
            TargetScope::Player => vec![],
        }
    }

    fn summon(&mut self, summoner: Option<InstanceId>, spec: &SummonSpec) {
        if let Some(id) = summoner.filter(|id| !self.registry.can_summon(*id)) {
            self.record(EncounterEvent::SummonBlocked(id, spec.to_string()));
            if let Some(instance) = self.registry.get(id) {
                self.dispatch_event(&DispatchableEvent::SummonBlocked(
                    InstanceSummary::from(instance),
                    spec.to_string(),
                ));
            }
            return;
        }

        let summoner_template = summoner
            .and_then(|id| self.registry.get(id))
            .map(|instance| instance.template.clone());
        let template = match spec {
            SummonSpec::Named(template_id) => self.bestiary.get(template_id).cloned(),
            SummonSpec::RandomOfSize(size) => {
                let candidates = self
                    .bestiary
                    .by_size(*size)
                    .filter(|candidate| {
                        summoner_template
                            .as_ref()
                            .is_none_or(|own| own.id != candidate.id)
                    })
                    .cloned()
                    .collect::<Vec<_>>();
                match candidates.is_empty() {
                    true => None,
                    false => Some(candidates[self.rng.random_range(0..candidates.len())].clone()),
                }
            }
        };
        let Some(template) = template else {
            self.dispatch_event(&DispatchableEvent::Warning(format!(
                "no gremlin template available for summon={spec}"
            )));
            return;
        };

        let position = summoner_template
            .map(|own| own.targeting.summon_position)
            .unwrap_or_default();
        let summoned = self
            .registry
            .spawn(template, self.clock.now(), position, summoner);
        #[cfg(feature = "trace")]
        tracing::info!(?summoner, %summoned, %spec, "summon gremlin");
        self.record(EncounterEvent::Summoned { summoner, summoned });
        self.enter_passive(summoned);
    }
}
