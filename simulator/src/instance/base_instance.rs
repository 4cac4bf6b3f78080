use std::sync::Arc;

use models::v1::{AdversaryTemplate, Effect, Move, Percentage};

use crate::{Health, InstanceId, MAX_REFLECT, ObservationWindow, Ticks};

/// One incoming hit as delivered by the combat layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hit {
    pub damage: u32,
    /// Pierce hits ignore armor.
    pub pierce: bool,
}

impl Hit {
    pub fn new(damage: u32) -> Self {
        Self {
            damage,
            pierce: false,
        }
    }

    pub fn piercing(damage: u32) -> Self {
        Self {
            damage,
            pierce: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitOutcome {
    pub raw: u32,
    pub applied: u32,
    pub barrier_absorbed: bool,
    pub shield_damage: u32,
    pub armor_damage: u32,
    pub health_damage: u32,
    pub reflected: u32,
    pub killed: bool,
}

/// A live gremlin spawned from a template.
#[derive(Clone, Debug)]
pub struct AdversaryInstance {
    pub id: InstanceId,
    pub template: Arc<AdversaryTemplate>,
    pub health: Health,
    pub armor: u32,
    pub shields: u32,
    pub barrier: u32,
    pub reflect: Percentage,
    pub move_index: usize,
    pub ticks_in_move: u64,
    /// Trigger count per move, reset whenever the move is entered.
    pub triggers: Vec<u32>,
    pub ticks_alive: u64,
    pub spawned_at: Ticks,
    pub summoner: Option<InstanceId>,
    pub observed: ObservationWindow,
    /// Distinct cap effects this instance has installed, oldest first.
    pub installed_caps: Vec<Effect>,
}

impl AdversaryInstance {
    pub fn spawn(
        id: InstanceId,
        template: Arc<AdversaryTemplate>,
        spawned_at: Ticks,
        summoner: Option<InstanceId>,
    ) -> Self {
        let stats = &template.stats;
        Self {
            id,
            health: Health::full(stats.max_health),
            armor: stats.armor,
            shields: stats.shields,
            barrier: stats.barrier_count,
            reflect: stats.reflect,
            move_index: 0,
            ticks_in_move: 0,
            triggers: vec![0; template.moves.len()],
            ticks_alive: 0,
            spawned_at,
            summoner,
            observed: ObservationWindow::default(),
            installed_caps: Vec::new(),
            template,
        }
    }

    pub fn template_id(&self) -> &str {
        &self.template.id
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_depleted()
    }

    pub fn current_move(&self) -> Option<&Move> {
        self.template.moves.get(self.move_index)
    }

    pub fn current_triggers(&self) -> u32 {
        self.triggers.get(self.move_index).copied().unwrap_or(0)
    }

    pub fn enter_move(&mut self, index: usize) {
        self.move_index = index;
        self.ticks_in_move = 0;
        if let Some(triggers) = self.triggers.get_mut(index) {
            *triggers = 0;
        }
    }

    pub fn count_trigger(&mut self) {
        if let Some(triggers) = self.triggers.get_mut(self.move_index) {
            *triggers += 1;
        }
    }

    /// Regenerates shields up to the regen cap, never lowering shields that
    /// already sit above it.
    pub fn regenerate_shields(&mut self) {
        let stats = &self.template.stats;
        if self.shields < stats.shield_regen_max {
            self.shields = (self.shields + stats.shield_regen).min(stats.shield_regen_max);
        }
    }

    /// Returns `(applied, reflected)` for a hit of `raw` damage.
    pub fn effective_incoming_damage(&self, raw: u32) -> (u32, u32) {
        let applied = match self.template.stats.damage_cap {
            Some(cap) => raw.min(cap),
            None => raw,
        };
        (applied, self.reflect.of(applied))
    }

    pub fn apply_hit(&mut self, hit: Hit) -> HitOutcome {
        let (applied, reflected) = self.effective_incoming_damage(hit.damage);
        let mut outcome = HitOutcome {
            raw: hit.damage,
            applied,
            reflected,
            ..Default::default()
        };
        if applied == 0 || !self.is_alive() {
            return outcome;
        }

        if self.barrier > 0 {
            self.barrier -= 1;
            outcome.barrier_absorbed = true;
            return outcome;
        }

        let mut remaining = applied;
        outcome.shield_damage = remaining.min(self.shields);
        self.shields -= outcome.shield_damage;
        remaining -= outcome.shield_damage;

        if !hit.pierce {
            outcome.armor_damage = remaining.min(self.armor);
            self.armor -= outcome.armor_damage;
            remaining -= outcome.armor_damage;
        }

        let before = self.health.current();
        self.health -= remaining;
        outcome.health_damage = before - self.health.current();
        outcome.killed = !self.is_alive();
        outcome
    }

    /// Removes the instance outright unless it sits above its
    /// execute-immunity threshold.
    pub fn execute(&mut self) -> bool {
        match self.template.stats.execute_immunity_threshold {
            Some(threshold) if self.health.current() > threshold => false,
            _ => {
                self.health = Health(0, self.health.max());
                true
            }
        }
    }

    pub fn heal(&mut self, amount: u32) {
        if self.is_alive() {
            self.health += amount;
        }
    }

    pub fn remember_cap(&mut self, effect: &Effect) {
        if !self.installed_caps.contains(effect) {
            self.installed_caps.push(effect.clone());
        }
    }

    pub fn increase_reflect(&mut self, amount: Percentage) {
        self.reflect = self.reflect.saturating_add(amount);
        if self.reflect > *MAX_REFLECT {
            self.reflect = *MAX_REFLECT;
        }
    }
}
