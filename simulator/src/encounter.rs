use std::sync::Arc;
use std::time::Instant;

use models::v1::{Bestiary, ForceType, SummonPosition};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    AdversaryInstance, Clock, DEFAULT_MAX_TICKS, DEFAULT_SEED, DispatchableEvent,
    EncounterEvent, EncounterResult, EncounterResultInner, EncounterTemplate, Hit, HitOutcome,
    InstanceId, InstanceSummary, OverlayDuration, PlayerAction, PlayerPressure, Registry,
    ResourcePool, ResourceSnapshot, ScriptedAction, ScriptedKind, Ticks, TimedEvent, scheduler,
};

/// One fight against a board of gremlins.
///
/// The encounter owns the tick clock, the player's resource pool and every
/// live instance. External layers drive it through [`Encounter::advance`] and
/// the player-side hooks (`gain`, `spend`, `apply_hit`, `execute`, `observe`).
#[derive(Clone, Debug)]
pub struct Encounter {
    pub clock: Clock,
    pub pool: ResourcePool,
    pub pressure: PlayerPressure,
    pub registry: Registry,
    pub bestiary: Arc<Bestiary>,
    pub rng: StdRng,
    pub events: Vec<TimedEvent>,
    pub max_ticks: u64,
    pub script: Vec<ScriptedAction>,
    pub source: Option<String>,
    pub event_sender: Option<std::sync::mpsc::Sender<DispatchableEvent>>,
    pub stdout_enabled: bool,
}

impl TryFrom<EncounterTemplate> for Encounter {
    type Error = anyhow::Error;

    fn try_from(template: EncounterTemplate) -> Result<Self, Self::Error> {
        Encounter::from_template(template, gamedata::BESTIARY.clone())
    }
}

impl Encounter {
    pub fn new(bestiary: Arc<Bestiary>, seed: u64) -> Self {
        Self {
            clock: Clock::default(),
            pool: ResourcePool::default(),
            pressure: PlayerPressure::default(),
            registry: Registry::default(),
            bestiary,
            rng: StdRng::seed_from_u64(seed),
            events: Vec::new(),
            max_ticks: *DEFAULT_MAX_TICKS,
            script: Vec::new(),
            source: None,
            event_sender: None,
            stdout_enabled: false,
        }
    }

    pub fn from_template(template: EncounterTemplate, bestiary: Arc<Bestiary>) -> anyhow::Result<Self> {
        if template.gremlins.is_empty() {
            anyhow::bail!("encounter has no gremlins");
        }
        let max_ticks = template.max_ticks.unwrap_or(*DEFAULT_MAX_TICKS);
        if max_ticks == 0 {
            anyhow::bail!("max_ticks must be positive");
        }
        if let Some(action) = template.script.iter().find(|a| a.tick > max_ticks) {
            anyhow::bail!(
                "scripted action {:?} at tick {} is past max_ticks ({max_ticks})",
                action.action,
                action.tick
            );
        }

        let resources = template
            .resources
            .iter()
            .map(|(force, amount)| Ok((ForceType::try_from(force.as_str())?, *amount)))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut encounter = Encounter::new(bestiary, template.seed.unwrap_or(*DEFAULT_SEED))
            .with_resources(resources);
        encounter.max_ticks = max_ticks;
        encounter.script = template.script;
        encounter.source = template.source;
        for template_id in &template.gremlins {
            encounter.spawn(template_id)?;
        }
        Ok(encounter)
    }

    /// Sets starting amounts. Caps already installed by spawned gremlins stay.
    pub fn with_resources(mut self, resources: impl IntoIterator<Item = (ForceType, u32)>) -> Self {
        for (force, amount) in resources {
            self.pool.set(force, amount);
        }
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn with_channel(mut self, sender: std::sync::mpsc::Sender<DispatchableEvent>) -> Self {
        self.event_sender = Some(sender);
        self
    }

    pub fn with_stdout(mut self) -> Self {
        self.stdout_enabled = true;
        self
    }

    /// Spawns a gremlin at the bottom of the board.
    pub fn spawn(&mut self, template_id: &str) -> anyhow::Result<InstanceId> {
        let Some(template) = self.bestiary.get(template_id).cloned() else {
            anyhow::bail!("unknown gremlin template '{template_id}'");
        };
        let id = self
            .registry
            .spawn(template, self.clock.now(), SummonPosition::Bottom, None);
        #[cfg(feature = "trace")]
        tracing::info!(%id, template_id, "spawn gremlin");
        self.record(EncounterEvent::Spawned(id, template_id.to_string()));
        self.enter_passive(id);
        Ok(id)
    }

    pub fn now(&self) -> Ticks {
        self.clock.now()
    }

    pub fn is_terminated(&self) -> bool {
        self.clock.is_terminated()
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn pressure(&self) -> &PlayerPressure {
        &self.pressure
    }

    pub fn instance(&self, id: InstanceId) -> Option<&AdversaryInstance> {
        self.registry.get(id)
    }

    pub fn instances(&self) -> impl Iterator<Item = &AdversaryInstance> {
        self.registry.iter()
    }

    /// Instances the player may pick as a direct target, top to bottom.
    pub fn targetable_instances(&self) -> Vec<InstanceId> {
        self.registry.targetable()
    }

    /// `(applied, reflected)` for a hit of `raw` damage, without applying it.
    pub fn effective_incoming_damage(&self, id: InstanceId, raw: u32) -> Option<(u32, u32)> {
        self.registry
            .get(id)
            .map(|instance| instance.effective_incoming_damage(raw))
    }

    pub fn current_resource_snapshot(&self) -> ResourceSnapshot {
        self.pool.snapshot()
    }

    /// Adds resources, returning what survived the hard caps.
    pub fn gain(&mut self, force: ForceType, amount: u32) -> u32 {
        self.pool.gain(force, amount)
    }

    pub fn spend(&mut self, force: ForceType, amount: u32) -> bool {
        self.pool.spend(force, amount)
    }

    /// Applies a hit to one instance. A killing hit prunes it right away.
    pub fn apply_hit(&mut self, id: InstanceId, hit: Hit) -> anyhow::Result<HitOutcome> {
        let Some(instance) = self.registry.get_mut(id) else {
            anyhow::bail!("no gremlin with id {id}");
        };
        let outcome = instance.apply_hit(hit);
        self.record(EncounterEvent::Hit(id, outcome));
        if outcome.killed {
            self.prune_dead();
        }
        Ok(outcome)
    }

    pub fn execute(&mut self, id: InstanceId) -> anyhow::Result<bool> {
        let Some(instance) = self.registry.get_mut(id) else {
            anyhow::bail!("no gremlin with id {id}");
        };
        let executed = instance.execute();
        self.record(EncounterEvent::Executed(id, executed));
        if executed {
            self.prune_dead();
        }
        Ok(executed)
    }

    pub fn heal(&mut self, id: InstanceId, amount: u32) -> anyhow::Result<()> {
        let Some(instance) = self.registry.get_mut(id) else {
            anyhow::bail!("no gremlin with id {id}");
        };
        instance.heal(amount);
        Ok(())
    }

    /// Feeds a player action into every live instance's observation window.
    pub fn observe(&mut self, action: PlayerAction) {
        for instance in self.registry.iter_mut() {
            instance.observed.record(&action);
        }
    }

    pub fn terminate(&mut self) {
        if self.clock.is_terminated() {
            return;
        }
        self.clock.terminate();
        self.record(EncounterEvent::Terminated);
        self.dispatch_log(format!("encounter terminated at {}", self.clock.now()));
    }

    /// Runs one tick.
    ///
    /// # Panics
    ///
    /// Panics when the encounter has already terminated.
    pub fn advance(&mut self) -> Ticks {
        let now = self.clock.advance();
        #[cfg(feature = "trace")]
        let _span = tracing::info_span!("tick", tick = now.0).entered();
        self.record(EncounterEvent::Tick(now));
        self.dispatch_event(&DispatchableEvent::Tick(now));

        self.apply_passives();
        self.fire_moves();
        self.run_transitions();
        self.pool.expire();
        self.pressure.expire();
        self.prune_dead();
        now
    }

    fn apply_passives(&mut self) {
        self.pool.release_all_passive();
        self.pressure.release_all_passive();
        for id in self.registry.ids() {
            let Some(instance) = self.registry.get_mut(id) else {
                continue;
            };
            if !instance.is_alive() {
                continue;
            }
            instance.regenerate_shields();
            let template = instance.template.clone();
            let Some(mv) = template
                .moves
                .get(instance.move_index)
                .filter(|mv| mv.is_passive())
            else {
                continue;
            };
            instance.count_trigger();
            for effect in mv.effects.iter().filter(|effect| effect.is_continuous()) {
                self.apply_effect(Some(id), effect, OverlayDuration::Passive);
            }
        }
    }

    fn fire_moves(&mut self) {
        for id in self.registry.ids() {
            let Some(instance) = self.registry.get_mut(id) else {
                continue;
            };
            if !instance.is_alive() {
                continue;
            }
            instance.ticks_in_move += 1;
            instance.ticks_alive += 1;
            if !scheduler::fires(instance) {
                continue;
            }
            instance.count_trigger();
            let template = instance.template.clone();
            let index = instance.move_index;
            let Some(mv) = template.moves.get(index) else {
                continue;
            };
            self.record(EncounterEvent::MoveFired(id, index));
            for effect in &mv.effects {
                self.apply_effect(Some(id), effect, OverlayDuration::Ticks(mv.interval as u64));
            }
        }
    }

    fn run_transitions(&mut self) {
        for id in self.registry.ids() {
            let Some(instance) = self.registry.get_mut(id) else {
                continue;
            };
            if !instance.is_alive() {
                continue;
            }
            if let Some(next) = scheduler::next_move(instance, &mut self.rng) {
                self.enter_move(id, next);
            }
        }
    }

    /// Switches `id` to move `index`, swapping out its passive overlays.
    pub fn enter_move(&mut self, id: InstanceId, index: usize) {
        self.pool.release_passive(id);
        self.pressure.release_passive(id);
        let Some(instance) = self.registry.get_mut(id) else {
            return;
        };
        instance.enter_move(index);
        #[cfg(feature = "trace")]
        tracing::debug!(%id, index, "enter move");
        self.record(EncounterEvent::MoveEntered(id, index));
        self.enter_passive(id);
    }

    /// Installs the standing effects of `id`'s current move if it is passive,
    /// and resolves its one-shot effects (gains, summons, requests) once.
    pub(crate) fn enter_passive(&mut self, id: InstanceId) {
        let Some(instance) = self.registry.get(id) else {
            return;
        };
        let template = instance.template.clone();
        let Some(mv) = template
            .moves
            .get(instance.move_index)
            .filter(|mv| mv.is_passive())
        else {
            return;
        };
        for effect in mv.effects.iter().filter(|effect| !effect.is_continuous()) {
            self.apply_effect(Some(id), effect, OverlayDuration::Passive);
        }
        for effect in mv.effects.iter().filter(|effect| effect.is_standing()) {
            self.apply_effect(Some(id), effect, OverlayDuration::Passive);
        }
    }

    /// Resolves on-death effects and removes every instance at zero health.
    /// Terminates the encounter once the board is empty.
    fn prune_dead(&mut self) {
        for id in self.registry.dead() {
            let Some(instance) = self.registry.get(id) else {
                continue;
            };
            let template = instance.template.clone();
            let summary = InstanceSummary::from(instance);
            for effect in &template.on_death {
                self.apply_effect(Some(id), effect, OverlayDuration::Permanent);
            }

            self.registry.remove(id);
            self.pool.release_passive(id);
            self.pressure.release_passive(id);
            self.observe(PlayerAction::AdversaryKilled);

            #[cfg(feature = "trace")]
            tracing::info!(%id, template_id = %template.id, "gremlin died");
            self.record(EncounterEvent::Died(id, template.id.clone()));
            self.dispatch_event(&DispatchableEvent::InstanceDied(summary, self.clock.now()));
        }

        if self.registry.is_empty() {
            self.terminate();
        }
    }

    pub(crate) fn record(&mut self, event: EncounterEvent) {
        self.events.push(TimedEvent(self.clock.now(), event));
    }

    pub(crate) fn dispatch_log(&self, s: String) {
        let event = &DispatchableEvent::Log(s);
        self.dispatch_event(event)
    }

    pub(crate) fn dispatch_event(&self, event: &DispatchableEvent) {
        if let Some(ref tx) = self.event_sender {
            let _ = tx.send(event.clone());
        }
        if self.stdout_enabled {
            eprintln!("EVENT: {:?}", event);
        }
    }

    /// Resolves a scenario target: `first` targetable, `all` live instances,
    /// or the first targetable instance of a template id.
    fn scripted_targets(&self, target: &str) -> Vec<InstanceId> {
        let targetable = self.registry.targetable();
        let targets = match target {
            "first" => targetable.into_iter().take(1).collect(),
            "all" => self
                .registry
                .iter()
                .filter(|instance| instance.is_alive())
                .map(|instance| instance.id)
                .collect(),
            template_id => targetable
                .into_iter()
                .filter(|id| {
                    self.registry
                        .get(*id)
                        .is_some_and(|instance| instance.template_id() == template_id)
                })
                .take(1)
                .collect::<Vec<_>>(),
        };
        if targets.is_empty() {
            self.dispatch_event(&DispatchableEvent::Warning(format!(
                "no target matching '{target}' at {}",
                self.clock.now()
            )));
        }
        targets
    }

    fn perform(&mut self, action: ScriptedKind) -> anyhow::Result<()> {
        self.dispatch_log(format!("scripted {action:?}"));
        match action {
            ScriptedKind::Gain { force, amount } => {
                self.gain(force, amount);
            }
            ScriptedKind::Spend { force, amount } => {
                if !self.spend(force, amount) {
                    self.dispatch_event(&DispatchableEvent::Warning(format!(
                        "unable to spend {amount} {force}"
                    )));
                }
            }
            ScriptedKind::Hit {
                target,
                damage,
                pierce,
                force,
            } => {
                for id in self.scripted_targets(&target) {
                    if !self.registry.get(id).is_some_and(AdversaryInstance::is_alive) {
                        continue;
                    }
                    let outcome = self.apply_hit(id, Hit { damage, pierce })?;
                    self.observe(PlayerAction::Damage {
                        force,
                        amount: outcome.applied,
                    });
                }
            }
            ScriptedKind::Execute { target } => {
                for id in self.scripted_targets(&target) {
                    self.observe(PlayerAction::ExecutionAttempt);
                    self.execute(id)?;
                }
            }
            ScriptedKind::Heal { target, amount } => {
                for id in self.scripted_targets(&target) {
                    self.heal(id, amount)?;
                }
            }
            ScriptedKind::PlayCard => self.observe(PlayerAction::CardPlayed),
            ScriptedKind::Observe { observed } => self.observe(observed),
        }
        Ok(())
    }

    fn run_script(&mut self, tick: u64) {
        let actions = self
            .script
            .iter()
            .filter(|scripted| scripted.tick == tick)
            .map(|scripted| scripted.action.clone())
            .collect::<Vec<_>>();
        for action in actions {
            if self.clock.is_terminated() {
                break;
            }
            self.perform(action)
                .inspect_err(|error| {
                    self.dispatch_event(&DispatchableEvent::Error(format!("{error}")))
                })
                .ok();
        }
    }

    fn drive(mut self) -> EncounterResult {
        for instance in self.registry.iter() {
            self.dispatch_log(format!(
                "registered gremlin {} with id {}",
                instance.template.display_name, instance.id
            ));
        }
        let t_start = Instant::now();

        self.run_script(0);
        while !self.clock.is_terminated() && self.clock.now().0 < self.max_ticks {
            let now = self.advance();
            self.run_script(now.0);
        }

        let inner = EncounterResultInner {
            source: self.source.clone(),
            duration: Instant::now() - t_start,
            ticks: self.clock.now(),
            survivors: self.registry.iter().map(InstanceSummary::from).collect(),
            resources: self.pool.snapshot(),
            events: self.events,
        };
        match self.registry.is_empty() {
            true => EncounterResult::Cleared(inner),
            false => EncounterResult::Timeout(inner),
        }
    }

    pub fn create_rng() -> StdRng {
        StdRng::from_rng(&mut rand::rng())
    }

    /// Runs a copy of this encounter to completion with the given rng.
    pub fn run_once_with_rng(&self, rng: StdRng) -> EncounterResult {
        let mut encounter = self.clone();
        encounter.rng = rng;
        encounter.drive()
    }

    /// Runs a copy of this encounter with its own seeded rng.
    pub fn run_once(&self) -> EncounterResult {
        self.clone().drive()
    }

    pub fn run(&self, iterations: usize) -> Vec<EncounterResult> {
        let mut rng = Self::create_rng();
        self.run_with_rng(iterations, &mut rng)
    }

    /// Runs `iterations` copies, each seeded from `rng`.
    pub fn run_with_rng(&self, iterations: usize, rng: &mut StdRng) -> Vec<EncounterResult> {
        (0..iterations)
            .map(|_| self.run_once_with_rng(StdRng::from_rng(&mut *rng)))
            .collect()
    }
}
