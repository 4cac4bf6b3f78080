use std::sync::Arc;

use indexmap::IndexMap;
use models::v1::{AdversaryTemplate, SizeCategory, SummonPosition, TargetProtection};

use crate::{AdversaryInstance, InstanceId, InstanceIdAllocator, Ticks};

/// Every live gremlin in board order, top first.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    instances: IndexMap<InstanceId, AdversaryInstance>,
    ids: InstanceIdAllocator,
}

impl Registry {
    pub fn spawn(
        &mut self,
        template: Arc<AdversaryTemplate>,
        at: Ticks,
        position: SummonPosition,
        summoner: Option<InstanceId>,
    ) -> InstanceId {
        let id = self.ids.allocate();
        let instance = AdversaryInstance::spawn(id, template, at, summoner);
        match position {
            SummonPosition::Top => {
                self.instances.shift_insert(0, id, instance);
            }
            SummonPosition::Bottom => {
                self.instances.insert(id, instance);
            }
        }
        id
    }

    /// Whether `summoner` may add another summon under its template's cap.
    pub fn can_summon(&self, summoner: InstanceId) -> bool {
        let Some(instance) = self.instances.get(&summoner) else {
            return false;
        };
        match instance.template.targeting.summon_cap {
            Some(cap) => self.live_summons(summoner) < cap as usize,
            None => true,
        }
    }

    pub fn live_summons(&self, summoner: InstanceId) -> usize {
        self.instances
            .values()
            .filter(|instance| instance.summoner == Some(summoner) && instance.is_alive())
            .count()
    }

    pub fn get(&self, id: InstanceId) -> Option<&AdversaryInstance> {
        self.instances.get(&id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut AdversaryInstance> {
        self.instances.get_mut(&id)
    }

    pub fn remove(&mut self, id: InstanceId) -> Option<AdversaryInstance> {
        self.instances.shift_remove(&id)
    }

    /// Snapshot of ids in board order, safe to hold across mutation.
    pub fn ids(&self) -> Vec<InstanceId> {
        self.instances.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdversaryInstance> {
        self.instances.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut AdversaryInstance> {
        self.instances.values_mut()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn by_template<'a>(
        &'a self,
        template_id: &'a str,
    ) -> impl Iterator<Item = &'a AdversaryInstance> {
        self.iter()
            .filter(move |instance| instance.template_id() == template_id)
    }

    pub fn by_size(&self, size: SizeCategory) -> impl Iterator<Item = &AdversaryInstance> {
        self.iter()
            .filter(move |instance| instance.template.size == size)
    }

    pub fn is_targetable(&self, id: InstanceId) -> bool {
        let Some(instance) = self.instances.get(&id) else {
            return false;
        };
        if !instance.is_alive() {
            return false;
        }
        match instance.template.targeting.protection {
            TargetProtection::Targetable => true,
            TargetProtection::Never => false,
            TargetProtection::WhileOtherGremlinsExist => !self
                .iter()
                .any(|other| other.id != id && other.is_alive()),
            TargetProtection::WhileSummonsAlive => self.live_summons(id) == 0,
        }
    }

    /// Instances the player may currently target, in board order.
    pub fn targetable(&self) -> Vec<InstanceId> {
        self.instances
            .keys()
            .copied()
            .filter(|id| self.is_targetable(*id))
            .collect()
    }

    /// Instances whose health has run out but that have not been pruned yet.
    pub fn dead(&self) -> Vec<InstanceId> {
        self.iter()
            .filter(|instance| !instance.is_alive())
            .map(|instance| instance.id)
            .collect()
    }
}
