use crate::{AdversaryInstance, InstanceId, Ticks};

#[derive(Clone, Debug)]
pub struct InstanceSummary {
    pub id: InstanceId,
    pub template_id: String,
    pub name: String,
    pub health: u32,
}

impl std::fmt::Display for InstanceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Gremlin<id={}, template={}, name={}, health={}>",
            self.id, self.template_id, self.name, self.health
        )
    }
}

impl From<&AdversaryInstance> for InstanceSummary {
    fn from(value: &AdversaryInstance) -> Self {
        Self {
            id: value.id,
            template_id: value.template.id.clone(),
            name: value.template.display_name.clone(),
            health: value.health.current(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum DispatchableEvent {
    Log(String),
    Error(String),
    Warning(String),
    Tick(Ticks),
    SummonBlocked(InstanceSummary, String),
    InstanceDied(InstanceSummary, Ticks),
}
