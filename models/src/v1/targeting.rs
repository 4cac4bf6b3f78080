#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetProtection {
    #[default]
    Targetable,
    Never,
    WhileOtherGremlinsExist,
    WhileSummonsAlive,
}

impl TargetProtection {
    /// Resolves the record's pair of targeting columns. A condition only
    /// matters for gremlins that are not freely targetable.
    pub fn from_record(can_be_targeted: bool, condition: &str) -> anyhow::Result<Self> {
        match (can_be_targeted, condition.trim()) {
            (true, _) => Ok(TargetProtection::Targetable),
            (false, "" | "never") => Ok(TargetProtection::Never),
            (false, condition) => TargetProtection::try_from(condition),
        }
    }
}

impl TryFrom<&str> for TargetProtection {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "targetable" => Ok(TargetProtection::Targetable),
            "never" => Ok(TargetProtection::Never),
            "while_other_gremlins_exist" => Ok(TargetProtection::WhileOtherGremlinsExist),
            "while_summons_alive" => Ok(TargetProtection::WhileSummonsAlive),
            condition => anyhow::bail!("invalid target protection {condition}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SummonPosition {
    Top,
    #[default]
    Bottom,
}

impl TryFrom<&str> for SummonPosition {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "top" => Ok(SummonPosition::Top),
            "" | "bottom" => Ok(SummonPosition::Bottom),
            position => anyhow::bail!("invalid summon position {position}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Targeting {
    pub protection: TargetProtection,
    pub summon_position: SummonPosition,
    /// `None` when the gremlin may summon without limit.
    pub summon_cap: Option<u32>,
}
