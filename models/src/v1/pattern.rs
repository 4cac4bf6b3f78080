/// How a gremlin's current move index evolves over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovePattern {
    Single,
    Sequence,
    Cycle,
    Random,
    HpBased,
    Adaptive,
}

impl MovePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovePattern::Single => "single",
            MovePattern::Sequence => "sequence",
            MovePattern::Cycle => "cycle",
            MovePattern::Random => "random",
            MovePattern::HpBased => "hp_based",
            MovePattern::Adaptive => "adaptive",
        }
    }

    /// Trigger limit for moves without an explicit transition.
    pub fn default_max_triggers(&self) -> u32 {
        match self {
            MovePattern::Sequence | MovePattern::Cycle | MovePattern::Random => 1,
            MovePattern::Single | MovePattern::HpBased | MovePattern::Adaptive => 0,
        }
    }
}

impl TryFrom<&str> for MovePattern {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "" | "single" | "passive" | "none" => Ok(MovePattern::Single),
            "sequence" => Ok(MovePattern::Sequence),
            "cycle" => Ok(MovePattern::Cycle),
            "random" => Ok(MovePattern::Random),
            "hp_based" | "dynamic_hp" => Ok(MovePattern::HpBased),
            "adaptive" => Ok(MovePattern::Adaptive),
            pattern => anyhow::bail!("invalid move pattern {pattern}"),
        }
    }
}

impl std::fmt::Display for MovePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
