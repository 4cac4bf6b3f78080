use serde::Deserialize;

/// A player resource type. Declaration order breaks every tie.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ForceType {
    Heat,
    Precision,
    Momentum,
    Balance,
    Entropy,
}

impl ForceType {
    pub const ALL: [ForceType; 5] = [
        ForceType::Heat,
        ForceType::Precision,
        ForceType::Momentum,
        ForceType::Balance,
        ForceType::Entropy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ForceType::Heat => "heat",
            ForceType::Precision => "precision",
            ForceType::Momentum => "momentum",
            ForceType::Balance => "balance",
            ForceType::Entropy => "entropy",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl TryFrom<&str> for ForceType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "heat" => Ok(ForceType::Heat),
            "precision" => Ok(ForceType::Precision),
            "momentum" => Ok(ForceType::Momentum),
            "balance" => Ok(ForceType::Balance),
            "entropy" => Ok(ForceType::Entropy),
            force => anyhow::bail!("invalid force type {force}"),
        }
    }
}

impl std::fmt::Display for ForceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which force types an effect touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceSelector {
    Fixed(ForceType),
    All,
    /// Largest current amount among types present.
    Largest,
    /// Smallest current amount among types present.
    Smallest,
    Random,
}

impl std::fmt::Display for ForceSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForceSelector::Fixed(force) => write!(f, "{force}"),
            ForceSelector::All => write!(f, "all"),
            ForceSelector::Largest => write!(f, "largest"),
            ForceSelector::Smallest => write!(f, "smallest"),
            ForceSelector::Random => write!(f, "random"),
        }
    }
}
