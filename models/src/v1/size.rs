use serde::Deserialize;

#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Gnat,
    Small,
    Medium,
    Large,
    Elite,
    Boss,
}

impl SizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Gnat => "gnat",
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
            SizeCategory::Elite => "elite",
            SizeCategory::Boss => "boss",
        }
    }
}

impl TryFrom<&str> for SizeCategory {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "gnat" => Ok(SizeCategory::Gnat),
            "small" => Ok(SizeCategory::Small),
            "medium" => Ok(SizeCategory::Medium),
            "large" => Ok(SizeCategory::Large),
            "elite" => Ok(SizeCategory::Elite),
            "boss" => Ok(SizeCategory::Boss),
            size => anyhow::bail!("invalid size {size}"),
        }
    }
}

impl std::fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
