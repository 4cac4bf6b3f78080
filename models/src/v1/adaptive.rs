use super::{ForceType, ParseError, ADAPTIVE_RULE};

/// A player-behavior counter that adaptive gremlins react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservedCounter {
    Damage(ForceType),
    TotalDamage,
    ExecutionAttempts,
    AdversaryKills,
    CardsPlayed,
}

impl TryFrom<&str> for ObservedCounter {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "damage_total" => Ok(ObservedCounter::TotalDamage),
            "execution_attempts" => Ok(ObservedCounter::ExecutionAttempts),
            "gremlin_kills" => Ok(ObservedCounter::AdversaryKills),
            "cards_played" => Ok(ObservedCounter::CardsPlayed),
            counter => match counter.strip_prefix("damage_") {
                Some(force) => Ok(ObservedCounter::Damage(ForceType::try_from(force)?)),
                None => anyhow::bail!("invalid observed counter {counter}"),
            },
        }
    }
}

impl std::fmt::Display for ObservedCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservedCounter::Damage(force) => write!(f, "damage_{force}"),
            ObservedCounter::TotalDamage => write!(f, "damage_total"),
            ObservedCounter::ExecutionAttempts => write!(f, "execution_attempts"),
            ObservedCounter::AdversaryKills => write!(f, "gremlin_kills"),
            ObservedCounter::CardsPlayed => write!(f, "cards_played"),
        }
    }
}

/// Anything that can answer "how much of this happened".
pub trait CounterSource {
    fn count(&self, counter: ObservedCounter) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveRule {
    pub counter: ObservedCounter,
    pub threshold: u64,
    pub move_index: usize,
}

impl AdaptiveRule {
    pub fn matches(&self, source: &impl CounterSource) -> bool {
        source.count(self.counter) >= self.threshold
    }
}

/// Ordered decision table, evaluated every `check_interval` ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdaptiveTable {
    pub check_interval: u32,
    pub rules: Vec<AdaptiveRule>,
}

impl AdaptiveTable {
    /// Parses `counter>=threshold:move` rules separated by `|`.
    pub fn parse(check_interval: u32, rules: &str) -> Result<AdaptiveTable, ParseError> {
        let trimmed = rules.trim();
        let rules = if trimmed.is_empty() {
            vec![]
        } else {
            trimmed
                .split('|')
                .enumerate()
                .map(|(rule_index, raw)| {
                    let raw = raw.trim();
                    let invalid = || ParseError::InvalidAdaptiveRule {
                        phase: rule_index,
                        token: raw.to_string(),
                    };
                    let captures = ADAPTIVE_RULE.captures(raw).ok_or_else(invalid)?;
                    Ok(AdaptiveRule {
                        counter: ObservedCounter::try_from(&captures[1]).map_err(|_| invalid())?,
                        threshold: captures[2].parse().map_err(|_| invalid())?,
                        move_index: captures[3].parse().map_err(|_| invalid())?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(AdaptiveTable {
            check_interval,
            rules,
        })
    }

    /// First matching rule wins, the opening move otherwise.
    pub fn select(&self, source: &impl CounterSource) -> usize {
        self.rules
            .iter()
            .find(|rule| rule.matches(source))
            .map(|rule| rule.move_index)
            .unwrap_or(0)
    }
}

impl std::fmt::Display for AdaptiveTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self
            .rules
            .iter()
            .map(|rule| format!("{}>={}:{}", rule.counter, rule.threshold, rule.move_index))
            .collect::<Vec<_>>();
        write!(f, "{}", rules.join("|"))
    }
}
