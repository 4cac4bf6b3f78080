use std::str::FromStr;

use super::{
    ParseError, Percentage, AFTER_N_TICKS, AFTER_N_TRIGGERS, AT_PERCENT_HP, TRANSITION_RULE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionCondition {
    AfterTriggers(u32),
    AfterTicks(u32),
    AtHealth(Percentage),
    Automatic,
}

impl TransitionCondition {
    /// The trigger limit a move inherits from its explicit transition.
    pub fn implied_max_triggers(&self) -> u32 {
        match self {
            TransitionCondition::AfterTriggers(count) => *count,
            TransitionCondition::Automatic => 1,
            TransitionCondition::AfterTicks(_) | TransitionCondition::AtHealth(_) => 0,
        }
    }
}

impl TryFrom<&str> for TransitionCondition {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if matches!(value, "automatic" | "cycle") {
            return Ok(TransitionCondition::Automatic);
        }
        if let Some(captures) = AFTER_N_TRIGGERS.captures(value) {
            return Ok(TransitionCondition::AfterTriggers(captures[1].parse()?));
        }
        if let Some(captures) = AFTER_N_TICKS.captures(value) {
            return Ok(TransitionCondition::AfterTicks(captures[1].parse()?));
        }
        if let Some(captures) = AT_PERCENT_HP.captures(value) {
            let points: f64 = captures[1].parse()?;
            if points > 100.0 {
                anyhow::bail!("health threshold above 100%: {value}");
            }
            return Ok(TransitionCondition::AtHealth(
                Percentage::from_percentage_value(points),
            ));
        }
        anyhow::bail!("invalid transition condition {value}")
    }
}

impl std::fmt::Display for TransitionCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionCondition::AfterTriggers(count) => write!(f, "after_{count}_triggers"),
            TransitionCondition::AfterTicks(count) => write!(f, "after_{count}_ticks"),
            TransitionCondition::AtHealth(threshold) => {
                write!(f, "at_{}_percent_hp", threshold.as_percentage())
            }
            TransitionCondition::Automatic => write!(f, "automatic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next: usize,
    pub condition: TransitionCondition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRule {
    pub from: usize,
    pub transition: Transition,
}

/// `from>to:condition` rules separated by `|`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionTable(pub Vec<TransitionRule>);

impl TransitionTable {
    pub fn rules(&self) -> &[TransitionRule] {
        &self.0
    }

    /// Transitions whose target is `index`, used to derive hp thresholds.
    pub fn targeting(&self, index: usize) -> impl Iterator<Item = &TransitionRule> {
        self.0
            .iter()
            .filter(move |rule| rule.transition.next == index)
    }
}

impl FromStr for TransitionTable {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(TransitionTable::default());
        }

        trimmed
            .split('|')
            .enumerate()
            .map(|(rule_index, raw)| {
                let raw = raw.trim();
                let invalid = || ParseError::InvalidTransition {
                    phase: rule_index,
                    token: raw.to_string(),
                };
                let captures = TRANSITION_RULE.captures(raw).ok_or_else(invalid)?;
                let from = captures[1].parse().map_err(|_| invalid())?;
                let next = captures[2].parse().map_err(|_| invalid())?;
                let condition =
                    TransitionCondition::try_from(&captures[3]).map_err(|_| invalid())?;
                Ok(TransitionRule {
                    from,
                    transition: Transition { next, condition },
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(TransitionTable)
    }
}

impl std::fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rules = self
            .0
            .iter()
            .map(|rule| {
                format!(
                    "{}>{}:{}",
                    rule.from, rule.transition.next, rule.transition.condition
                )
            })
            .collect::<Vec<_>>();
        write!(f, "{}", rules.join("|"))
    }
}
