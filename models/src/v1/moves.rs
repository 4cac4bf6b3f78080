use std::str::FromStr;

use super::{Effect, ParseError, Transition, TransitionCondition, INTEGER_REGEX};

/// One phase of a gremlin's behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub index: usize,
    /// Ticks between firings. Zero marks a passive move.
    pub interval: u32,
    /// Zero means unlimited while the move is current.
    pub max_triggers: u32,
    pub effects: Vec<Effect>,
    pub transition: Option<Transition>,
}

impl Move {
    pub fn is_passive(&self) -> bool {
        self.interval == 0
    }

    /// Whether the move has run its course given its counters.
    ///
    /// An explicit transition decides on its own; otherwise the move is done
    /// once it has fired `max_triggers` times.
    pub fn is_complete(&self, triggers: u32, ticks_in_move: u64, health_fraction: f64) -> bool {
        match self.transition.map(|transition| transition.condition) {
            Some(TransitionCondition::AfterTriggers(count)) => triggers >= count,
            Some(TransitionCondition::AfterTicks(count)) => ticks_in_move >= count as u64,
            Some(TransitionCondition::AtHealth(threshold)) => {
                health_fraction <= threshold.as_fraction()
            }
            Some(TransitionCondition::Automatic) => triggers >= 1,
            None => self.max_triggers != 0 && triggers >= self.max_triggers,
        }
    }

    fn parse_phase(phase: usize, segment: &str) -> Result<Move, ParseError> {
        let mut clauses = segment.split(',');
        let first = clauses.next().unwrap_or_default().trim();
        let missing_ticks = || ParseError::MissingTicks {
            phase,
            token: first.to_string(),
        };

        let (key, value) = first.split_once('=').ok_or_else(missing_ticks)?;
        if key.trim() != "ticks" {
            return Err(missing_ticks());
        }
        let value = value.trim();
        let interval = INTEGER_REGEX
            .is_match(value)
            .then(|| value.parse::<u32>().ok())
            .flatten()
            .ok_or_else(|| ParseError::InvalidMagnitude {
                phase,
                token: first.to_string(),
            })?;

        let effects = clauses
            .map(|clause| Effect::parse_clause(phase, clause))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Move {
            index: phase,
            interval,
            max_triggers: 0,
            effects,
            transition: None,
        })
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ticks={}", self.interval)?;
        for effect in &self.effects {
            write!(f, ",{effect}")?;
        }
        Ok(())
    }
}

/// Ordered moves parsed from the `|`-separated move DSL.
///
/// ```
/// use models::v1::MoveList;
///
/// let moves: MoveList = "ticks=8,drain_momentum=2 | ticks=6,drain_momentum=3".parse().unwrap();
/// assert_eq!(moves.len(), 2);
/// assert_eq!(moves.to_string(), "ticks=8,drain_momentum=2|ticks=6,drain_momentum=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveList(pub Vec<Move>);

impl MoveList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Move> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn effects(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter().flat_map(|mv| mv.effects.iter())
    }
}

impl FromStr for MoveList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(MoveList::default());
        }

        trimmed
            .split('|')
            .enumerate()
            .map(|(phase, segment)| Move::parse_phase(phase, segment))
            .collect::<Result<Vec<_>, _>>()
            .map(MoveList)
    }
}

impl std::fmt::Display for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phases = self.0.iter().map(Move::to_string).collect::<Vec<_>>();
        write!(f, "{}", phases.join("|"))
    }
}
