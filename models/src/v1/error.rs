//! Load-time errors. A failure is fatal to the offending template only; the
//! bestiary keeps every template that validates.

/// A malformed move list, transition table or decision table.
///
/// `phase` is the 0-based index of the `|`-separated segment that failed and
/// `token` is the raw clause text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("phase {phase}: expected a leading `ticks=<interval>` clause, found {token:?}")]
    MissingTicks { phase: usize, token: String },
    #[error("phase {phase}: unknown effect key in {token:?}")]
    UnknownEffect { phase: usize, token: String },
    #[error("phase {phase}: invalid magnitude in {token:?}")]
    InvalidMagnitude { phase: usize, token: String },
    #[error("phase {phase}: {token:?} needs a value")]
    MissingValue { phase: usize, token: String },
    #[error("phase {phase}: flag {token:?} does not take a value")]
    UnexpectedValue { phase: usize, token: String },
    #[error("phase {phase}: malformed clause {token:?}")]
    MalformedClause { phase: usize, token: String },
    #[error("rule {phase}: invalid transition {token:?}")]
    InvalidTransition { phase: usize, token: String },
    #[error("rule {phase}: invalid adaptive rule {token:?}")]
    InvalidAdaptiveRule { phase: usize, token: String },
}

impl ParseError {
    pub fn phase(&self) -> usize {
        match self {
            ParseError::MissingTicks { phase, .. }
            | ParseError::UnknownEffect { phase, .. }
            | ParseError::InvalidMagnitude { phase, .. }
            | ParseError::MissingValue { phase, .. }
            | ParseError::UnexpectedValue { phase, .. }
            | ParseError::MalformedClause { phase, .. }
            | ParseError::InvalidTransition { phase, .. }
            | ParseError::InvalidAdaptiveRule { phase, .. } => *phase,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            ParseError::MissingTicks { token, .. }
            | ParseError::UnknownEffect { token, .. }
            | ParseError::InvalidMagnitude { token, .. }
            | ParseError::MissingValue { token, .. }
            | ParseError::UnexpectedValue { token, .. }
            | ParseError::MalformedClause { token, .. }
            | ParseError::InvalidTransition { token, .. }
            | ParseError::InvalidAdaptiveRule { token, .. } => token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationReason {
    #[error("moves: {0}")]
    Moves(ParseError),
    #[error("move_transitions: {0}")]
    Transitions(ParseError),
    #[error("adaptive_rules: {0}")]
    AdaptiveRules(ParseError),
    #[error("on_death: {0}")]
    OnDeath(ParseError),
    #[error("transition {from}>{to} references a move that does not exist")]
    UnknownMove { from: usize, to: usize },
    #[error("sequence transition {from}>{to} does not move forward")]
    BackwardTransition { from: usize, to: usize },
    #[error("summon references unknown template {0:?}")]
    UnknownSummon(String),
    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
    #[error("hp thresholds must strictly decrease, got {0:?}")]
    NonDecreasingThresholds(Vec<f64>),
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("duplicate template id")]
    Duplicate,
    #[error("unreadable bestiary document: {0}")]
    Document(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("template {template_id:?}: {reason}")]
pub struct ValidationError {
    pub template_id: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(template_id: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            template_id: template_id.into(),
            reason,
        }
    }
}
