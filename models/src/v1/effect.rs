use super::{
    ForceSelector, ForceType, ParseError, Percentage, SizeCategory, CAP_FORCE, DECAY_FORCE,
    DRAIN_FORCE, IDENTIFIER_REGEX, INTEGER_REGEX, PERCENT_REGEX, SUMMON_RANDOM_SIZE,
};

/// What a `summon=` clause creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SummonSpec {
    Named(String),
    /// `random_<size>`: any other template of that size category.
    RandomOfSize(SizeCategory),
}

impl SummonSpec {
    fn parse(value: &str) -> Option<SummonSpec> {
        if let Some(captures) = SUMMON_RANDOM_SIZE.captures(value) {
            let size = SizeCategory::try_from(captures.get(1)?.as_str()).ok()?;
            return Some(SummonSpec::RandomOfSize(size));
        }
        IDENTIFIER_REGEX
            .is_match(value)
            .then(|| SummonSpec::Named(value.to_string()))
    }
}

impl std::fmt::Display for SummonSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummonSpec::Named(id) => write!(f, "{id}"),
            SummonSpec::RandomOfSize(size) => write!(f, "random_{size}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetScope {
    Player,
    AllAdversaries,
    This,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Magnitude {
    None,
    Amount(u32),
    /// Percentage points as written, `12.5%` is `Percent(12.5)`.
    Percent(f64),
}

impl Magnitude {
    pub fn amount(&self) -> u32 {
        match self {
            Magnitude::None => 0,
            Magnitude::Amount(amount) => *amount,
            Magnitude::Percent(points) => points.round() as u32,
        }
    }

    /// Integer magnitudes count as percentage points.
    pub fn as_percentage(&self) -> Percentage {
        match self {
            Magnitude::None => Percentage::default(),
            Magnitude::Amount(points) => Percentage::from_percentage_value(*points as f64),
            Magnitude::Percent(points) => Percentage::from_percentage_value(*points),
        }
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Magnitude::None => Ok(()),
            Magnitude::Amount(amount) => write!(f, "{amount}"),
            Magnitude::Percent(points) => write!(f, "{points}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    Drain,
    Decay,
    HardCap,
    SoftCap,
    TotalHardCap,
    Summon(SummonSpec),
    GainArmor,
    GainShields,
    ReflectIncrease,
    AmplifyDrains,
    ForceDiscard,
    CardCostPenalty,
    HandSizeLimit,
    NoCardDraw,
    ShuffleHand,
    CopyLastCard,
    RemoveConstraints,
    /// Re-installs every cap the source has installed so far.
    ReinstateConstraints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueShape {
    Amount,
    AmountOrPercent,
    Flag,
}

type Classified = (EffectKind, TargetScope, Option<ForceSelector>, ValueShape);

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub scope: TargetScope,
    pub forces: Option<ForceSelector>,
    pub magnitude: Magnitude,
}

impl Effect {
    /// Parses one `key=value` (or bare flag) clause of phase `phase`.
    pub fn parse_clause(phase: usize, token: &str) -> Result<Effect, ParseError> {
        let raw = token.trim();
        let (key, value) = match raw.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (raw, None),
        };
        let err_token = raw.to_string();
        if key.is_empty() || value.is_some_and(str::is_empty) {
            return Err(ParseError::MalformedClause {
                phase,
                token: err_token,
            });
        }

        if key == "summon" {
            let value = value.ok_or_else(|| ParseError::MissingValue {
                phase,
                token: err_token.clone(),
            })?;
            let spec = SummonSpec::parse(value).ok_or_else(|| ParseError::InvalidMagnitude {
                phase,
                token: err_token.clone(),
            })?;
            return Ok(Effect {
                kind: EffectKind::Summon(spec),
                scope: TargetScope::This,
                forces: None,
                magnitude: Magnitude::None,
            });
        }

        let (kind, scope, forces, shape) =
            Self::classify(key).ok_or_else(|| ParseError::UnknownEffect {
                phase,
                token: err_token.clone(),
            })?;
        let magnitude = match (shape, value) {
            (ValueShape::Flag, None) => Some(Magnitude::None),
            (ValueShape::Flag, Some(_)) => {
                return Err(ParseError::UnexpectedValue {
                    phase,
                    token: err_token,
                });
            }
            (_, None) => {
                return Err(ParseError::MissingValue {
                    phase,
                    token: err_token,
                });
            }
            (ValueShape::Amount, Some(value)) => parse_amount(value),
            (ValueShape::AmountOrPercent, Some(value)) => {
                parse_amount(value).or_else(|| parse_percent(value))
            }
        }
        .ok_or_else(|| ParseError::InvalidMagnitude {
            phase,
            token: raw.to_string(),
        })?;

        Ok(Effect {
            kind,
            scope,
            forces,
            magnitude,
        })
    }

    /// Parses a comma separated effect list without a `ticks=` clause, as used
    /// by on-death effects.
    pub fn parse_list(phase: usize, input: &str) -> Result<Vec<Effect>, ParseError> {
        if input.trim().is_empty() {
            return Ok(vec![]);
        }
        input
            .split(',')
            .map(|clause| Effect::parse_clause(phase, clause))
            .collect()
    }

    fn classify(key: &str) -> Option<Classified> {
        use EffectKind::*;
        use ForceSelector::{All, Largest, Random, Smallest};
        use TargetScope::{AllAdversaries, Player, This};
        use ValueShape::{Amount, AmountOrPercent, Flag};

        let classified = match key {
            "drain_largest" | "drain_highest" => (Drain, Player, Some(Largest), Amount),
            "drain_smallest" | "drain_lowest" => (Drain, Player, Some(Smallest), Amount),
            "drain_random" => (Drain, Player, Some(Random), Amount),
            "drain_all_types" => (Drain, Player, Some(All), Amount),
            "all_forces_decay" => (Decay, Player, Some(All), Amount),
            "all_forces_hard_cap" => (HardCap, Player, Some(All), Amount),
            "max_resource_hard_cap" => (HardCap, Player, Some(Largest), Amount),
            "random_force_hard_cap" => (HardCap, Player, Some(Random), Amount),
            "all_forces_soft_cap" => (SoftCap, Player, Some(All), Amount),
            "max_resource_soft_cap" => (SoftCap, Player, Some(Largest), Amount),
            "random_force_soft_cap" => (SoftCap, Player, Some(Random), Amount),
            "total_resources_hard_cap" => (TotalHardCap, Player, None, Amount),
            "self_gain_armor" => (GainArmor, This, None, Amount),
            "all_gremlins_gain_armor" => (GainArmor, AllAdversaries, None, Amount),
            "self_gain_shields" => (GainShields, This, None, Amount),
            "all_gremlins_gain_shields" => (GainShields, AllAdversaries, None, Amount),
            "reflect_increase" => (ReflectIncrease, This, None, AmountOrPercent),
            "amplify_drains" => (AmplifyDrains, Player, None, Amount),
            "force_discard" => (ForceDiscard, Player, None, Amount),
            "card_cost_penalty" => (CardCostPenalty, Player, None, Amount),
            "hand_size_limit" => (HandSizeLimit, Player, None, Amount),
            "no_card_draw" | "no_draw" => (NoCardDraw, Player, None, Flag),
            "shuffle_hand" => (ShuffleHand, Player, None, Flag),
            "copy_recent_card_effect" => (CopyLastCard, Player, None, Flag),
            "remove_constraints" => (RemoveConstraints, Player, None, Flag),
            "all_previous_constraints" => (ReinstateConstraints, This, None, Flag),
            key => return Self::classify_force_key(key),
        };
        Some(classified)
    }

    fn classify_force_key(key: &str) -> Option<Classified> {
        let fixed = |name: &str| ForceType::try_from(name).ok().map(ForceSelector::Fixed);

        if let Some(captures) = DRAIN_FORCE.captures(key) {
            let forces = fixed(captures.get(1)?.as_str())?;
            return Some((
                EffectKind::Drain,
                TargetScope::Player,
                Some(forces),
                ValueShape::Amount,
            ));
        }
        if let Some(captures) = DECAY_FORCE.captures(key) {
            let forces = fixed(captures.get(1)?.as_str())?;
            return Some((
                EffectKind::Decay,
                TargetScope::Player,
                Some(forces),
                ValueShape::Amount,
            ));
        }
        if let Some(captures) = CAP_FORCE.captures(key) {
            let forces = fixed(captures.get(1)?.as_str())?;
            let kind = match captures.get(2)?.as_str() {
                "hard" => EffectKind::HardCap,
                _ => EffectKind::SoftCap,
            };
            return Some((kind, TargetScope::Player, Some(forces), ValueShape::Amount));
        }
        None
    }

    /// Standing effects install overlays instead of mutating amounts, so
    /// re-applying them every tick is idempotent.
    pub fn is_standing(&self) -> bool {
        matches!(
            self.kind,
            EffectKind::HardCap
                | EffectKind::SoftCap
                | EffectKind::TotalHardCap
                | EffectKind::AmplifyDrains
                | EffectKind::CardCostPenalty
                | EffectKind::HandSizeLimit
                | EffectKind::NoCardDraw
        )
    }

    /// Effects a passive move keeps re-evaluating every tick it is held.
    /// Everything else resolves once, when the move is entered.
    pub fn is_continuous(&self) -> bool {
        self.is_standing() || matches!(self.kind, EffectKind::Drain | EffectKind::Decay)
    }

    pub fn summon_spec(&self) -> Option<&SummonSpec> {
        match &self.kind {
            EffectKind::Summon(spec) => Some(spec),
            _ => None,
        }
    }

    /// Canonical DSL key; aliases such as `drain_highest` normalize here.
    pub fn key(&self) -> String {
        use ForceSelector::{Fixed, Largest, Random, Smallest};

        let key = match (&self.kind, self.forces) {
            (EffectKind::Drain, Some(Fixed(force))) => return format!("drain_{force}"),
            (EffectKind::Drain, Some(Largest)) => "drain_largest",
            (EffectKind::Drain, Some(Smallest)) => "drain_smallest",
            (EffectKind::Drain, Some(Random)) => "drain_random",
            (EffectKind::Drain, _) => "drain_all_types",
            (EffectKind::Decay, Some(Fixed(force))) => return format!("{force}_decay"),
            (EffectKind::Decay, _) => "all_forces_decay",
            (EffectKind::HardCap, Some(Fixed(force))) => return format!("{force}_hard_cap"),
            (EffectKind::HardCap, Some(Largest)) => "max_resource_hard_cap",
            (EffectKind::HardCap, Some(Random)) => "random_force_hard_cap",
            (EffectKind::HardCap, _) => "all_forces_hard_cap",
            (EffectKind::SoftCap, Some(Fixed(force))) => return format!("{force}_soft_cap"),
            (EffectKind::SoftCap, Some(Largest)) => "max_resource_soft_cap",
            (EffectKind::SoftCap, Some(Random)) => "random_force_soft_cap",
            (EffectKind::SoftCap, _) => "all_forces_soft_cap",
            (EffectKind::TotalHardCap, _) => "total_resources_hard_cap",
            (EffectKind::Summon(_), _) => "summon",
            (EffectKind::GainArmor, _) if self.scope == TargetScope::AllAdversaries => {
                "all_gremlins_gain_armor"
            }
            (EffectKind::GainArmor, _) => "self_gain_armor",
            (EffectKind::GainShields, _) if self.scope == TargetScope::AllAdversaries => {
                "all_gremlins_gain_shields"
            }
            (EffectKind::GainShields, _) => "self_gain_shields",
            (EffectKind::ReflectIncrease, _) => "reflect_increase",
            (EffectKind::AmplifyDrains, _) => "amplify_drains",
            (EffectKind::ForceDiscard, _) => "force_discard",
            (EffectKind::CardCostPenalty, _) => "card_cost_penalty",
            (EffectKind::HandSizeLimit, _) => "hand_size_limit",
            (EffectKind::NoCardDraw, _) => "no_card_draw",
            (EffectKind::ShuffleHand, _) => "shuffle_hand",
            (EffectKind::CopyLastCard, _) => "copy_recent_card_effect",
            (EffectKind::RemoveConstraints, _) => "remove_constraints",
            (EffectKind::ReinstateConstraints, _) => "all_previous_constraints",
        };
        key.to_string()
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, self.magnitude) {
            (EffectKind::Summon(spec), _) => write!(f, "summon={spec}"),
            (_, Magnitude::None) => write!(f, "{}", self.key()),
            (_, magnitude) => write!(f, "{}={magnitude}", self.key()),
        }
    }
}

fn parse_amount(value: &str) -> Option<Magnitude> {
    if !INTEGER_REGEX.is_match(value) {
        return None;
    }
    value.parse::<u32>().ok().map(Magnitude::Amount)
}

fn parse_percent(value: &str) -> Option<Magnitude> {
    let captures = PERCENT_REGEX.captures(value)?;
    let points = captures.get(1)?.as_str().parse::<f64>().ok()?;
    (points <= 100.0).then_some(Magnitude::Percent(points))
}
