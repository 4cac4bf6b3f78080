use heck::ToTitleCase;

use super::{
    AdaptiveTable, Effect, MoveList, MovePattern, Percentage, SizeCategory, SummonPosition,
    SummonSpec, TargetProtection, Targeting, TemplateRecord, TransitionCondition,
    TransitionTable, ValidationError, ValidationReason, IDENTIFIER_REGEX,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BaseStats {
    pub max_health: u32,
    pub armor: u32,
    pub shields: u32,
    pub shield_regen: u32,
    pub shield_regen_max: u32,
    pub barrier_count: u32,
    pub damage_cap: Option<u32>,
    pub reflect: Percentage,
    /// Executes only land at or below this health.
    pub execute_immunity_threshold: Option<u32>,
}

/// A validated, immutable gremlin definition.
#[derive(Debug, Clone, PartialEq)]
pub struct AdversaryTemplate {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub archetype: String,
    pub size: SizeCategory,
    pub stats: BaseStats,
    pub targeting: Targeting,
    pub moves: MoveList,
    pub pattern: MovePattern,
    /// Entry threshold per move for `hp_based` gremlins, index 0 is always full health.
    pub hp_thresholds: Vec<Percentage>,
    /// Relative weight per move for `random` gremlins, empty for uniform.
    pub weights: Vec<u32>,
    pub adaptive: Option<AdaptiveTable>,
    pub on_death: Vec<Effect>,
}

impl AdversaryTemplate {
    /// Every summon this template can perform, including on death.
    pub fn summons(&self) -> impl Iterator<Item = &SummonSpec> {
        self.moves
            .effects()
            .chain(self.on_death.iter())
            .filter_map(Effect::summon_spec)
    }

    pub fn hp_threshold(&self, index: usize) -> Option<Percentage> {
        self.hp_thresholds.get(index).copied()
    }
}

impl std::fmt::Display for AdversaryTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, {} hp, {})",
            self.display_name, self.size, self.stats.max_health, self.pattern
        )
    }
}

impl TryFrom<&TemplateRecord> for AdversaryTemplate {
    type Error = ValidationError;

    fn try_from(record: &TemplateRecord) -> Result<Self, Self::Error> {
        let id = record.template_id.trim().to_string();
        let fail = |reason: ValidationReason| ValidationError::new(id.clone(), reason);
        let invalid = |field: &'static str, value: &dyn ToString| {
            fail(ValidationReason::InvalidField {
                field,
                value: value.to_string(),
            })
        };

        if id.is_empty() {
            return Err(fail(ValidationReason::MissingField("template_id")));
        }
        if !IDENTIFIER_REGEX.is_match(&id) {
            return Err(invalid("template_id", &id));
        }
        if record.max_health == 0 {
            return Err(invalid("max_health", &record.max_health));
        }
        if record.reflect_percent > 100 {
            return Err(invalid("reflect_percent", &record.reflect_percent));
        }

        let size = SizeCategory::try_from(record.size_category.as_str())
            .map_err(|_| invalid("size_category", &record.size_category))?;
        let pattern = MovePattern::try_from(record.move_pattern.as_str())
            .map_err(|_| invalid("move_pattern", &record.move_pattern))?;
        let protection = TargetProtection::from_record(
            record.can_be_targeted,
            &record.target_protection_condition,
        )
        .map_err(|_| invalid("target_protection_condition", &record.target_protection_condition))?;
        let summon_position = SummonPosition::try_from(record.summon_position.as_str())
            .map_err(|_| invalid("summon_position", &record.summon_position))?;

        let mut moves: MoveList = record
            .moves
            .parse()
            .map_err(|err| fail(ValidationReason::Moves(err)))?;
        let transitions: TransitionTable = record
            .move_transitions
            .parse()
            .map_err(|err| fail(ValidationReason::Transitions(err)))?;
        let on_death = Effect::parse_list(0, &record.on_death)
            .map_err(|err| fail(ValidationReason::OnDeath(err)))?;

        for rule in transitions.rules() {
            let (from, to) = (rule.from, rule.transition.next);
            if from >= moves.len() || to >= moves.len() {
                return Err(fail(ValidationReason::UnknownMove { from, to }));
            }
            if pattern == MovePattern::Sequence && to <= from {
                return Err(fail(ValidationReason::BackwardTransition { from, to }));
            }
        }

        for mv in moves.0.iter_mut() {
            mv.transition = transitions
                .rules()
                .iter()
                .rev()
                .find(|rule| rule.from == mv.index)
                .map(|rule| rule.transition);
            mv.max_triggers = match mv.transition {
                Some(transition) => transition.condition.implied_max_triggers(),
                None => pattern.default_max_triggers(),
            };
        }

        let hp_thresholds = match pattern {
            MovePattern::HpBased => {
                let thresholds = derive_hp_thresholds(&moves, &transitions);
                let strictly_decreasing = thresholds
                    .windows(2)
                    .skip(1)
                    .all(|pair| pair[0] > pair[1]);
                if !strictly_decreasing {
                    return Err(fail(ValidationReason::NonDecreasingThresholds(
                        thresholds.iter().map(Percentage::as_percentage).collect(),
                    )));
                }
                thresholds
            }
            _ => vec![],
        };

        let weights = parse_weights(&record.move_weights, moves.len())
            .ok_or_else(|| invalid("move_weights", &record.move_weights))?;

        let adaptive = match pattern {
            MovePattern::Adaptive => {
                if record.adaptive_check_ticks == 0 {
                    return Err(fail(ValidationReason::MissingField("adaptive_check_ticks")));
                }
                let table =
                    AdaptiveTable::parse(record.adaptive_check_ticks, &record.adaptive_rules)
                        .map_err(|err| fail(ValidationReason::AdaptiveRules(err)))?;
                if table.rules.iter().any(|rule| rule.move_index >= moves.len()) {
                    return Err(invalid("adaptive_rules", &record.adaptive_rules));
                }
                Some(table)
            }
            _ => None,
        };

        let display_name = record
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.to_title_case());

        Ok(AdversaryTemplate {
            display_name,
            description: record.description.clone(),
            archetype: record.archetype.clone(),
            size,
            stats: BaseStats {
                max_health: record.max_health,
                armor: record.max_armor,
                shields: record.max_shields,
                shield_regen: record.shield_regen,
                shield_regen_max: record.shield_regen_max,
                barrier_count: match record.has_barrier {
                    true => record.barrier_count.max(1),
                    false => 0,
                },
                damage_cap: (record.damage_cap > 0).then_some(record.damage_cap),
                reflect: Percentage::from_percentage_value(record.reflect_percent as f64),
                execute_immunity_threshold: (record.execute_immunity_threshold > 0)
                    .then_some(record.execute_immunity_threshold),
            },
            targeting: Targeting {
                protection,
                summon_position,
                summon_cap: (record.summon_cap > 0).then_some(record.summon_cap),
            },
            moves,
            pattern,
            hp_thresholds,
            weights,
            adaptive,
            on_death,
            id,
        })
    }
}

/// Entry threshold of move k is the `at_X_percent_hp` transition targeting
/// it, or an even split of the health bar.
fn derive_hp_thresholds(moves: &MoveList, transitions: &TransitionTable) -> Vec<Percentage> {
    let count = moves.len();
    (0..count)
        .map(|index| {
            if index == 0 {
                return Percentage::FULL;
            }
            transitions
                .targeting(index)
                .find_map(|rule| match rule.transition.condition {
                    TransitionCondition::AtHealth(threshold) => Some(threshold),
                    _ => None,
                })
                .unwrap_or_else(|| {
                    Percentage::from_fraction((count - index) as f64 / count as f64)
                })
        })
        .collect()
}

fn parse_weights(raw: &str, move_count: usize) -> Option<Vec<u32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(vec![]);
    }
    let weights = trimmed
        .split(',')
        .map(|weight| weight.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    (weights.len() == move_count && weights.iter().any(|weight| *weight > 0)).then_some(weights)
}
