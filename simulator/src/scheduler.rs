//! Move selection for live gremlins.
//!
//! The functions here only decide. Entering moves and resolving effects is
//! left to the encounter so overlays can be released and installed in one
//! place.

use models::v1::MovePattern;
use rand::Rng;

use crate::AdversaryInstance;

/// Whether the current move fires this tick. Call after `ticks_in_move` has
/// been incremented.
pub fn fires(instance: &AdversaryInstance) -> bool {
    match instance.current_move() {
        Some(mv) if !mv.is_passive() => instance.ticks_in_move % mv.interval as u64 == 0,
        _ => false,
    }
}

/// The move an instance should switch to, if any.
///
/// Adaptive gremlins consume their observation window when a check is due,
/// which is why this takes the instance mutably.
pub fn next_move(instance: &mut AdversaryInstance, rng: &mut impl Rng) -> Option<usize> {
    let len = instance.template.moves.len();
    if len == 0 {
        return None;
    }
    let index = instance.move_index;

    match instance.template.pattern {
        MovePattern::Single => None,
        MovePattern::Sequence => {
            if !current_move_complete(instance) {
                return None;
            }
            let next = explicit_next(instance).unwrap_or(index + 1);
            (next < len && next != index).then_some(next)
        }
        MovePattern::Cycle => {
            if !current_move_complete(instance) {
                return None;
            }
            Some(explicit_next(instance).unwrap_or((index + 1) % len))
        }
        MovePattern::Random => {
            if !current_move_complete(instance) {
                return None;
            }
            Some(
                explicit_next(instance)
                    .unwrap_or_else(|| weighted_pick(&instance.template.weights, index, len, rng)),
            )
        }
        MovePattern::HpBased => {
            let fraction = instance.health.fraction();
            let target = (1..len)
                .rev()
                .find(|k| {
                    instance
                        .template
                        .hp_threshold(*k)
                        .is_some_and(|threshold| fraction <= threshold.as_fraction())
                })
                .unwrap_or(0);
            (target > index).then_some(target)
        }
        MovePattern::Adaptive => {
            let table = instance.template.adaptive.as_ref()?;
            let check = table.check_interval as u64;
            if check == 0 || instance.ticks_alive == 0 || instance.ticks_alive % check != 0 {
                return None;
            }
            let selected = table.select(&instance.observed);
            instance.observed.reset();
            (selected < len && selected != index).then_some(selected)
        }
    }
}

fn current_move_complete(instance: &AdversaryInstance) -> bool {
    instance.current_move().is_some_and(|mv| {
        mv.is_complete(
            instance.current_triggers(),
            instance.ticks_in_move,
            instance.health.fraction(),
        )
    })
}

fn explicit_next(instance: &AdversaryInstance) -> Option<usize> {
    instance
        .current_move()
        .and_then(|mv| mv.transition)
        .map(|transition| transition.next)
}

/// Picks a move index by weight, never repeating `current` unless it is the
/// only move. Missing or all-zero weights fall back to a uniform pick.
pub fn weighted_pick(weights: &[u32], current: usize, len: usize, rng: &mut impl Rng) -> usize {
    if len <= 1 {
        return 0;
    }
    let candidates = (0..len).filter(|i| *i != current).collect::<Vec<_>>();
    let weight_of = |i: usize| match weights.is_empty() {
        true => 1,
        false => weights.get(i).copied().unwrap_or(0),
    };

    let total: u64 = candidates.iter().map(|i| weight_of(*i) as u64).sum();
    if total == 0 {
        return candidates[rng.random_range(0..candidates.len())];
    }

    let mut roll = rng.random_range(0..total);
    for candidate in &candidates {
        let weight = weight_of(*candidate) as u64;
        if roll < weight {
            return *candidate;
        }
        roll -= weight;
    }
    candidates[candidates.len() - 1]
}
