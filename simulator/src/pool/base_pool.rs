use indexmap::IndexMap;
use models::v1::ForceType;

use crate::{InstanceId, Overlay, OverlaySet};

/// The player's forces and the caps layered over them.
///
/// Hard caps (per type and total) are enforced on every mutation. Soft caps
/// are only recorded for consumers to query.
#[derive(Clone, Debug, Default)]
pub struct ResourcePool {
    amounts: [u32; 5],
    hard_caps: [OverlaySet; 5],
    soft_caps: [OverlaySet; 5],
    total_cap: OverlaySet,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ForceSnapshot {
    pub amount: u32,
    pub hard_cap: Option<u32>,
    pub soft_cap: Option<u32>,
}

impl ForceSnapshot {
    pub fn over_soft_cap(&self) -> bool {
        self.soft_cap.is_some_and(|cap| self.amount > cap)
    }
}

/// Read-only view handed to UI and AI consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSnapshot {
    pub forces: IndexMap<ForceType, ForceSnapshot>,
    pub total_cap: Option<u32>,
}

impl ResourceSnapshot {
    pub fn amount(&self, force: ForceType) -> u32 {
        self.forces.get(&force).map(|f| f.amount).unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.forces.values().map(|f| f.amount).sum()
    }
}

impl std::fmt::Display for ResourceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let forces = self
            .forces
            .iter()
            .map(|(force, snapshot)| match snapshot.hard_cap {
                Some(cap) => format!("{force}={}/{cap}", snapshot.amount),
                None => format!("{force}={}", snapshot.amount),
            })
            .collect::<Vec<_>>();
        write!(f, "Resources<{}>", forces.join(", "))
    }
}

impl ResourcePool {
    pub fn new(initial: impl IntoIterator<Item = (ForceType, u32)>) -> Self {
        let mut pool = Self::default();
        for (force, amount) in initial {
            pool.amounts[force.index()] = amount;
        }
        pool
    }

    pub fn amount(&self, force: ForceType) -> u32 {
        self.amounts[force.index()]
    }

    pub fn total(&self) -> u32 {
        self.amounts.iter().sum()
    }

    pub fn hard_cap(&self, force: ForceType) -> Option<u32> {
        self.hard_caps[force.index()].min()
    }

    pub fn soft_cap(&self, force: ForceType) -> Option<u32> {
        self.soft_caps[force.index()].min()
    }

    pub fn total_cap(&self) -> Option<u32> {
        self.total_cap.min()
    }

    /// Overwrites a force's amount, still subject to the active hard caps.
    pub fn set(&mut self, force: ForceType, amount: u32) {
        self.amounts[force.index()] = amount;
        self.clamp();
    }

    /// Adds to a force and returns how much actually stuck after capping.
    pub fn gain(&mut self, force: ForceType, amount: u32) -> u32 {
        let before = self.total();
        self.amounts[force.index()] = self.amounts[force.index()].saturating_add(amount);
        self.clamp();
        self.total().saturating_sub(before)
    }

    /// Removes up to `amount`, never going below zero. Returns the amount removed.
    pub fn drain(&mut self, force: ForceType, amount: u32) -> u32 {
        let current = &mut self.amounts[force.index()];
        let removed = amount.min(*current);
        *current -= removed;
        removed
    }

    /// Spends exactly `amount` if the force holds enough.
    pub fn spend(&mut self, force: ForceType, amount: u32) -> bool {
        if self.amount(force) < amount {
            return false;
        }
        self.drain(force, amount);
        true
    }

    /// Force types currently holding anything, in declaration order.
    pub fn present(&self) -> Vec<ForceType> {
        ForceType::ALL
            .into_iter()
            .filter(|force| self.amount(*force) > 0)
            .collect()
    }

    /// Largest present force. Ties go to the earlier declared type.
    pub fn largest(&self) -> Option<ForceType> {
        self.present()
            .into_iter()
            .rev()
            .max_by_key(|force| self.amount(*force))
    }

    /// Smallest present force. Ties go to the earlier declared type.
    pub fn smallest(&self) -> Option<ForceType> {
        self.present()
            .into_iter()
            .min_by_key(|force| self.amount(*force))
    }

    pub fn install_hard_cap(&mut self, force: ForceType, overlay: Overlay) {
        self.hard_caps[force.index()].install(overlay);
        self.clamp();
    }

    pub fn install_soft_cap(&mut self, force: ForceType, overlay: Overlay) {
        self.soft_caps[force.index()].install(overlay);
    }

    pub fn install_total_cap(&mut self, overlay: Overlay) {
        self.total_cap.install(overlay);
        self.clamp();
    }

    pub fn release_all_passive(&mut self) {
        self.overlay_sets_mut()
            .for_each(OverlaySet::release_all_passive);
    }

    pub fn release_passive(&mut self, source: InstanceId) {
        self.overlay_sets_mut()
            .for_each(|set| set.release_passive(source));
    }

    pub fn release_source(&mut self, source: InstanceId) {
        self.overlay_sets_mut()
            .for_each(|set| set.release_source(source));
    }

    pub fn expire(&mut self) {
        self.overlay_sets_mut().for_each(OverlaySet::expire);
    }

    /// Applies every active hard cap. Total-cap excess comes off the largest
    /// force first.
    pub fn clamp(&mut self) {
        for force in ForceType::ALL {
            if let Some(cap) = self.hard_cap(force) {
                let amount = &mut self.amounts[force.index()];
                *amount = (*amount).min(cap);
            }
        }

        if let Some(cap) = self.total_cap() {
            let excess = self.total().saturating_sub(cap);
            if excess > 0 {
                self.level_down(excess);
            }
        }
    }

    /// Removes `excess` by lowering the largest forces to a common level.
    /// Units that do not divide evenly come off earlier declared forces.
    fn level_down(&mut self, excess: u32) {
        let excess = u64::from(excess);
        let mut sorted = self.amounts.map(u64::from);
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let mut level = 0;
        let mut top_sum = 0;
        for (i, amount) in sorted.iter().enumerate() {
            top_sum += amount;
            let group = i as u64 + 1;
            let next = sorted.get(i + 1).copied().unwrap_or(0);
            if top_sum - group * next >= excess {
                level = (top_sum - excess).div_ceil(group);
                break;
            }
        }

        let mut remainder = excess;
        for amount in self.amounts.iter_mut() {
            if u64::from(*amount) > level {
                remainder -= u64::from(*amount) - level;
                *amount = level as u32;
            }
        }
        for amount in self.amounts.iter_mut() {
            if remainder == 0 {
                break;
            }
            if level > 0 && u64::from(*amount) == level {
                *amount -= 1;
                remainder -= 1;
            }
        }
    }

    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            forces: ForceType::ALL
                .into_iter()
                .map(|force| {
                    (
                        force,
                        ForceSnapshot {
                            amount: self.amount(force),
                            hard_cap: self.hard_cap(force),
                            soft_cap: self.soft_cap(force),
                        },
                    )
                })
                .collect(),
            total_cap: self.total_cap(),
        }
    }

    fn overlay_sets_mut(&mut self) -> impl Iterator<Item = &mut OverlaySet> {
        self.hard_caps
            .iter_mut()
            .chain(self.soft_caps.iter_mut())
            .chain(std::iter::once(&mut self.total_cap))
    }
}
