use crate::InstanceId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayDuration {
    /// Expires after this many more ticks.
    Ticks(u64),
    Permanent,
    /// Lives while the installing instance's passive move stays current.
    Passive,
}

/// A limit or modifier installed on top of the player's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlay {
    pub value: u32,
    pub duration: OverlayDuration,
    pub source: Option<InstanceId>,
}

impl Overlay {
    pub fn new(value: u32, duration: OverlayDuration, source: Option<InstanceId>) -> Self {
        Self {
            value,
            duration,
            source,
        }
    }
}

/// The overlays stacked on one slot, at most one per source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverlaySet(Vec<Overlay>);

impl OverlaySet {
    /// Installs `overlay`, refreshing an earlier overlay from the same source.
    pub fn install(&mut self, overlay: Overlay) {
        match self.0.iter_mut().find(|o| o.source == overlay.source) {
            Some(existing) => *existing = overlay,
            None => self.0.push(overlay),
        }
    }

    pub fn release_passive(&mut self, source: InstanceId) {
        self.0
            .retain(|o| !(o.source == Some(source) && o.duration == OverlayDuration::Passive));
    }

    pub fn release_all_passive(&mut self) {
        self.0.retain(|o| o.duration != OverlayDuration::Passive);
    }

    pub fn release_source(&mut self, source: InstanceId) {
        self.0.retain(|o| o.source != Some(source));
    }

    /// Drops elapsed overlays, then counts the remaining timed ones down by
    /// one tick. An overlay installed with `Ticks(n)` survives `n` advances.
    pub fn expire(&mut self) {
        self.0
            .retain(|o| !matches!(o.duration, OverlayDuration::Ticks(0)));
        for overlay in self.0.iter_mut() {
            if let OverlayDuration::Ticks(remaining) = &mut overlay.duration {
                *remaining -= 1;
            }
        }
    }

    /// The tightest active limit.
    pub fn min(&self) -> Option<u32> {
        self.0.iter().map(|o| o.value).min()
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|o| o.value).sum()
    }

    /// Sum of the overlays installed by anyone but `source`.
    pub fn sum_excluding(&self, source: Option<InstanceId>) -> u32 {
        self.0
            .iter()
            .filter(|o| source.is_none() || o.source != source)
            .map(|o| o.value)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Overlay> {
        self.0.iter()
    }
}
