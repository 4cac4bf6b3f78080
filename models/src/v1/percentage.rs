/// A fraction in `[0, 1]`, written and displayed as whole percentage points.
#[derive(Clone, Debug, Copy, PartialOrd, PartialEq, Default)]
pub struct Percentage(pub f64);

impl Percentage {
    pub const FULL: Percentage = Percentage(1.0);

    pub fn from_percentage_value(value: f64) -> Self {
        Self(value / 100.0)
    }

    pub fn from_fraction(value: f64) -> Self {
        Self(value)
    }

    pub fn as_fraction(&self) -> f64 {
        self.0
    }

    pub fn as_percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Hundredths of a percentage point, `12.5%` is 1250.
    pub fn basis_points(&self) -> u32 {
        (self.0 * 10_000.0).round().max(0.0) as u32
    }

    /// Share of `amount`, rounded down. Computed in basis points so that
    /// whole percentages never lose a unit to float error.
    pub fn of(&self, amount: u32) -> u32 {
        (amount as u64 * self.basis_points() as u64 / 10_000) as u32
    }

    pub fn saturating_add(self, other: Percentage) -> Percentage {
        Percentage((self.0 + other.0).clamp(0.0, 1.0))
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}%", self.as_percentage())
    }
}
