/// Current and maximum health. Arithmetic clamps into `[0, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Health(pub u32, pub u32);

impl Health {
    pub fn full(max: u32) -> Self {
        Self(max, max)
    }

    pub fn max(&self) -> u32 {
        self.1
    }

    pub fn current(&self) -> u32 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        if self.1 == 0 {
            return 0.0;
        }
        self.0 as f64 / self.1 as f64
    }

    pub fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Health ({}/{})", self.current(), self.max())
    }
}

impl std::ops::Add<u32> for Health {
    type Output = Self;

    fn add(self, other: u32) -> Self::Output {
        Self(self.0.saturating_add(other).min(self.1), self.1)
    }
}

impl std::ops::Sub<u32> for Health {
    type Output = Self;

    fn sub(self, other: u32) -> Self::Output {
        Self(self.0.saturating_sub(other), self.1)
    }
}

impl std::ops::AddAssign<u32> for Health {
    fn add_assign(&mut self, other: u32) {
        *self = *self + other;
    }
}

impl std::ops::SubAssign<u32> for Health {
    fn sub_assign(&mut self, other: u32) {
        *self = *self - other;
    }
}
