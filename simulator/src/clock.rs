use crate::Ticks;

/// The encounter's single tick counter.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    now: Ticks,
    terminated: bool,
}

impl Clock {
    pub fn now(&self) -> Ticks {
        self.now
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn terminate(&mut self) {
        self.terminated = true;
    }

    /// Moves time forward by one tick.
    ///
    /// # Panics
    ///
    /// Panics once the clock has been terminated.
    pub fn advance(&mut self) -> Ticks {
        assert!(
            !self.terminated,
            "advanced a terminated encounter at {}",
            self.now
        );
        self.now += 1;
        self.now
    }
}
