lazy_static::lazy_static! {
    pub static ref DEFAULT_MAX_TICKS: u64 = 600;
    pub static ref DEFAULT_SEED: u64 = 0x3a3f7af8085da7a2;
    /// Upper bound of an instance's reflect percentage.
    pub static ref MAX_REFLECT: models::v1::Percentage = models::v1::Percentage::FULL;
}
