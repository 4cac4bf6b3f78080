use regex::Regex;

lazy_static::lazy_static! {
    pub static ref INTEGER_REGEX: Regex = Regex::new(r"^\d+$").unwrap();
    pub static ref PERCENT_REGEX: Regex = Regex::new(r"^(\d+(?:\.\d+)?)%$").unwrap();
    pub static ref IDENTIFIER_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
    pub static ref DRAIN_FORCE: Regex = Regex::new(r"^drain_(heat|precision|momentum|balance|entropy)$").unwrap();
    pub static ref DECAY_FORCE: Regex = Regex::new(r"^(heat|precision|momentum|balance|entropy)_decay$").unwrap();
    pub static ref CAP_FORCE: Regex = Regex::new(r"^(heat|precision|momentum|balance|entropy)_(hard|soft)_cap$").unwrap();
    pub static ref SUMMON_RANDOM_SIZE: Regex = Regex::new(r"^random_(gnat|small|medium|large|elite|boss)$").unwrap();
    pub static ref TRANSITION_RULE: Regex = Regex::new(r"^(\d+)\s*>\s*(\d+)\s*:\s*([a-z0-9_.]+)$").unwrap();
    pub static ref AFTER_N_TRIGGERS: Regex = Regex::new(r"^after_(\d+)_triggers?$").unwrap();
    pub static ref AFTER_N_TICKS: Regex = Regex::new(r"^after_(\d+)_ticks?$").unwrap();
    pub static ref AT_PERCENT_HP: Regex = Regex::new(r"^at_(\d+(?:\.\d+)?)_percent_hp$").unwrap();
    pub static ref ADAPTIVE_RULE: Regex = Regex::new(r"^([a-z_]+)\s*>=\s*(\d+)\s*:\s*(\d+)$").unwrap();
}
