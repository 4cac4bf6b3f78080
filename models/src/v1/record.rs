use serde::Deserialize;

/// A gremlin definition exactly as the external template store supplies it.
///
/// Column names follow the store; free-text note columns are not carried.
/// Every column is optional and takes the store's blank-cell default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TemplateRecord {
    pub template_id: String,
    pub display_name: Option<String>,
    pub description: String,
    pub archetype: String,
    pub size_category: String,

    pub max_health: u32,
    pub max_armor: u32,
    pub max_shields: u32,
    pub shield_regen: u32,
    pub shield_regen_max: u32,

    pub has_barrier: bool,
    pub barrier_count: u32,
    pub damage_cap: u32,
    pub reflect_percent: u32,
    pub execute_immunity_threshold: u32,

    pub can_be_targeted: bool,
    pub target_protection_condition: String,
    pub summon_position: String,
    pub summon_cap: u32,

    pub moves: String,
    pub move_pattern: String,
    pub move_transitions: String,
    pub move_weights: String,
    pub adaptive_rules: String,
    pub adaptive_check_ticks: u32,
    pub on_death: String,
}

impl Default for TemplateRecord {
    fn default() -> Self {
        Self {
            template_id: String::new(),
            display_name: None,
            description: String::new(),
            archetype: String::new(),
            size_category: String::new(),
            max_health: 0,
            max_armor: 0,
            max_shields: 0,
            shield_regen: 0,
            shield_regen_max: 0,
            has_barrier: false,
            barrier_count: 0,
            damage_cap: 0,
            reflect_percent: 0,
            execute_immunity_threshold: 0,
            can_be_targeted: true,
            target_protection_condition: String::new(),
            summon_position: String::new(),
            summon_cap: 0,
            moves: String::new(),
            move_pattern: String::new(),
            move_transitions: String::new(),
            move_weights: String::new(),
            adaptive_rules: String::new(),
            adaptive_check_ticks: 0,
            on_death: String::new(),
        }
    }
}

/// The `[[gremlin]]` array of a bestiary TOML document.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BestiaryDocument {
    #[serde(default, rename = "gremlin")]
    pub gremlins: Vec<TemplateRecord>,
}
