use std::collections::BTreeMap;

use gamedata::Wave;
use models::v1::ForceType;
use serde::Deserialize;

use crate::PlayerAction;

/// A player-side action replayed at a fixed tick.
#[derive(Clone, Debug, Deserialize)]
pub struct ScriptedAction {
    /// Runs after the clock reaches this tick; `0` runs before the first advance.
    pub tick: u64,
    #[serde(flatten)]
    pub action: ScriptedKind,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptedKind {
    Gain {
        force: ForceType,
        amount: u32,
    },
    Spend {
        force: ForceType,
        amount: u32,
    },
    Hit {
        #[serde(default = "default_target")]
        target: String,
        damage: u32,
        #[serde(default)]
        pierce: bool,
        /// Reported to adaptive gremlins as damage of this force.
        #[serde(default)]
        force: Option<ForceType>,
    },
    Execute {
        #[serde(default = "default_target")]
        target: String,
    },
    Heal {
        #[serde(default = "default_target")]
        target: String,
        amount: u32,
    },
    PlayCard,
    Observe {
        observed: PlayerAction,
    },
}

fn default_target() -> String {
    "first".to_string()
}

/// Encounter configuration as read from a scenario file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EncounterTemplate {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_ticks: Option<u64>,
    /// Starting amount per force name.
    #[serde(default)]
    pub resources: BTreeMap<String, u32>,
    /// Template ids spawned top to bottom before the first tick.
    pub gremlins: Vec<String>,
    #[serde(default)]
    pub script: Vec<ScriptedAction>,
    #[serde(skip, default)]
    pub source: Option<String>,
}

impl EncounterTemplate {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A wave starts with empty resources and no script.
impl From<&Wave> for EncounterTemplate {
    fn from(wave: &Wave) -> Self {
        EncounterTemplate {
            gremlins: wave.gremlins.clone(),
            source: Some(format!("wave {}", wave.wave_id)),
            ..Default::default()
        }
    }
}
