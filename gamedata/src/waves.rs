use models::v1::Bestiary;
use serde::Deserialize;

pub const WAVES_TOML: &str = include_str!("../data/waves.toml");

/// A predefined board of gremlins, as listed in the wave catalog.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Wave {
    pub wave_id: String,
    pub display_name: String,
    pub act: u32,
    pub difficulty: u32,
    #[serde(default)]
    pub difficulty_tier: String,
    #[serde(default)]
    pub archetype: String,
    #[serde(default)]
    pub strategy_hint: String,
    pub gremlins: Vec<String>,
    #[serde(default)]
    pub is_boss: bool,
}

impl std::fmt::Display for Wave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} \"{}\" (act {}, difficulty {})",
            self.wave_id, self.display_name, self.act, self.difficulty
        )
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct WaveDocument {
    #[serde(default, rename = "wave")]
    pub waves: Vec<Wave>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WaveError {
    #[error("wave {wave_id:?} has no gremlins")]
    Empty { wave_id: String },
    #[error("wave {wave_id:?} references unknown gremlin {gremlin:?}")]
    UnknownGremlin { wave_id: String, gremlin: String },
    #[error("duplicate wave id {0:?}")]
    Duplicate(String),
    #[error("unreadable wave document: {0}")]
    Document(String),
}

lazy_static::lazy_static! {
    static ref LOADED: (Vec<Wave>, Vec<WaveError>) = match parse_waves(WAVES_TOML) {
        Ok(waves) => {
            let errors = validate_waves(&waves, &crate::BESTIARY);
            (waves, errors)
        }
        Err(error) => (vec![], vec![WaveError::Document(error.to_string())]),
    };
    pub static ref WAVES: Vec<Wave> = LOADED.0.clone();
}

pub fn parse_waves(source: &str) -> anyhow::Result<Vec<Wave>> {
    let document: WaveDocument = toml::from_str(source)?;
    Ok(document.waves)
}

pub fn wave(wave_id: &str) -> Option<&'static Wave> {
    WAVES.iter().find(|wave| wave.wave_id == wave_id)
}

/// Problems found in the embedded wave catalog.
pub fn wave_errors() -> &'static [WaveError] {
    &LOADED.1
}

/// Checks every wave against `bestiary`.
pub fn validate_waves(waves: &[Wave], bestiary: &Bestiary) -> Vec<WaveError> {
    let mut errors = vec![];
    for (index, wave) in waves.iter().enumerate() {
        if waves[..index].iter().any(|other| other.wave_id == wave.wave_id) {
            errors.push(WaveError::Duplicate(wave.wave_id.clone()));
        }
        if wave.gremlins.is_empty() {
            errors.push(WaveError::Empty {
                wave_id: wave.wave_id.clone(),
            });
        }
        errors.extend(
            wave.gremlins
                .iter()
                .filter(|gremlin| !bestiary.contains(gremlin))
                .map(|gremlin| WaveError::UnknownGremlin {
                    wave_id: wave.wave_id.clone(),
                    gremlin: gremlin.clone(),
                }),
        );
    }
    errors
}
