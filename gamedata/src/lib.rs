//! The default gremlin bestiary and wave catalog, embedded at compile time.

mod waves;

use std::sync::Arc;

use models::v1::{
    Bestiary, BestiaryDocument, TemplateRecord, ValidationError, ValidationReason,
};

pub use waves::*;

pub const BESTIARY_TOML: &str = include_str!("../data/bestiary.toml");

lazy_static::lazy_static! {
    static ref PARSED: (Vec<TemplateRecord>, Vec<ValidationError>) = parse_or_report(BESTIARY_TOML);
    pub static ref BESTIARY_RECORDS: Vec<TemplateRecord> = PARSED.0.clone();
    static ref LOADED: (Arc<Bestiary>, Vec<ValidationError>) = {
        let (bestiary, mut errors) = Bestiary::load(&BESTIARY_RECORDS);
        errors.splice(0..0, PARSED.1.iter().cloned());
        (Arc::new(bestiary), errors)
    };
    pub static ref BESTIARY: Arc<Bestiary> = Arc::clone(&LOADED.0);
}

/// Reads `[[gremlin]]` records from a bestiary document.
pub fn parse_records(source: &str) -> anyhow::Result<Vec<TemplateRecord>> {
    let document: BestiaryDocument = toml::from_str(source)?;
    Ok(document.gremlins)
}

/// Like [`parse_records`], but a malformed document comes back as a
/// validation error instead of failing.
pub fn parse_or_report(source: &str) -> (Vec<TemplateRecord>, Vec<ValidationError>) {
    match parse_records(source) {
        Ok(records) => (records, vec![]),
        Err(error) => (
            vec![],
            vec![ValidationError::new(
                "",
                ValidationReason::Document(error.to_string()),
            )],
        ),
    }
}

/// Parses and validates a bestiary document in one step.
pub fn load_bestiary(source: &str) -> anyhow::Result<(Bestiary, Vec<ValidationError>)> {
    Ok(Bestiary::load(&parse_records(source)?))
}

/// Records of the embedded bestiary that failed validation. A malformed
/// embedded document shows up here as a single document error.
pub fn bestiary_errors() -> &'static [ValidationError] {
    &LOADED.1
}
