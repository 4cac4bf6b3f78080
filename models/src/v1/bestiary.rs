use std::sync::Arc;

use indexmap::IndexMap;

use super::{
    AdversaryTemplate, SizeCategory, SummonSpec, TemplateRecord, ValidationError,
    ValidationReason,
};

/// Every template that survived validation, in record order.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    templates: IndexMap<String, Arc<AdversaryTemplate>>,
}

impl Bestiary {
    /// Validates every record. Invalid templates are dropped and reported,
    /// as are templates that summon a dropped or unknown template.
    pub fn load(records: &[TemplateRecord]) -> (Bestiary, Vec<ValidationError>) {
        let mut errors = vec![];
        let mut templates: IndexMap<String, Arc<AdversaryTemplate>> = IndexMap::new();

        for record in records {
            match AdversaryTemplate::try_from(record) {
                Ok(template) if templates.contains_key(&template.id) => {
                    errors.push(ValidationError::new(
                        template.id.clone(),
                        ValidationReason::Duplicate,
                    ));
                }
                Ok(template) => {
                    templates.insert(template.id.clone(), Arc::new(template));
                }
                Err(err) => errors.push(err),
            }
        }

        // Dropping a template can orphan its summoners, so repeat until stable.
        loop {
            let orphaned = templates
                .values()
                .filter_map(|template| {
                    template.summons().find_map(|spec| match spec {
                        SummonSpec::Named(target) if !templates.contains_key(target) => {
                            Some((template.id.clone(), target.clone()))
                        }
                        _ => None,
                    })
                })
                .collect::<Vec<_>>();
            if orphaned.is_empty() {
                break;
            }
            for (id, target) in orphaned {
                templates.shift_remove(&id);
                errors.push(ValidationError::new(
                    id,
                    ValidationReason::UnknownSummon(target),
                ));
            }
        }

        (Bestiary { templates }, errors)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<AdversaryTemplate>> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn by_size(&self, size: SizeCategory) -> impl Iterator<Item = &Arc<AdversaryTemplate>> {
        self.templates
            .values()
            .filter(move |template| template.size == size)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AdversaryTemplate>> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
