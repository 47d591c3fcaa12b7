use std::collections::BTreeMap;

use noise_core::Generator;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::StorageError;
use crate::models::GeneratorDoc;

// Named generator descriptions, kept sorted by name. Serialises to a single
// JSON document so a whole library of looks can be stored or shipped at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    docs: BTreeMap<String, GeneratorDoc>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.docs.keys().map(String::as_str).collect()
    }

    // Insert a document, replacing any existing one with the same name.
    // The description must build, so a catalogue never holds dead entries.
    pub fn create(&mut self, doc: GeneratorDoc) -> Result<Option<GeneratorDoc>, StorageError> {
        doc.build()?;
        trace!(name = %doc.name, seed = doc.config.seed, "catalog insert");
        Ok(self.docs.insert(doc.name.clone(), doc))
    }

    pub fn read_by_name(&self, name: &str) -> Option<&GeneratorDoc> {
        self.docs.get(name)
    }

    // Every document built from `seed`, in name order
    pub fn read_by_seed(&self, seed: u32) -> Vec<&GeneratorDoc> {
        self.docs
            .values()
            .filter(|d| d.config.seed == seed)
            .collect()
    }

    pub fn delete(&mut self, name: &str) -> Option<GeneratorDoc> {
        self.docs.remove(name)
    }

    // Removes every document with `seed`; returns how many went
    pub fn delete_by_seed(&mut self, seed: u32) -> usize {
        let before = self.docs.len();
        self.docs.retain(|_, d| d.config.seed != seed);
        before - self.docs.len()
    }

    pub fn build(&self, name: &str) -> Option<Result<Generator, StorageError>> {
        self.read_by_name(name).map(GeneratorDoc::build)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // Every entry is checked the same way `create` checks it
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let parsed: Catalog = serde_json::from_str(json)?;
        let mut catalog = Catalog::new();
        for (_, doc) in parsed.docs {
            catalog.create(doc)?;
        }
        debug!(entries = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use noise_core::Preset;

    use super::Catalog;
    use crate::error::StorageError;
    use crate::models::GeneratorDoc;

    fn seeded() -> Catalog {
        let mut c = Catalog::new();
        for (preset, seed) in [(Preset::Rock, 1), (Preset::Snow, 2), (Preset::Mud, 1)] {
            c.create(GeneratorDoc::from_preset(preset, seed)).unwrap();
        }
        c
    }

    #[test]
    fn crud_by_name_and_seed() {
        let mut c = seeded();
        assert_eq!(c.list_names(), vec!["mud", "rock", "snow"]);
        assert_eq!(c.read_by_seed(1).len(), 2);
        assert_eq!(c.read_by_name("snow").map(|d| d.config.seed), Some(2));

        let replaced = c.create(GeneratorDoc::from_preset(Preset::Snow, 7)).unwrap();
        assert_eq!(replaced.map(|d| d.config.seed), Some(2));
        assert_eq!(c.len(), 3);

        assert_eq!(c.delete_by_seed(1), 2);
        assert!(c.delete("snow").is_some());
        assert!(c.is_empty());
        assert!(c.build("snow").is_none());
    }

    #[test]
    fn unbuildable_docs_are_refused() {
        let mut c = Catalog::new();
        let mut doc = GeneratorDoc::from_preset(Preset::Ice, 3);
        doc.config.octaves = 0;
        assert!(matches!(c.create(doc), Err(StorageError::Noise(_))));
        assert!(c.is_empty());
    }

    #[test]
    fn json_round_trip() {
        let c = seeded();
        let back = Catalog::from_json(&c.to_json().unwrap()).unwrap();
        assert_eq!(back, c);
        let g = back.build("rock").unwrap().unwrap();
        assert_eq!(g, Preset::Rock.generator(1).unwrap());
    }
}
