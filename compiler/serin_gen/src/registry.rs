//! Registry of generated source units.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use thiserror::Error;

/// A generated source unit.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct GeneratedSource {
    /// Unique file name, e.g. `Game.Player_g.cs`.
    pub hint_name: String,
    /// `Ns.Outer.Class` of the class it completes.
    pub class_name: String,
    pub text: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Error)]
pub enum RegistryError {
    #[error("a generated source named `{hint_name}` is already registered")]
    Duplicate { hint_name: String },
}

/// Generated units keyed by hint name.
///
/// Registration is safe from any thread. A second unit under an existing
/// name is rejected and the first one kept.
#[derive(Default, Debug)]
pub struct SourceRegistry {
    sources: DashMap<String, GeneratedSource>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, source: GeneratedSource) -> Result<(), RegistryError> {
        match self.sources.entry(source.hint_name.clone()) {
            Entry::Occupied(existing) => Err(RegistryError::Duplicate {
                hint_name: existing.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(source);
                Ok(())
            }
        }
    }

    pub fn contains(&self, hint_name: &str) -> bool {
        self.sources.contains_key(hint_name)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// All units, sorted by hint name.
    pub fn into_sorted(self) -> Vec<GeneratedSource> {
        let mut sources: Vec<GeneratedSource> =
            self.sources.into_iter().map(|(_, source)| source).collect();
        sources.sort_by(|a, b| a.hint_name.cmp(&b.hint_name));
        sources
    }
}

#[cfg(test)]
mod tests;
