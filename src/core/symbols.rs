use std::collections::HashMap;
use tracing::{debug, warn};

use super::graph::{ComponentRecord, Origin};
use crate::config::DuplicatePolicy;
use crate::parsers::ExtractionResult;

/// Global component name -> record mapping for one run.
///
/// Iteration follows first-discovery order: definitions in file order, then
/// provisional records for references that were never defined.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    records: HashMap<String, ComponentRecord>,
    order: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(results: &[ExtractionResult], policy: DuplicatePolicy) -> Self {
        let mut table = Self::new();

        for result in results {
            for definition in &result.definitions {
                table.define(
                    &definition.name,
                    Origin::ProjectFile(result.file_path.clone()),
                    policy,
                );
            }
        }

        // Definitions are all known now, so anything still missing is
        // provisional and keeps the origin its import suggested.
        for result in results {
            for reference in &result.references {
                table.reference(&reference.name, &reference.origin_hint);
            }
        }

        table
    }

    /// Records a project-local declaration.
    ///
    /// Project definitions always replace provisional or external records.
    /// Between two project definitions the policy decides; under
    /// `LastSeen` the name also moves to the later file's discovery position.
    pub fn define(&mut self, name: &str, origin: Origin, policy: DuplicatePolicy) {
        match self.records.get_mut(name) {
            Some(existing) if existing.is_project_defined() => {
                if existing.origin == origin {
                    return;
                }
                let (kept, dropped) = match policy {
                    DuplicatePolicy::FirstSeen => (existing.origin.clone(), origin),
                    DuplicatePolicy::LastSeen => (origin, existing.origin.clone()),
                };
                warn!(
                    component = %name,
                    %kept,
                    %dropped,
                    "component defined in more than one file"
                );
                existing.origin = kept;
                if policy == DuplicatePolicy::LastSeen {
                    self.order.retain(|entry| entry != name);
                    self.order.push(name.to_string());
                }
            }
            Some(existing) => {
                existing.origin = origin;
                existing.defined = true;
            }
            None => self.insert(ComponentRecord::new(name.to_string(), origin, true)),
        }
    }

    /// Inserts a provisional record for an unseen reference.
    pub fn reference(&mut self, name: &str, hint: &Origin) {
        if self.records.contains_key(name) {
            return;
        }
        debug!(component = %name, origin = %hint, "provisional record");
        self.insert(ComponentRecord::new(name.to_string(), hint.clone(), false));
    }

    pub fn get(&self, name: &str) -> Option<&ComponentRecord> {
        self.records.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentRecord> + '_ {
        self.order.iter().filter_map(|name| self.records.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, record: ComponentRecord) {
        self.order.push(record.name.clone());
        self.records.insert(record.name.clone(), record);
    }
}
