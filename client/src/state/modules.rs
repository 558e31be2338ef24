//! Module list state and weight-change detection.
//!
//! DESIGN
//! ======
//! The list keeps exactly one prior snapshot of module weights. Each
//! successful fetch is diffed against it by `module_id`, then replaces it.
//! Failed fetches only set `error`; the snapshot stays so the next success is
//! still compared against the last known weights.

#[cfg(test)]
#[path = "modules_test.rs"]
mod modules_test;

use std::collections::HashMap;

use crate::net::types::Module;
use crate::util::format::format_weight;

/// A module whose reported weight differs from the previous fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightChange {
    pub module_id: String,
    pub old: Option<f64>,
    pub new: Option<f64>,
}

impl WeightChange {
    /// Notification text, e.g. `M1: Weight updated 500g → 480g`.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{}: Weight updated {} → {}",
            self.module_id,
            format_weight(self.old),
            format_weight(self.new)
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModuleListState {
    pub modules: Vec<Module>,
    pub loaded: bool,
    pub error: Option<String>,
    previous: Option<HashMap<String, Option<f64>>>,
}

impl ModuleListState {
    /// Apply one poll result, returning the weight changes to announce.
    pub fn apply_fetch(&mut self, result: Result<Vec<Module>, String>) -> Vec<WeightChange> {
        let modules = match result {
            Ok(modules) => modules,
            Err(e) => {
                self.error = Some(e);
                return Vec::new();
            }
        };

        let changes = match &self.previous {
            Some(previous) => weight_changes(previous, &modules),
            None => Vec::new(),
        };
        self.previous = Some(modules.iter().map(|m| (m.module_id.clone(), m.weight)).collect());
        self.modules = modules;
        self.loaded = true;
        self.error = None;
        changes
    }
}

fn weight_changes(previous: &HashMap<String, Option<f64>>, current: &[Module]) -> Vec<WeightChange> {
    current
        .iter()
        .filter_map(|module| {
            let old = *previous.get(&module.module_id)?;
            #[allow(clippy::float_cmp)]
            let same = old == module.weight;
            (!same).then(|| WeightChange { module_id: module.module_id.clone(), old, new: module.weight })
        })
        .collect()
}
