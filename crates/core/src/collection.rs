//! Scenario Collection
//!
//! The in-memory canonical collection: the "today" list plus history grouped
//! by calendar day. The flattened view de-duplicates by id with the later
//! occurrence winning, so a scenario that shows up in both lists appears
//! once.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::Scenario;
use crate::selection::SelectionSet;

/// Day-grouped history; keys are `YYYY-MM-DD`.
pub type HistoryGroups = BTreeMap<String, Vec<Scenario>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCollection {
    today: Vec<Scenario>,
    history: HistoryGroups,
}

impl ScenarioCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(today: Vec<Scenario>, history: HistoryGroups) -> Self {
        Self { today, history }
    }

    pub fn today(&self) -> &[Scenario] {
        &self.today
    }

    pub fn history(&self) -> &HistoryGroups {
        &self.history
    }

    /// History groups, most recent day first.
    pub fn history_groups(&self) -> Vec<(&str, &[Scenario])> {
        self.history
            .iter()
            .rev()
            .map(|(day, scenarios)| (day.as_str(), scenarios.as_slice()))
            .collect()
    }

    /// Current then historical scenarios, one entry per id.
    ///
    /// A duplicate id keeps the position of its first occurrence and the
    /// value of its last.
    pub fn all(&self) -> Vec<Scenario> {
        let mut out: Vec<Scenario> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for scenario in self.iter_display() {
            match index.get(scenario.id.as_str()) {
                Some(&pos) => out[pos] = scenario.clone(),
                None => {
                    index.insert(scenario.id.as_str(), out.len());
                    out.push(scenario.clone());
                }
            }
        }
        out
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.iter_raw()
            .map(|s| s.id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.history.values().all(Vec::is_empty)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter_raw().any(|s| s.id == id)
    }

    /// Latest value held for `id`.
    pub fn get(&self, id: &str) -> Option<Scenario> {
        self.iter_display().filter(|s| s.id == id).last().cloned()
    }

    /// Drop every copy of `id`; empty history days disappear. Returns
    /// whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.iter_raw().count();
        self.today.retain(|s| s.id != id);
        for group in self.history.values_mut() {
            group.retain(|s| s.id != id);
        }
        self.history.retain(|_, group| !group.is_empty());
        self.iter_raw().count() != before
    }

    /// Loaded scenarios whose ids are selected. Stale ids are ignored.
    pub fn resolve(&self, selection: &SelectionSet) -> Vec<Scenario> {
        self.all()
            .into_iter()
            .filter(|s| selection.is_selected(&s.id))
            .collect()
    }

    /// Scenarios an insight rollup covers: the whole collection when nothing
    /// is selected, otherwise the loaded part of the selection (possibly
    /// empty when every selected id is stale).
    pub fn insight_scope(&self, selection: &SelectionSet) -> Vec<Scenario> {
        if selection.is_empty() {
            self.all()
        } else {
            self.resolve(selection)
        }
    }

    /// Today, then history newest day first.
    fn iter_display(&self) -> impl Iterator<Item = &Scenario> {
        self.today.iter().chain(self.history.values().rev().flatten())
    }

    fn iter_raw(&self) -> impl Iterator<Item = &Scenario> {
        self.today.iter().chain(self.history.values().flatten())
    }
}
