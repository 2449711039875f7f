use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::domain::catalog::{Catalog, ObjectiveSelection, Topic, ALL_TOPICS};

/// Which objectives and sub-objectives have already been handed out.
///
/// One instance is shared by the whole process so consecutive quizzes keep
/// rotating through the syllabus instead of starting over.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RotationState {
    used_objectives: HashMap<String, HashSet<usize>>,
    used_sub_objectives: HashMap<(String, usize), HashSet<usize>>,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.used_objectives.clear();
        self.used_sub_objectives.clear();
    }

    pub fn consumed_objectives(&self, topic: &str) -> usize {
        self.used_objectives.get(topic).map_or(0, HashSet::len)
    }
}

/// Picks an unused index out of `0..len`, resetting `used` first when every
/// index has been consumed. Returns `None` only for `len == 0`.
fn take_unused<R: Rng + ?Sized>(
    used: &mut HashSet<usize>,
    len: usize,
    rng: &mut R,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let mut available: Vec<usize> = (0..len).filter(|i| !used.contains(i)).collect();
    if available.is_empty() {
        used.clear();
        available = (0..len).collect();
    }

    let picked = *available.choose(rng)?;
    used.insert(picked);
    Some(picked)
}

fn resolve_topic<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    topic: &str,
    rng: &mut R,
) -> Option<&'a Topic> {
    if topic != ALL_TOPICS {
        if let Some(found) = catalog.topic(topic) {
            return Some(found);
        }
        log::warn!("Unknown topic '{}', picking a random topic instead", topic);
    }
    catalog.topics().choose(rng)
}

/// Selects the next topic/objective/sub-objective for `topic`, cycling
/// through objectives (and each objective's sub-objectives) without repeats
/// until all have been used.
///
/// Returns `None` only if the catalog has no topics.
pub fn select_objective<R: Rng + ?Sized>(
    catalog: &Catalog,
    state: &mut RotationState,
    topic: &str,
    rng: &mut R,
) -> Option<ObjectiveSelection> {
    let resolved = resolve_topic(catalog, topic, rng)?;

    let used = state.used_objectives.entry(resolved.name.clone()).or_default();
    let objective_index = take_unused(used, resolved.objectives.len(), rng)?;
    let objective = &resolved.objectives[objective_index];

    let used_subs = state
        .used_sub_objectives
        .entry((resolved.name.clone(), objective_index))
        .or_default();
    let sub_objective = take_unused(used_subs, objective.sub_objectives.len(), rng)
        .map(|i| objective.sub_objectives[i].clone());

    Some(ObjectiveSelection {
        topic: resolved.name.clone(),
        objective: objective.objective.clone(),
        sub_objective,
    })
}
