//! Ingredient pairing suggestions.
//!
//! The primary path walks the mined rule table; when no rule fires for the
//! given input, a co-occurrence count over the raw dish table takes over,
//! so a thin rule table never makes the operation come back empty while a
//! related dish exists.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::miner::AssociationRule;
use crate::normalizer;

/// Default number of suggestions returned.
pub const DEFAULT_PAIRING_LIMIT: usize = 10;

/// A suggested ingredient with its score: rule confidence on the primary
/// path, co-occurrence frequency on the fallback path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub ingredient: String,
    pub score: f64,
}

/// Suggest ingredients to add to `input`.
///
/// Input is normalized first, so raw spellings ("Mustard Oil") and
/// canonical labels are both accepted. The result never echoes an input
/// ingredient, holds no duplicates, and is sorted by score descending with
/// an alphabetical tie-break.
pub fn suggest_pairings(
    dataset: &Dataset,
    rules: &[AssociationRule],
    input: &[String],
    top_n: usize,
) -> Vec<Pairing> {
    let input_set: BTreeSet<String> = normalizer::normalize(input).into_iter().collect();
    if input_set.is_empty() {
        return Vec::new();
    }

    let mut suggestions = from_rules(rules, &input_set);
    if suggestions.is_empty() {
        suggestions = from_cooccurrence(dataset, &input_set);
    }
    suggestions.truncate(top_n);
    suggestions
}

/// Rule-driven scoring: every rule whose antecedent is covered by the
/// input votes for its consequent ingredients with its confidence; an
/// ingredient reachable through several rules keeps the best vote.
fn from_rules(rules: &[AssociationRule], input_set: &BTreeSet<String>) -> Vec<Pairing> {
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();

    for rule in rules {
        if !rule.antecedent.iter().all(|ing| input_set.contains(ing)) {
            continue;
        }
        for ingredient in &rule.consequent {
            if input_set.contains(ingredient) {
                continue;
            }
            let score = best.entry(ingredient.as_str()).or_insert(0.0);
            if rule.confidence > *score {
                *score = rule.confidence;
            }
        }
    }

    rank(best)
}

/// Fallback scoring: across dishes sharing at least one ingredient with
/// the input, count how often each other ingredient shows up; the score is
/// that count over the total dish count.
fn from_cooccurrence(dataset: &Dataset, input_set: &BTreeSet<String>) -> Vec<Pairing> {
    let total = dataset.dish_count();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for dish in dataset.dishes() {
        if !dish.ingredients.iter().any(|ing| input_set.contains(ing)) {
            continue;
        }
        for ingredient in &dish.ingredients {
            if !input_set.contains(ingredient) {
                *counts.entry(ingredient.as_str()).or_insert(0) += 1;
            }
        }
    }

    rank(counts
        .into_iter()
        .map(|(ing, count)| (ing, count as f64 / total as f64))
        .collect())
}

/// Sort score descending; the BTreeMap source plus a stable sort gives an
/// alphabetical tie-break.
fn rank(scored: BTreeMap<&str, f64>) -> Vec<Pairing> {
    let mut ranked: Vec<Pairing> = scored
        .into_iter()
        .map(|(ingredient, score)| Pairing {
            ingredient: ingredient.to_string(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
