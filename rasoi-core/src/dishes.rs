//! Dish recommendations.
//!
//! A query resolves through an ordered chain of strategies, stopping at
//! the first that matches: known ingredient, exact dish name, partial dish
//! name. Ingredient queries return the dishes containing the ingredient;
//! name queries rank the rest of the table by ingredient overlap with the
//! matched dish.

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Dish};
use crate::normalizer;

/// Default number of dishes returned.
pub const DEFAULT_DISH_LIMIT: usize = 5;

/// The resolved source of the recommendations plus the ranked dish names.
///
/// `source_label` is the title-cased query, or the matched dish's display
/// name when a partial match redirected the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishRecommendations {
    pub source_label: String,
    pub dishes: Vec<String>,
}

/// Recommend dishes for a dish-name or ingredient query.
///
/// Strategies are tried in order; an unmatched query comes back with an
/// empty dish list, never an error.
pub fn recommend_dishes(dataset: &Dataset, query: &str, top_n: usize) -> DishRecommendations {
    by_ingredient(dataset, query, top_n)
        .or_else(|| by_exact_name(dataset, query, top_n))
        .or_else(|| by_partial_name(dataset, query, top_n))
        .unwrap_or_else(|| DishRecommendations {
            source_label: normalizer::title_case(query.trim()),
            dishes: Vec::new(),
        })
}

/// Strategy 1: the query names a known ingredient (after normalization, so
/// "chicken" resolves to the canonical "meat"). Dishes containing it are
/// ranked richest first: more total ingredients means a fuller recipe to
/// borrow from.
fn by_ingredient(dataset: &Dataset, query: &str, top_n: usize) -> Option<DishRecommendations> {
    let canonical = normalizer::canonicalize(query)?;
    if !dataset.is_ingredient(&canonical) {
        return None;
    }

    let mut matches: Vec<&Dish> = dataset
        .dishes()
        .iter()
        .filter(|dish| dish.ingredients.contains(&canonical))
        .collect();
    matches.sort_by(|a, b| {
        b.ingredients
            .len()
            .cmp(&a.ingredients.len())
            .then_with(|| a.name.cmp(&b.name))
    });

    Some(DishRecommendations {
        source_label: normalizer::title_case(query.trim()),
        dishes: matches
            .into_iter()
            .take(top_n)
            .map(|dish| dish.name.clone())
            .collect(),
    })
}

/// Strategy 2: the query is exactly a dish's normalized name.
fn by_exact_name(dataset: &Dataset, query: &str, top_n: usize) -> Option<DishRecommendations> {
    let wanted = query.trim().to_lowercase();
    let basis = dataset
        .dishes()
        .iter()
        .find(|dish| dish.name_normalized == wanted)?;

    Some(DishRecommendations {
        source_label: normalizer::title_case(query.trim()),
        dishes: similar_to(dataset, basis, top_n),
    })
}

/// Strategy 3: the query is a substring of at least one dish's normalized
/// name. Among matches the shortest name wins (alphabetical on ties) -- a
/// deterministic stand-in for "closest match", preferring "Dosa" over
/// "Masala dosa" for the query "dosa".
fn by_partial_name(dataset: &Dataset, query: &str, top_n: usize) -> Option<DishRecommendations> {
    let wanted = query.trim().to_lowercase();
    let basis = dataset
        .dishes()
        .iter()
        .filter(|dish| dish.name_normalized.contains(&wanted))
        .min_by(|a, b| {
            a.name_normalized
                .len()
                .cmp(&b.name_normalized.len())
                .then_with(|| a.name_normalized.cmp(&b.name_normalized))
        })?;

    Some(DishRecommendations {
        source_label: normalizer::title_case(&basis.name),
        dishes: similar_to(dataset, basis, top_n),
    })
}

/// Rank every other dish by the size of its ingredient intersection with
/// the basis dish. Zero-overlap dishes and the basis itself are dropped.
fn similar_to(dataset: &Dataset, basis: &Dish, top_n: usize) -> Vec<String> {
    let mut scored: Vec<(&Dish, usize)> = dataset
        .dishes()
        .iter()
        .filter(|dish| dish.name_normalized != basis.name_normalized)
        .filter_map(|dish| {
            let overlap = dish.ingredients.intersection(&basis.ingredients).count();
            (overlap > 0).then_some((dish, overlap))
        })
        .collect();

    scored.sort_by(|(a, overlap_a), (b, overlap_b)| {
        overlap_b
            .cmp(overlap_a)
            .then_with(|| a.name.cmp(&b.name))
    });

    scored
        .into_iter()
        .take(top_n)
        .map(|(dish, _)| dish.name.clone())
        .collect()
}
