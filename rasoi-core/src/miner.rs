//! Association-rule mining over per-dish ingredient sets.
//!
//! Level-wise Apriori: frequent itemsets are grown one ingredient at a
//! time, pruning any candidate with an infrequent subset, then every
//! frequent itemset of two or more ingredients is split into
//! antecedent/consequent pairs scored by confidence and lift. The rule
//! table is computed once per dataset and cached by the engine for the
//! process lifetime.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Mining thresholds. The defaults match the tuning the recommenders were
/// calibrated against; raising `min_support` on a small dataset quickly
/// empties the rule table (which is valid, and triggers the co-occurrence
/// fallback downstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinerConfig {
    /// Minimum fraction of dishes an itemset must appear in.
    pub min_support: f64,
    /// Minimum lift a rule must reach to be kept.
    pub min_lift: f64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            min_support: 0.005,
            min_lift: 1.05,
        }
    }
}

/// `antecedent => consequent` with its mined statistics.
///
/// Both sides are non-empty, disjoint, sorted canonical ingredient lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    /// Fraction of dishes containing antecedent and consequent together.
    pub support: f64,
    /// P(consequent | antecedent), in [0, 1].
    pub confidence: f64,
    /// Observed co-occurrence over the rate expected under independence.
    pub lift: f64,
}

/// Mine the ranked rule table from a dataset.
///
/// Rules are sorted by confidence descending, then lift descending, with a
/// lexicographic tie-break on (antecedent, consequent) so mining the same
/// dataset twice yields an identical table. An empty result is valid.
pub fn mine_rules(dataset: &Dataset, config: &MinerConfig) -> Vec<AssociationRule> {
    let n = dataset.dish_count();
    if n == 0 {
        return Vec::new();
    }

    // Per-dish ingredient id sets, sorted. Rows of the membership table in
    // sparse form, which is what subset tests want.
    let transactions: Vec<Vec<usize>> = dataset
        .membership()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter_map(|(id, &present)| present.then_some(id))
                .collect()
        })
        .collect();

    // support >= min_support  <=>  count >= ceil(min_support * n)
    let min_count = ((config.min_support * n as f64).ceil() as usize).max(1);

    let frequent = frequent_itemsets(&transactions, dataset.vocabulary().len(), min_count);
    let rules = extract_rules(&frequent, n, config.min_lift, dataset.vocabulary());

    tracing::info!(rules = rules.len(), itemsets = frequent.len(), "association rules generated");
    rules
}

/// All itemsets (as sorted id vectors) appearing in at least `min_count`
/// transactions, with their counts.
fn frequent_itemsets(
    transactions: &[Vec<usize>],
    vocab_len: usize,
    min_count: usize,
) -> HashMap<Vec<usize>, usize> {
    let mut frequent: HashMap<Vec<usize>, usize> = HashMap::new();

    // Level 1: frequent single ingredients.
    let mut single_counts = vec![0usize; vocab_len];
    for transaction in transactions {
        for &id in transaction {
            single_counts[id] += 1;
        }
    }
    let mut current: Vec<Vec<usize>> = (0..vocab_len)
        .filter(|&id| single_counts[id] >= min_count)
        .map(|id| vec![id])
        .collect();
    for itemset in &current {
        frequent.insert(itemset.clone(), single_counts[itemset[0]]);
    }

    // Grow level by level until no candidate survives.
    while !current.is_empty() {
        let mut next = Vec::new();
        for candidate in generate_candidates(&current) {
            let count = transactions
                .iter()
                .filter(|t| is_subset(&candidate, t))
                .count();
            if count >= min_count {
                frequent.insert(candidate.clone(), count);
                next.push(candidate);
            }
        }
        current = next;
    }

    frequent
}

/// Join step plus anti-monotone prune: two frequent k-itemsets sharing a
/// (k-1)-prefix produce a (k+1)-candidate, kept only if every k-subset is
/// itself frequent.
fn generate_candidates(level: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut sorted: Vec<&Vec<usize>> = level.iter().collect();
    sorted.sort();
    let known: HashSet<&Vec<usize>> = level.iter().collect();

    let k = match sorted.first() {
        Some(first) => first.len(),
        None => return Vec::new(),
    };

    let mut candidates = Vec::new();
    for (i, a) in sorted.iter().enumerate() {
        for b in &sorted[i + 1..] {
            if a[..k - 1] != b[..k - 1] {
                break;
            }
            let mut candidate = (*a).clone();
            candidate.push(b[k - 1]);

            let prunable = (0..candidate.len()).any(|skip| {
                let mut subset = candidate.clone();
                subset.remove(skip);
                !known.contains(&subset)
            });
            if !prunable {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

/// Two-pointer subset test over sorted id slices.
fn is_subset(small: &[usize], big: &[usize]) -> bool {
    let mut big_iter = big.iter();
    small
        .iter()
        .all(|item| big_iter.by_ref().any(|other| other == item))
}

/// Split every frequent itemset of size >= 2 into all antecedent/consequent
/// pairs and keep the ones clearing the lift threshold.
fn extract_rules(
    frequent: &HashMap<Vec<usize>, usize>,
    n: usize,
    min_lift: f64,
    vocabulary: &[String],
) -> Vec<AssociationRule> {
    let total = n as f64;
    let mut rules = Vec::new();

    for (itemset, &count) in frequent {
        if itemset.len() < 2 {
            continue;
        }
        let support = count as f64 / total;

        // Every non-empty proper subset of the itemset is an antecedent;
        // the remainder is the consequent. Both are frequent by the
        // anti-monotone property, so their supports are always on hand.
        let full = (1usize << itemset.len()) - 1;
        for mask in 1..full {
            let mut antecedent = Vec::new();
            let mut consequent = Vec::new();
            for (bit, &id) in itemset.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    antecedent.push(id);
                } else {
                    consequent.push(id);
                }
            }

            let antecedent_support = frequent[&antecedent] as f64 / total;
            let consequent_support = frequent[&consequent] as f64 / total;
            let confidence = support / antecedent_support;
            let lift = confidence / consequent_support;

            if lift >= min_lift {
                rules.push(AssociationRule {
                    antecedent: to_labels(&antecedent, vocabulary),
                    consequent: to_labels(&consequent, vocabulary),
                    support,
                    confidence,
                    lift,
                });
            }
        }
    }

    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.lift.total_cmp(&a.lift))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
    rules
}

fn to_labels(ids: &[usize], vocabulary: &[String]) -> Vec<String> {
    ids.iter().map(|&id| vocabulary[id].clone()).collect()
}
