//! The recommendation engine handle.
//!
//! An `Engine` owns the loaded dataset and the mined rule table, built
//! together exactly once at construction and immutable afterward. Every
//! operation takes `&self`, so a ready engine can be shared freely across
//! request handlers without locking.
//!
//! A failed load leaves the engine in a degraded state instead of
//! panicking later: the condition is logged once, and operations return
//! empty results until the host restarts with a usable dataset.

use std::path::Path;

use crate::dataset::Dataset;
use crate::dishes::{self, DishRecommendations};
use crate::error::LoadError;
use crate::miner::{self, AssociationRule, MinerConfig};
use crate::normalizer;
use crate::pairing::{self, Pairing};
use crate::planner::{self, MealPlan};

pub struct Engine {
    inner: Option<EngineInner>,
}

struct EngineInner {
    dataset: Dataset,
    rules: Vec<AssociationRule>,
}

impl Engine {
    /// Load the dataset and mine the rule table, treating failure as fatal.
    pub fn try_load(path: impl AsRef<Path>, config: &MinerConfig) -> Result<Self, LoadError> {
        let dataset = Dataset::from_csv_path(path)?;
        Ok(Self::from_dataset(dataset, config))
    }

    /// Load the dataset and mine the rule table, degrading on failure.
    ///
    /// On a load error the engine is still constructed, the condition is
    /// logged once here, and every subsequent operation returns an empty
    /// or sentinel result.
    pub fn load(path: impl AsRef<Path>, config: &MinerConfig) -> Self {
        match Self::try_load(path, config) {
            Ok(engine) => engine,
            Err(err) => {
                tracing::warn!(error = %err, "engine is not ready; operations will return empty results");
                Self { inner: None }
            }
        }
    }

    /// Build an engine from an already-loaded dataset. Intended for tests
    /// and embedders that assemble rows themselves.
    pub fn from_dataset(dataset: Dataset, config: &MinerConfig) -> Self {
        let rules = miner::mine_rules(&dataset, config);
        Self {
            inner: Some(EngineInner { dataset, rules }),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.inner.is_some()
    }

    /// Normalize raw ingredient strings. Pure; works on a degraded engine.
    pub fn normalize<S: AsRef<str>>(&self, raw: &[S]) -> Vec<String> {
        normalizer::normalize(raw)
    }

    /// Suggest ingredients that pair with `input`. See [`pairing`].
    pub fn suggest_pairings(&self, input: &[String], top_n: usize) -> Vec<Pairing> {
        match &self.inner {
            Some(inner) => pairing::suggest_pairings(&inner.dataset, &inner.rules, input, top_n),
            None => Vec::new(),
        }
    }

    /// Recommend dishes for a dish-name or ingredient query. See [`dishes`].
    pub fn recommend_dishes(&self, query: &str, top_n: usize) -> DishRecommendations {
        match &self.inner {
            Some(inner) => dishes::recommend_dishes(&inner.dataset, query, top_n),
            None => DishRecommendations {
                source_label: normalizer::title_case(query.trim()),
                dishes: Vec::new(),
            },
        }
    }

    /// Filter dishes by diet and/or region. See [`planner`].
    pub fn plan_meals(&self, diet: Option<&str>, region: Option<&str>) -> MealPlan {
        match &self.inner {
            Some(inner) => planner::plan_meals(&inner.dataset, diet, region),
            None => MealPlan::NoMatch,
        }
    }

    /// The mined rule table, ranked. Empty on a degraded engine.
    pub fn rules(&self) -> &[AssociationRule] {
        self.inner
            .as_ref()
            .map(|inner| inner.rules.as_slice())
            .unwrap_or(&[])
    }

    /// The loaded dataset, when ready.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.inner.as_ref().map(|inner| &inner.dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SourceRow;

    fn sample_engine() -> Engine {
        let rows = vec![
            SourceRow {
                name: "A".into(),
                diet: "vegetarian".into(),
                region: "North".into(),
                ingredients: "oil, onion".into(),
            },
            SourceRow {
                name: "B".into(),
                diet: "vegetarian".into(),
                region: "North".into(),
                ingredients: "oil, onion, garlic".into(),
            },
            SourceRow {
                name: "C".into(),
                diet: "vegetarian".into(),
                region: "East".into(),
                ingredients: "ghee, rice".into(),
            },
        ];
        Engine::from_dataset(Dataset::from_rows(rows).unwrap(), &MinerConfig::default())
    }

    #[test]
    fn test_ready_engine_serves_all_operations() {
        let engine = sample_engine();
        assert!(engine.is_ready());
        assert!(!engine.rules().is_empty());

        let pairings = engine.suggest_pairings(&["oil".into(), "onion".into()], 10);
        assert_eq!(pairings[0].ingredient, "garlic");

        let dishes = engine.recommend_dishes("A", 5);
        assert_eq!(dishes.dishes, vec!["B"]);

        let plan = engine.plan_meals(Some("vegetarian"), Some("East"));
        assert_eq!(plan.dishes(), ["C"]);
    }

    #[test]
    fn test_missing_dataset_degrades() {
        let engine = Engine::load("/nonexistent/dishes.csv", &MinerConfig::default());
        assert!(!engine.is_ready());
        assert!(engine.rules().is_empty());
        assert!(engine.dataset().is_none());

        assert!(engine.suggest_pairings(&["oil".into()], 10).is_empty());

        let dishes = engine.recommend_dishes("kheer", 5);
        assert_eq!(dishes.source_label, "Kheer");
        assert!(dishes.dishes.is_empty());

        assert!(engine.plan_meals(Some("vegetarian"), None).is_no_match());

        // Normalization is pure and keeps working.
        assert_eq!(engine.normalize(&["Butter"]), vec!["ghee"]);
    }

    #[test]
    fn test_try_load_surfaces_the_error() {
        let result = Engine::try_load("/nonexistent/dishes.csv", &MinerConfig::default());
        assert!(matches!(result, Err(LoadError::DataUnavailable { .. })));
    }
}
