//! Meal-plan filtering by diet and region.
//!
//! The combined filter is tried first, then progressively relaxed
//! (region alone, then diet alone) so a broader match is preferred over an
//! empty answer. "Nothing matched anywhere" is the `NoMatch` variant, not
//! an error.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Outcome of a meal-plan filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MealPlan {
    /// Matching dish names in source-table order.
    Matches(Vec<String>),
    /// No dish matched even after relaxing the criteria.
    NoMatch,
}

impl MealPlan {
    pub fn dishes(&self) -> &[String] {
        match self {
            MealPlan::Matches(dishes) => dishes,
            MealPlan::NoMatch => &[],
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, MealPlan::NoMatch)
    }
}

/// Filter dishes by optional diet and region criteria, case-insensitively.
///
/// Whether at least one criterion was supplied is the caller's validation
/// concern; with neither given every dish matches.
pub fn plan_meals(dataset: &Dataset, diet: Option<&str>, region: Option<&str>) -> MealPlan {
    let diet = clean(diet);
    let region = clean(region);

    // Ordered relaxation: combined filter first, then each single
    // criterion when both were given, region before diet.
    let mut attempts: Vec<(Option<&str>, Option<&str>)> =
        vec![(diet.as_deref(), region.as_deref())];
    if diet.is_some() && region.is_some() {
        attempts.push((None, region.as_deref()));
        attempts.push((diet.as_deref(), None));
    }

    for (diet, region) in attempts {
        let matches = filter_dishes(dataset, diet, region);
        if !matches.is_empty() {
            return MealPlan::Matches(matches);
        }
    }
    MealPlan::NoMatch
}

fn clean(criterion: Option<&str>) -> Option<String> {
    criterion
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty())
}

fn filter_dishes(dataset: &Dataset, diet: Option<&str>, region: Option<&str>) -> Vec<String> {
    dataset
        .dishes()
        .iter()
        .filter(|dish| diet.map_or(true, |d| dish.diet.eq_ignore_ascii_case(d)))
        .filter(|dish| region.map_or(true, |r| dish.region.eq_ignore_ascii_case(r)))
        .map(|dish| dish.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SourceRow;

    fn row(name: &str, diet: &str, region: &str) -> SourceRow {
        SourceRow {
            name: name.to_string(),
            diet: diet.to_string(),
            region: region.to_string(),
            ingredients: "oil, onion".to_string(),
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_rows(vec![
            row("Dosa", "vegetarian", "South"),
            row("Kheer", "vegetarian", "North"),
            row("Rogan Josh", "non vegetarian", "North"),
            row("Macher Jhol", "non vegetarian", "East"),
        ])
        .unwrap()
    }

    #[test]
    fn test_combined_filter() {
        let dataset = sample_dataset();
        let plan = plan_meals(&dataset, Some("vegetarian"), Some("North"));
        assert_eq!(plan.dishes(), ["Kheer"]);
    }

    #[test]
    fn test_case_insensitive_and_trimmed() {
        let dataset = sample_dataset();
        let plan = plan_meals(&dataset, Some(" Vegetarian "), Some("SOUTH"));
        assert_eq!(plan.dishes(), ["Dosa"]);
    }

    #[test]
    fn test_single_criterion_source_order() {
        let dataset = sample_dataset();
        let plan = plan_meals(&dataset, None, Some("North"));
        assert_eq!(plan.dishes(), ["Kheer", "Rogan Josh"]);
    }

    #[test]
    fn test_unknown_region_falls_back_to_diet() {
        let dataset = sample_dataset();
        // Combined filter and region-only both come up empty; diet-only
        // still matches, so the sentinel is not returned.
        let plan = plan_meals(&dataset, Some("vegetarian"), Some("Atlantis"));
        assert_eq!(plan.dishes(), ["Dosa", "Kheer"]);
    }

    #[test]
    fn test_unknown_diet_falls_back_to_region() {
        let dataset = sample_dataset();
        let plan = plan_meals(&dataset, Some("vegan"), Some("East"));
        assert_eq!(plan.dishes(), ["Macher Jhol"]);
    }

    #[test]
    fn test_no_match_sentinel() {
        let dataset = sample_dataset();
        let plan = plan_meals(&dataset, Some("vegan"), Some("Atlantis"));
        assert!(plan.is_no_match());
        assert!(plan.dishes().is_empty());

        // A single criterion has nothing to relax to.
        let plan = plan_meals(&dataset, Some("vegan"), None);
        assert!(plan.is_no_match());
    }

    #[test]
    fn test_blank_criterion_treated_as_absent() {
        let dataset = sample_dataset();
        let plan = plan_meals(&dataset, Some("  "), Some("East"));
        assert_eq!(plan.dishes(), ["Macher Jhol"]);
    }
}
