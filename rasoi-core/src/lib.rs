//! Recipe pairing and recommendation engine.
//!
//! Loads a flat dish table once, mines association rules over the per-dish
//! ingredient sets, and answers three kinds of questions: which
//! ingredients pair with a given set, which dishes resemble a given dish
//! or contain a given ingredient, and which dishes fit a diet/region
//! filter. All state is built at load time and read-only afterward.

pub mod dataset;
pub mod dishes;
pub mod engine;
pub mod error;
pub mod miner;
pub mod normalizer;
pub mod pairing;
pub mod planner;

pub use dataset::{Dataset, Dish, SourceRow};
pub use dishes::{DishRecommendations, DEFAULT_DISH_LIMIT};
pub use engine::Engine;
pub use error::LoadError;
pub use miner::{mine_rules, AssociationRule, MinerConfig};
pub use normalizer::{normalize, normalize_input, title_case};
pub use pairing::{Pairing, DEFAULT_PAIRING_LIMIT};
pub use planner::MealPlan;
