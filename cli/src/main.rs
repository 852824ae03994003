//! Command-line host for the recommendation engine.
//!
//! Loads the dish dataset once, builds the engine, and runs one operation
//! per invocation. Query validation (for example "at least one of diet or
//! region") lives here, not in the engine.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rasoi_core::{
    normalize_input, Engine, MealPlan, MinerConfig, DEFAULT_DISH_LIMIT, DEFAULT_PAIRING_LIMIT,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "rasoi")]
#[command(about = "Ingredient pairing and dish recommendations", long_about = None)]
struct Cli {
    /// Path to the dish dataset CSV
    #[arg(long, default_value = "data/indian_food.csv", global = true)]
    data: PathBuf,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest ingredients that pair with the given ones
    Pairings {
        /// Comma-separated ingredient list, e.g. "oil, onion"
        #[arg(long)]
        ingredients: String,
        /// Maximum number of suggestions
        #[arg(long, default_value_t = DEFAULT_PAIRING_LIMIT)]
        top: usize,
    },
    /// Recommend dishes for a dish name or a key ingredient
    Dishes {
        /// Dish name or ingredient to start from
        query: String,
        /// Maximum number of dishes
        #[arg(long, default_value_t = DEFAULT_DISH_LIMIT)]
        top: usize,
    },
    /// List dishes matching a diet and/or region
    Plan {
        /// Diet type, e.g. "vegetarian"
        #[arg(long)]
        diet: Option<String>,
        /// Region, e.g. "South"
        #[arg(long)]
        region: Option<String>,
    },
    /// Show the top mined association rules
    Rules {
        /// Maximum number of rules
        #[arg(long, default_value_t = 20)]
        top: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let engine = Engine::try_load(&cli.data, &MinerConfig::default())
        .with_context(|| format!("failed to load dish dataset from {}", cli.data.display()))?;

    match cli.command {
        Commands::Pairings { ingredients, top } => run_pairings(&engine, &ingredients, top, cli.json),
        Commands::Dishes { query, top } => run_dishes(&engine, &query, top, cli.json),
        Commands::Plan { diet, region } => run_plan(&engine, diet, region, cli.json),
        Commands::Rules { top } => run_rules(&engine, top, cli.json),
    }
}

fn run_pairings(engine: &Engine, ingredients: &str, top: usize, json: bool) -> Result<()> {
    let cleaned = normalize_input(ingredients);
    if cleaned.is_empty() {
        bail!("no usable ingredients in {ingredients:?}");
    }

    let pairings = engine.suggest_pairings(&cleaned, top);
    if json {
        println!("{}", serde_json::to_string_pretty(&pairings)?);
        return Ok(());
    }

    if pairings.is_empty() {
        println!("No pairings found for {}", cleaned.join(", "));
        return Ok(());
    }
    println!("Pairings for {}:", cleaned.join(", "));
    for pairing in pairings {
        println!("  {:<30} {:.2}", pairing.ingredient, pairing.score);
    }
    Ok(())
}

fn run_dishes(engine: &Engine, query: &str, top: usize, json: bool) -> Result<()> {
    if query.trim().is_empty() {
        bail!("query must not be empty");
    }

    let result = engine.recommend_dishes(query, top);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.dishes.is_empty() {
        println!("No dishes related to '{}'", result.source_label);
        return Ok(());
    }
    println!("Dishes for '{}':", result.source_label);
    for name in result.dishes {
        println!("  {name}");
    }
    Ok(())
}

fn run_plan(engine: &Engine, diet: Option<String>, region: Option<String>, json: bool) -> Result<()> {
    let diet = diet.filter(|d| !d.trim().is_empty());
    let region = region.filter(|r| !r.trim().is_empty());
    if diet.is_none() && region.is_none() {
        bail!("provide --diet and/or --region");
    }

    let plan = engine.plan_meals(diet.as_deref(), region.as_deref());
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    match plan {
        MealPlan::Matches(dishes) => {
            println!("Found {} matching dishes:", dishes.len());
            for name in dishes {
                println!("  {name}");
            }
        }
        MealPlan::NoMatch => println!("No dishes found matching these criteria."),
    }
    Ok(())
}

fn run_rules(engine: &Engine, top: usize, json: bool) -> Result<()> {
    let rules = &engine.rules()[..top.min(engine.rules().len())];
    if json {
        println!("{}", serde_json::to_string_pretty(rules)?);
        return Ok(());
    }

    if rules.is_empty() {
        println!("No association rules cleared the mining thresholds.");
        return Ok(());
    }
    for rule in rules {
        println!(
            "  {{{}}} => {{{}}}  confidence {:.2}  lift {:.2}",
            rule.antecedent.join(", "),
            rule.consequent.join(", "),
            rule.confidence,
            rule.lift
        );
    }
    Ok(())
}
