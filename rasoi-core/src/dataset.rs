//! Dish dataset loading.
//!
//! Parses the flat dish table (name, diet, region, comma-separated
//! ingredients) into in-memory rows, normalizes every ingredient list, and
//! builds the derived structures the recommenders read: the canonical
//! ingredient vocabulary and the dish-by-ingredient membership table.
//! Everything here is built once and read-only afterward.

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::normalizer;

/// One row of the source table before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRow {
    pub name: String,
    pub diet: String,
    pub region: String,
    /// Comma-separated raw ingredient string, as it appears in the table.
    pub ingredients: String,
}

/// A dish after load-time normalization. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dish {
    /// Display form of the name.
    pub name: String,
    /// Lowercased, trimmed name used for matching.
    pub name_normalized: String,
    pub diet: String,
    pub region: String,
    /// Canonical ingredient labels, deduplicated.
    pub ingredients: BTreeSet<String>,
}

/// The loaded dataset plus its derived structures.
#[derive(Debug, Clone)]
pub struct Dataset {
    dishes: Vec<Dish>,
    /// All distinct canonical ingredients, sorted.
    vocabulary: Vec<String>,
    vocab_index: HashMap<String, usize>,
    /// `membership[d][i]` is true iff `vocabulary[i]` is in dish `d`.
    membership: Vec<Vec<bool>>,
}

/// Indexes of the required columns within a header row.
struct Columns {
    name: usize,
    diet: usize,
    region: usize,
    ingredients: usize,
}

impl Dataset {
    /// Load the dataset from a CSV file on disk.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::DataUnavailable {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv_str(&content)
    }

    /// Load the dataset from CSV content already in memory.
    ///
    /// The header row locates the `name`, `diet`, `region` and
    /// `ingredients` columns, so extra columns and reordered layouts are
    /// tolerated. Malformed rows are skipped, not fatal.
    pub fn from_csv_str(content: &str) -> Result<Self, LoadError> {
        let records = parse_records(content);
        let Some((header, rows)) = records.split_first() else {
            tracing::warn!("dataset CSV is empty");
            return Err(LoadError::EmptyDataset);
        };

        let Some(columns) = locate_columns(header) else {
            tracing::warn!(
                "dataset CSV header is missing one of the name/diet/region/ingredients columns"
            );
            return Err(LoadError::EmptyDataset);
        };

        let required = columns.widest();
        let mut source_rows = Vec::with_capacity(rows.len());
        for (line, record) in rows.iter().enumerate() {
            if record.len() <= required {
                tracing::warn!(row = line + 2, fields = record.len(), "skipping short row");
                continue;
            }
            source_rows.push(SourceRow {
                name: record[columns.name].clone(),
                diet: record[columns.diet].clone(),
                region: record[columns.region].clone(),
                ingredients: record[columns.ingredients].clone(),
            });
        }

        Self::from_rows(source_rows)
    }

    /// Build the dataset from pre-parsed source rows.
    ///
    /// Fails with `EmptyDataset` when no row yields a non-empty ingredient
    /// set; a model mined from zero transactions would be meaningless.
    pub fn from_rows(rows: Vec<SourceRow>) -> Result<Self, LoadError> {
        let dishes: Vec<Dish> = rows
            .iter()
            .map(|row| Dish {
                name: row.name.trim().to_string(),
                name_normalized: row.name.trim().to_lowercase(),
                diet: row.diet.trim().to_string(),
                region: row.region.trim().to_string(),
                ingredients: normalizer::normalize_input(&row.ingredients)
                    .into_iter()
                    .collect(),
            })
            .collect();

        if dishes.iter().all(|d| d.ingredients.is_empty()) {
            return Err(LoadError::EmptyDataset);
        }

        let vocabulary: Vec<String> = dishes
            .iter()
            .flat_map(|d| d.ingredients.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let vocab_index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, ing)| (ing.clone(), i))
            .collect();

        let membership = dishes
            .iter()
            .map(|dish| {
                vocabulary
                    .iter()
                    .map(|ing| dish.ingredients.contains(ing))
                    .collect()
            })
            .collect();

        Ok(Self {
            dishes,
            vocabulary,
            vocab_index,
            membership,
        })
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn dish_count(&self) -> usize {
        self.dishes.len()
    }

    /// All distinct canonical ingredients, sorted.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Whether a canonical label is a known ingredient.
    pub fn is_ingredient(&self, canonical: &str) -> bool {
        self.vocab_index.contains_key(canonical)
    }

    pub fn ingredient_id(&self, canonical: &str) -> Option<usize> {
        self.vocab_index.get(canonical).copied()
    }

    /// The boolean dish-by-ingredient membership table.
    pub fn membership(&self) -> &[Vec<bool>] {
        &self.membership
    }
}

impl Columns {
    fn widest(&self) -> usize {
        self.name
            .max(self.diet)
            .max(self.region)
            .max(self.ingredients)
    }
}

/// Locate the required columns in a header row, case-insensitively.
fn locate_columns(header: &[String]) -> Option<Columns> {
    let find = |wanted: &str| {
        header
            .iter()
            .position(|field| field.trim().eq_ignore_ascii_case(wanted))
    };
    Some(Columns {
        name: find("name")?,
        diet: find("diet")?,
        region: find("region")?,
        ingredients: find("ingredients")?,
    })
}

/// Split CSV content into records of fields.
///
/// Handles double-quoted fields (which may contain commas and newlines)
/// and `""` as an escaped quote. Blank records are dropped.
fn parse_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                flush_record(&mut records, &mut fields);
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        flush_record(&mut records, &mut fields);
    }

    records
}

fn flush_record(records: &mut Vec<Vec<String>>, fields: &mut Vec<String>) {
    let blank = fields.len() == 1 && fields[0].trim().is_empty();
    if blank {
        fields.clear();
    } else {
        records.push(std::mem::take(fields));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, diet: &str, region: &str, ingredients: &str) -> SourceRow {
        SourceRow {
            name: name.to_string(),
            diet: diet.to_string(),
            region: region.to_string(),
            ingredients: ingredients.to_string(),
        }
    }

    #[test]
    fn test_parse_quoted_fields() {
        let records = parse_records("name,diet\n\"Gulab jamun\",\"a, b\"\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], vec!["Gulab jamun", "a, b"]);
    }

    #[test]
    fn test_parse_escaped_quote_and_crlf() {
        let records = parse_records("a,b\r\n\"say \"\"hi\"\"\",2\r\n");
        assert_eq!(records[1][0], "say \"hi\"");
        assert_eq!(records[1][1], "2");
    }

    #[test]
    fn test_from_csv_str() {
        let csv = "name,diet,region,ingredients\n\
                   Kheer,vegetarian,North,\"Milk, rice, sugar\"\n\
                   Macher jhol,non vegetarian,East,\"Fish, mustard oil, onion\"\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.dish_count(), 2);

        let kheer = &dataset.dishes()[0];
        assert_eq!(kheer.name, "Kheer");
        assert_eq!(kheer.name_normalized, "kheer");
        assert!(kheer.ingredients.contains("milk"));

        // Normalization applies: fish -> seafood, mustard oil -> oil.
        let jhol = &dataset.dishes()[1];
        assert!(jhol.ingredients.contains("seafood"));
        assert!(jhol.ingredients.contains("oil"));
        assert!(!jhol.ingredients.contains("fish"));
    }

    #[test]
    fn test_extra_and_reordered_columns_tolerated() {
        let csv = "name,ingredients,diet,prep_time,region\n\
                   Poha,\"Flattened rice, onion\",vegetarian,15,Central\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.dishes()[0].region, "Central");
        assert!(dataset.dishes()[0].ingredients.contains("onion"));
    }

    #[test]
    fn test_short_rows_skipped() {
        let csv = "name,diet,region,ingredients\n\
                   broken row\n\
                   Kheer,vegetarian,North,\"Milk, rice\"\n";
        let dataset = Dataset::from_csv_str(csv).unwrap();
        assert_eq!(dataset.dish_count(), 1);
        assert_eq!(dataset.dishes()[0].name, "Kheer");
    }

    #[test]
    fn test_empty_dataset_errors() {
        assert!(matches!(
            Dataset::from_csv_str(""),
            Err(LoadError::EmptyDataset)
        ));
        assert!(matches!(
            Dataset::from_rows(vec![]),
            Err(LoadError::EmptyDataset)
        ));
        // Rows exist but none has a usable ingredient list.
        assert!(matches!(
            Dataset::from_rows(vec![row("Mystery", "vegetarian", "North", " and , ")]),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn test_missing_header_column_errors() {
        let csv = "name,diet,ingredients\nKheer,vegetarian,\"Milk, rice\"\n";
        assert!(matches!(
            Dataset::from_csv_str(csv),
            Err(LoadError::EmptyDataset)
        ));
    }

    #[test]
    fn test_vocabulary_and_membership() {
        let dataset = Dataset::from_rows(vec![
            row("A", "vegetarian", "North", "oil, onion"),
            row("B", "vegetarian", "North", "oil, garlic"),
        ])
        .unwrap();

        assert_eq!(dataset.vocabulary(), ["garlic", "oil", "onion"]);
        assert!(dataset.is_ingredient("oil"));
        assert!(!dataset.is_ingredient("butter"));

        let oil = dataset.ingredient_id("oil").unwrap();
        let onion = dataset.ingredient_id("onion").unwrap();
        assert!(dataset.membership()[0][oil]);
        assert!(dataset.membership()[0][onion]);
        assert!(!dataset.membership()[1][onion]);
    }

    #[test]
    fn test_duplicate_ingredients_collapse() {
        let dataset = Dataset::from_rows(vec![row(
            "Ghevar",
            "vegetarian",
            "West",
            "ghee, clarified butter, sugar",
        )])
        .unwrap();
        // Both spellings fold to "ghee"; the set keeps one.
        assert_eq!(dataset.dishes()[0].ingredients.len(), 2);
    }
}
