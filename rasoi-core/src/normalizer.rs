//! Ingredient normalization.
//!
//! Maps raw ingredient spellings to canonical labels via a fixed synonym
//! table and drops filler tokens. The table is static configuration data:
//! it intentionally conflates ingredients by culinary role (all cooking
//! oils become "oil", all dal varieties become "dal / lentils") so that
//! pairing statistics are computed over roles rather than brand-level
//! spellings.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Tokens discarded after trimming. "and", "a" and "of" show up when users
/// paste free-text ingredient lists ("rice and dal").
const STOP_WORDS: &[&str] = &["and", "a", "of"];

/// Raw spelling -> canonical label. Lookup misses pass through unchanged,
/// so only spellings that need folding are listed.
static SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Oils
    m.insert("mustard oil", "oil");
    m.insert("vegetable oil", "oil");
    m.insert("sunflower oil", "oil");
    m.insert("sesame oil", "oil");
    m.insert("peanut oil", "oil");
    m.insert("olive oil", "oil");

    // Fats
    m.insert("clarified butter", "ghee");
    m.insert("butter", "ghee");

    // Flours
    m.insert("maida flour", "maida / all-purpose flour");
    m.insert("plain flour", "maida / all-purpose flour");
    m.insert("white flour", "maida / all-purpose flour");
    m.insert("all purpose flour", "maida / all-purpose flour");
    m.insert("refined flour", "maida / all-purpose flour");
    m.insert("gram flour", "besan / gram flour");
    m.insert("besan flour", "besan / gram flour");
    m.insert("whole wheat flour", "wheat flour");
    m.insert("atta", "wheat flour");

    // Rice
    m.insert("rice flour", "rice / rice flour");
    m.insert("raw rice", "rice / rice flour");
    m.insert("idli rice", "rice / rice flour");
    m.insert("brown rice", "rice / rice flour");
    m.insert("sticky rice", "rice / rice flour");
    m.insert("forbidden black rice", "rice / rice flour");

    // Semolina
    m.insert("semolina", "semolina / rava");
    m.insert("rava", "semolina / rava");
    m.insert("sooji", "semolina / rava");

    // Dals. Urad dal keeps its own label; the rest fold together.
    m.insert("split urad dal", "urad dal");
    m.insert("whole urad dal", "urad dal");
    m.insert("chana dal", "dal / lentils");
    m.insert("split pigeon peas", "dal / lentils");
    m.insert("arhar dal", "dal / lentils");
    m.insert("moong dal", "dal / lentils");
    m.insert("masoor dal", "dal / lentils");
    m.insert("toor dal", "dal / lentils");

    // Dairy
    m.insert("curd", "yogurt / curd");
    m.insert("yogurt", "yogurt / curd");
    m.insert("dahi", "yogurt / curd");
    m.insert("milk powder", "milk");
    m.insert("condensed milk", "milk");
    m.insert("reduced milk", "milk");

    // Sweeteners
    m.insert("gur", "jaggery");

    // Aromatics
    m.insert("ginger paste", "ginger");
    m.insert("ginger powder", "ginger");
    m.insert("garlic paste", "garlic");
    m.insert("garlic powder", "garlic");
    m.insert("cardamom pods", "cardamom");
    m.insert("green cardamom", "cardamom");
    m.insert("rose water", "rose extract");
    m.insert("kewra", "kewra extract");

    // Proteins
    m.insert("chicken", "meat");
    m.insert("mutton", "meat");
    m.insert("pork", "meat");
    m.insert("lamb", "meat");
    m.insert("beef", "meat");
    m.insert("fish", "seafood");
    m.insert("prawns", "seafood");
    m.insert("lobster", "seafood");
    m.insert("bombay duck", "seafood");
    m.insert("cottage cheese", "paneer / cheese");
    m.insert("chenna", "paneer / cheese");
    m.insert("chhena", "paneer / cheese");
    m.insert("paneer", "paneer / cheese");

    m
});

/// Canonicalize a single raw token.
///
/// Lowercases and trims, folds through the synonym table, then drops
/// blanks and stop-words. Unknown spellings pass through as their own
/// canonical label.
pub fn canonicalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim().to_lowercase();
    let canonical = SYNONYMS
        .get(trimmed.as_str())
        .map(|&c| c.to_string())
        .unwrap_or(trimmed);

    if canonical.is_empty() || STOP_WORDS.contains(&canonical.as_str()) {
        None
    } else {
        Some(canonical)
    }
}

/// Normalize a list of raw ingredient strings, preserving order.
///
/// Pure function over the static synonym table; never fails. Canonical
/// input comes back unchanged.
pub fn normalize<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .filter_map(|token| canonicalize(token.as_ref()))
        .collect()
}

/// Split a comma-separated ingredient string and normalize the pieces.
///
/// This is the shape both dataset rows and free-text user input arrive in.
pub fn normalize_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(canonicalize)
        .collect()
}

/// Display-case a label: uppercase the first letter of every word,
/// lowercase the rest. A word boundary is any non-alphabetic character,
/// so "all-purpose flour" becomes "All-Purpose Flour".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_folding() {
        assert_eq!(
            normalize(&["Mustard Oil", "Butter", " and "]),
            vec!["oil", "ghee"]
        );
        assert_eq!(canonicalize("CHICKEN"), Some("meat".to_string()));
        assert_eq!(canonicalize("chhena"), Some("paneer / cheese".to_string()));
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(canonicalize(" Tamarind "), Some("tamarind".to_string()));
        assert_eq!(normalize(&["turmeric"]), vec!["turmeric"]);
    }

    #[test]
    fn test_stop_words_and_blanks_dropped() {
        assert_eq!(normalize(&["", "  ", "and", "a", "of", "A", "OF"]), Vec::<String>::new());
        assert_eq!(
            normalize_input("rice, and, , toor dal"),
            vec!["rice", "dal / lentils"]
        );
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let canonical = vec!["oil", "ghee", "meat", "dal / lentils", "rice / rice flour"];
        assert_eq!(normalize(&canonical), canonical);
    }

    #[test]
    fn test_order_preserved() {
        assert_eq!(
            normalize_input("onion, garlic, ginger paste"),
            vec!["onion", "garlic", "ginger"]
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("butter chicken"), "Butter Chicken");
        assert_eq!(
            title_case("maida / all-purpose flour"),
            "Maida / All-Purpose Flour"
        );
        assert_eq!(title_case("OIL"), "Oil");
        assert_eq!(title_case(""), "");
    }
}
