use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ARRAY_CONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const\s+([A-Z][A-Z0-9_]*)\s*=\s*\[([^\]]*)\]").unwrap());

static OBJECT_CONST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"const\s+([A-Z][A-Z0-9_]*)\s*=\s*\{([^}]*)\}").unwrap());

static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

static PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*:\s*'([^']*)'").unwrap());

/// List-query metadata declared as constants inside a migration file.
///
/// Every set defaults to empty when the declaration is absent or does not
/// match the expected shape; a mis-shaped block is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constants {
    pub sortable_columns: Vec<String>,
    pub filters: IndexMap<String, String>,
    pub searchable_columns: Vec<String>,
    pub fieldable_columns: Vec<String>,
    pub boolean_fields: Vec<String>,
    pub cast_ids: IndexMap<String, String>,
    pub nullable_fields: Vec<String>,
}

impl Constants {
    /// Scrape the named constant declarations out of migration source.
    ///
    /// `SORTABLE_COLUMNS`, `SEARCHABLE_COLUMNS`, `FIELDABLE_COLUMNS`,
    /// `BOOLEAN_FIELDS` and `NULLABLE_FIELDS` are flat quoted-literal
    /// arrays; `FILTERS` and `CAST_IDS` are associative and get their own
    /// key/value extraction. Any other constant name is ignored.
    pub fn parse(src: &str) -> Self {
        let mut constants = Constants::default();

        for caps in ARRAY_CONST.captures_iter(src) {
            let values = quoted_list(&caps[2]);
            match &caps[1] {
                "SORTABLE_COLUMNS" => constants.sortable_columns = values,
                "SEARCHABLE_COLUMNS" => constants.searchable_columns = values,
                "FIELDABLE_COLUMNS" => constants.fieldable_columns = values,
                "BOOLEAN_FIELDS" => constants.boolean_fields = values,
                "NULLABLE_FIELDS" => constants.nullable_fields = values,
                _ => {}
            }
        }

        for caps in OBJECT_CONST.captures_iter(src) {
            let pairs = pair_map(&caps[2]);
            match &caps[1] {
                "FILTERS" => constants.filters = pairs,
                "CAST_IDS" => constants.cast_ids = pairs,
                _ => {}
            }
        }

        constants
    }
}

fn quoted_list(body: &str) -> Vec<String> {
    QUOTED
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn pair_map(body: &str) -> IndexMap<String, String> {
    PAIR.captures_iter(body)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scrapes_flat_and_associative_sets() {
        let src = r"
const SORTABLE_COLUMNS = ['id', 'title', 'amount'];
const FILTERS = { status: 'eq', archived: 'bool' };
const CAST_IDS = { customer_id: 'int' };
const UNRELATED = ['ignored'];
";
        let constants = Constants::parse(src);
        assert_eq!(constants.sortable_columns, vec!["id", "title", "amount"]);
        assert_eq!(constants.filters.get("status").map(String::as_str), Some("eq"));
        assert_eq!(constants.cast_ids.len(), 1);
        assert!(constants.searchable_columns.is_empty());
    }

    #[test]
    fn mis_shaped_block_defaults_to_empty() {
        // FILTERS declared as an array is not the associative shape; it must
        // silently stay empty rather than fail.
        let src = "const FILTERS = ['status'];";
        let constants = Constants::parse(src);
        assert!(constants.filters.is_empty());
    }

    #[test]
    fn absent_declarations_default_to_empty() {
        let constants = Constants::parse("export async function up() {}");
        assert_eq!(constants, Constants::default());
    }
}
