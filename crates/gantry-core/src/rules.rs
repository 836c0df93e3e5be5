use crate::field::Cast;

/// One row of the column-method lookup: which declaration methods it covers
/// and the cast/rule pair they produce.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    pub methods: &'static [&'static str],
    pub cast: Option<Cast>,
    pub rule: &'static str,
}

/// Declaration-method to (cast, base rule) lookup. Injected into the parser
/// so rule sets can be extended without touching the recovery code.
#[derive(Debug, Clone)]
pub struct TypeRules {
    entries: Vec<TypeRule>,
}

const DEFAULT_RULES: &[TypeRule] = &[
    TypeRule {
        methods: &[
            "increments",
            "bigIncrements",
            "integer",
            "bigInteger",
            "smallint",
            "tinyint",
            "unsignedInteger",
            "foreignId",
        ],
        cast: Some(Cast::Integer),
        rule: "integer",
    },
    TypeRule {
        methods: &["boolean"],
        cast: Some(Cast::Boolean),
        rule: "boolean",
    },
    TypeRule {
        methods: &["string"],
        cast: Some(Cast::String),
        rule: "string|max:255",
    },
    TypeRule {
        methods: &["text", "mediumtext", "longtext"],
        cast: Some(Cast::String),
        rule: "string",
    },
    TypeRule {
        methods: &["date", "datetime", "timestamp", "time"],
        cast: Some(Cast::Datetime),
        rule: "date",
    },
    TypeRule {
        methods: &["decimal", "float", "double"],
        cast: None,
        rule: "numeric",
    },
];

impl Default for TypeRules {
    fn default() -> Self {
        TypeRules {
            entries: DEFAULT_RULES.to_vec(),
        }
    }
}

impl TypeRules {
    pub fn new(entries: Vec<TypeRule>) -> Self {
        TypeRules { entries }
    }

    /// Cast and base rule for a column-declaration method. Unknown methods
    /// fall back to an untyped `string` rule.
    pub fn lookup(&self, method: &str) -> (Option<Cast>, String) {
        for entry in &self.entries {
            if entry.methods.contains(&method) {
                return (entry.cast, entry.rule.to_string());
            }
        }
        (None, "string".to_string())
    }

    /// Rule for an enumerated column: inclusion over the literal options.
    pub fn inclusion(options: &[String]) -> String {
        format!("in:{}", options.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_methods_share_one_row() {
        let rules = TypeRules::default();
        for method in ["integer", "bigInteger", "foreignId"] {
            let (cast, rule) = rules.lookup(method);
            assert_eq!(cast, Some(Cast::Integer));
            assert_eq!(rule, "integer");
        }
    }

    #[test]
    fn unknown_method_falls_back_to_string() {
        let rules = TypeRules::default();
        let (cast, rule) = rules.lookup("geometry");
        assert_eq!(cast, None);
        assert_eq!(rule, "string");
    }

    #[test]
    fn inclusion_joins_options() {
        let options = vec!["draft".to_string(), "sent".to_string()];
        assert_eq!(TypeRules::inclusion(&options), "in:draft,sent");
    }
}
