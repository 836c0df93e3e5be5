/// Ordered placeholder/value pairs applied to a stub by literal
/// find/replace. Substitution is not recursive and values are not escaped.
#[derive(Debug, Clone, Default)]
pub struct ReplacementMap {
    pairs: Vec<(String, String)>,
}

/// How a placeholder name is rendered inside a stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Backend stubs: `{{ name }}`.
    Braced,
    /// Frontend stubs: `{name}`.
    Terse,
}

impl PlaceholderStyle {
    fn token(self, name: &str) -> String {
        match self {
            PlaceholderStyle::Braced => format!("{{{{ {name} }}}}"),
            PlaceholderStyle::Terse => format!("{{{name}}}"),
        }
    }
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a placeholder. Because substitution is literal and ordered,
    /// a placeholder name that is a substring of another active name would
    /// make the result depend on insertion order; that is a programming
    /// error in the generator, so it panics rather than mis-rendering.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        for (existing, _) in &self.pairs {
            assert!(
                !existing.contains(&name) && !name.contains(existing.as_str()),
                "placeholder `{name}` overlaps with `{existing}`"
            );
        }
        self.pairs.push((name, value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Expand every registered placeholder in `template`.
    pub fn apply(&self, template: &str, style: PlaceholderStyle) -> String {
        let mut out = template.to_string();
        for (name, value) in &self.pairs {
            out = out.replace(&style.token(name), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_both_styles() {
        let mut map = ReplacementMap::new();
        map.insert("entityPascal", "Invoice");
        assert_eq!(
            map.apply("class {{ entityPascal }} {}", PlaceholderStyle::Braced),
            "class Invoice {}"
        );
        assert_eq!(
            map.apply("export const {entityPascal} = 1;", PlaceholderStyle::Terse),
            "export const Invoice = 1;"
        );
    }

    #[test]
    fn does_not_expand_recursively() {
        let mut map = ReplacementMap::new();
        map.insert("first", "a {first} b");
        // Each placeholder gets a single pass; a value containing its own
        // token is not expanded again.
        assert_eq!(
            map.apply("{first}", PlaceholderStyle::Terse),
            "a {first} b"
        );
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn rejects_overlapping_names() {
        let mut map = ReplacementMap::new();
        map.insert("entity", "Invoice");
        map.insert("entityPascal", "Invoice");
    }
}
