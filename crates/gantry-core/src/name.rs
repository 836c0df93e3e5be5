use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An entity, table or column name, normalized to snake-case parts and
/// rendered on demand in whichever casing a target file needs.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake.split('_').map(String::from).collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn camel_case(&self) -> String {
        self.snake_case().to_lower_camel_case()
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    pub fn kebab_case(&self) -> String {
        self.snake_case().to_kebab_case()
    }

    pub fn upper_snake_case(&self) -> String {
        self.snake_case().to_uppercase()
    }

    /// Pluralized snake-case rendering. Only the final part is pluralized,
    /// so `invoice_item` becomes `invoice_items`.
    pub fn plural_snake_case(&self) -> String {
        pluralizer::pluralize(&self.snake_case(), 2, false)
    }

    pub fn plural_camel_case(&self) -> String {
        self.plural_snake_case().to_lower_camel_case()
    }

    pub fn plural_upper_camel_case(&self) -> String {
        self.plural_snake_case().to_upper_camel_case()
    }

    pub fn plural_kebab_case(&self) -> String {
        self.plural_snake_case().to_kebab_case()
    }
}

/// Singularize a table name into an entity `Name`: `customers` -> `customer`.
pub fn singular(table: &str) -> Name {
    Name::new(&pluralizer::pluralize(table, 1, false))
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.snake_case())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Name::new(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_all_casings() {
        let name = Name::new("InvoiceItem");
        assert_eq!(name.snake_case(), "invoice_item");
        assert_eq!(name.camel_case(), "invoiceItem");
        assert_eq!(name.upper_camel_case(), "InvoiceItem");
        assert_eq!(name.kebab_case(), "invoice-item");
        assert_eq!(name.upper_snake_case(), "INVOICE_ITEM");
    }

    #[test]
    fn pluralizes_last_part_only() {
        let name = Name::new("invoice_item");
        assert_eq!(name.plural_snake_case(), "invoice_items");
        assert_eq!(name.plural_upper_camel_case(), "InvoiceItems");
    }

    #[test]
    fn singular_of_table() {
        assert_eq!(singular("companies").snake_case(), "company");
        assert_eq!(singular("users").upper_camel_case(), "User");
    }
}
