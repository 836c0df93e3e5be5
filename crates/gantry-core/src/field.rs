use serde::{Deserialize, Serialize};

use crate::name::Name;

/// Runtime cast applied by the generated model when reading a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cast {
    Integer,
    Boolean,
    String,
    Datetime,
}

impl Cast {
    pub fn as_str(self) -> &'static str {
        match self {
            Cast::Integer => "integer",
            Cast::Boolean => "boolean",
            Cast::String => "string",
            Cast::Datetime => "datetime",
        }
    }

    /// TypeScript type used for DTO properties carrying this cast.
    pub fn ts_type(self) -> &'static str {
        match self {
            Cast::Integer => "number",
            Cast::Boolean => "boolean",
            Cast::String => "string",
            Cast::Datetime => "string | null",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    BelongsTo,
    HasMany,
}

/// A relationship between the generated entity and another table. BelongsTo
/// attaches to the declaring foreign-key column; HasMany is synthesized per
/// referencing table and has no owning column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub kind: RelationKind,
    /// Accessor method name on the generated model, camel-cased.
    pub accessor: Name,
    /// Related entity name, singular.
    pub entity: Name,
    /// Related table name.
    pub table: String,
    /// Foreign-key column backing the relation. For BelongsTo this is the
    /// declaring column on the owning table; for HasMany it is the column on
    /// the related table that points back here.
    pub foreign_key: String,
}

impl Relation {
    pub fn belongs_to(column: &str, table: &str) -> Self {
        let base = column.strip_suffix("_id").unwrap_or(column);
        Relation {
            kind: RelationKind::BelongsTo,
            accessor: Name::new(base),
            entity: crate::name::singular(table),
            table: table.to_string(),
            foreign_key: column.to_string(),
        }
    }

    pub fn has_many(table: &str, foreign_key: &str) -> Self {
        Relation {
            kind: RelationKind::HasMany,
            accessor: Name::new(table),
            entity: crate::name::singular(table),
            table: table.to_string(),
            foreign_key: foreign_key.to_string(),
        }
    }
}

/// One recovered schema column, or a relation field synthesized from a
/// referencing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: Name,
    /// Column-declaration method that produced the field (`string`,
    /// `integer`, ... or `hasMany` for synthesized relation fields).
    pub method: String,
    pub required: bool,
    pub has_default: bool,
    pub default_literal: Option<String>,
    pub unique: bool,
    pub cast: Option<Cast>,
    /// Base validation rule expression, pipe-delimited.
    pub rule: String,
    pub relation: Option<Relation>,
    /// Owning table name.
    pub table: String,
}

impl Field {
    pub fn is_has_many(&self) -> bool {
        matches!(
            self.relation,
            Some(Relation {
                kind: RelationKind::HasMany,
                ..
            })
        )
    }

    pub fn is_belongs_to(&self) -> bool {
        matches!(
            self.relation,
            Some(Relation {
                kind: RelationKind::BelongsTo,
                ..
            })
        )
    }

    /// Synthesize the field carrying a HasMany relation. The field holds the
    /// related record ids, so it always defaults to an empty collection.
    pub fn from_has_many(relation: Relation, table: &str) -> Self {
        Field {
            name: Name::new(&relation.table),
            method: "hasMany".to_string(),
            required: false,
            has_default: true,
            default_literal: Some("[]".to_string()),
            unique: false,
            cast: None,
            rule: "array".to_string(),
            relation: Some(relation),
            table: table.to_string(),
        }
    }
}
