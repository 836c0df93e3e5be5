pub mod builder;
pub mod error;
pub mod field;
pub mod manifest;
pub mod name;
pub mod replace;
pub mod rules;
pub mod schema;

pub use error::{Error, Result};
pub use field::{Cast, Field, Relation, RelationKind};
pub use manifest::Manifest;
pub use name::Name;
pub use replace::{PlaceholderStyle, ReplacementMap};
pub use rules::TypeRules;
pub use schema::{Constants, SchemaModel};
