pub mod constants;
pub mod parser;

pub use constants::Constants;
pub use parser::{find_migration, has_many_relations, parse, parse_source, SchemaModel};
