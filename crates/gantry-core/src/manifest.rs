use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::field::Field;
use crate::name::Name;
use crate::schema::constants::Constants;

/// Intermediate field manifest persisted by the backend phase next to the
/// generated module and consumed by the frontend phase. This is the
/// explicit hand-off between the two passes; regex recovery of generated
/// sources is only the fallback for modules that predate manifests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub module: Name,
    pub entity: Name,
    pub table: String,
    pub fields: Vec<Field>,
    pub constants: Constants,
}

impl Manifest {
    pub const FILE_NAME: &'static str = ".manifest.json";

    pub fn write(&self, module_dir: &Path) -> Result<(), Error> {
        let path = module_dir.join(Self::FILE_NAME);
        let body = serde_json::to_string_pretty(self).map_err(|source| Error::Manifest {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, body).map_err(|source| Error::Write { path, source })
    }

    /// Load the manifest for a generated module, `None` when the module was
    /// generated before manifests existed.
    pub fn read(module_dir: &Path) -> Result<Option<Manifest>, Error> {
        let path = module_dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let body = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let manifest =
            serde_json::from_str(&body).map_err(|source| Error::Manifest { path, source })?;
        Ok(Some(manifest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::TypeRules;
    use crate::schema::parser::parse_source;

    #[test]
    fn round_trips_through_disk() {
        let model = parse_source(
            r"schema.createTable('invoices', (table) => {
                table.string('title').notNullable();
                table.integer('customer_id').references('id').inTable('customers');
            });
            const SORTABLE_COLUMNS = ['id', 'title'];",
            &TypeRules::default(),
        );
        let manifest = Manifest {
            module: Name::new("Billing"),
            entity: Name::new("Invoice"),
            table: model.table.clone(),
            fields: model.fields.clone(),
            constants: model.constants.clone(),
        };

        let dir = tempfile::tempdir().unwrap();
        manifest.write(dir.path()).unwrap();
        let loaded = Manifest::read(dir.path()).unwrap().expect("manifest written");

        assert_eq!(loaded.table, "invoices");
        assert_eq!(loaded.fields, model.fields);
        assert_eq!(loaded.constants.sortable_columns, vec!["id", "title"]);
    }

    #[test]
    fn absent_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Manifest::read(dir.path()).unwrap().is_none());
    }
}
