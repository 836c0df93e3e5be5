use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Stub templates compiled into the binary. `gantry init` copies these into
/// the project for customization; generation falls back to them when no
/// stubs directory is configured.
pub const EMBEDDED_STUBS: &[(&str, &str)] = &[
    (
        "backend/model.stub",
        include_str!("../../../stubs/backend/model.stub"),
    ),
    (
        "backend/dto.stub",
        include_str!("../../../stubs/backend/dto.stub"),
    ),
    (
        "backend/store-request.stub",
        include_str!("../../../stubs/backend/store-request.stub"),
    ),
    (
        "backend/update-request.stub",
        include_str!("../../../stubs/backend/update-request.stub"),
    ),
    (
        "backend/list-request.stub",
        include_str!("../../../stubs/backend/list-request.stub"),
    ),
    (
        "backend/controller.stub",
        include_str!("../../../stubs/backend/controller.stub"),
    ),
    (
        "backend/service-contract.stub",
        include_str!("../../../stubs/backend/service-contract.stub"),
    ),
    (
        "backend/service.stub",
        include_str!("../../../stubs/backend/service.stub"),
    ),
    (
        "backend/repository-contract.stub",
        include_str!("../../../stubs/backend/repository-contract.stub"),
    ),
    (
        "backend/repository.stub",
        include_str!("../../../stubs/backend/repository.stub"),
    ),
    (
        "backend/resource.stub",
        include_str!("../../../stubs/backend/resource.stub"),
    ),
    (
        "backend/policy.stub",
        include_str!("../../../stubs/backend/policy.stub"),
    ),
    (
        "backend/query.stub",
        include_str!("../../../stubs/backend/query.stub"),
    ),
    (
        "backend/events.stub",
        include_str!("../../../stubs/backend/events.stub"),
    ),
    (
        "backend/factory.stub",
        include_str!("../../../stubs/backend/factory.stub"),
    ),
    (
        "backend/seeder.stub",
        include_str!("../../../stubs/backend/seeder.stub"),
    ),
    (
        "backend/api-test.stub",
        include_str!("../../../stubs/backend/api-test.stub"),
    ),
    (
        "backend/module.stub",
        include_str!("../../../stubs/backend/module.stub"),
    ),
    (
        "backend/barrel.stub",
        include_str!("../../../stubs/backend/barrel.stub"),
    ),
    (
        "backend/container.stub",
        include_str!("../../../stubs/backend/container.stub"),
    ),
    (
        "backend/routes.stub",
        include_str!("../../../stubs/backend/routes.stub"),
    ),
    (
        "backend/providers.stub",
        include_str!("../../../stubs/backend/providers.stub"),
    ),
    (
        "frontend/config.stub",
        include_str!("../../../stubs/frontend/config.stub"),
    ),
    (
        "frontend/types.stub",
        include_str!("../../../stubs/frontend/types.stub"),
    ),
    (
        "frontend/schema.stub",
        include_str!("../../../stubs/frontend/schema.stub"),
    ),
    (
        "frontend/api.stub",
        include_str!("../../../stubs/frontend/api.stub"),
    ),
    (
        "frontend/constants.stub",
        include_str!("../../../stubs/frontend/constants.stub"),
    ),
    (
        "frontend/store.stub",
        include_str!("../../../stubs/frontend/store.stub"),
    ),
    (
        "frontend/routes.stub",
        include_str!("../../../stubs/frontend/routes.stub"),
    ),
    (
        "frontend/index.stub",
        include_str!("../../../stubs/frontend/index.stub"),
    ),
    (
        "frontend/hook-list.stub",
        include_str!("../../../stubs/frontend/hook-list.stub"),
    ),
    (
        "frontend/hook-one.stub",
        include_str!("../../../stubs/frontend/hook-one.stub"),
    ),
    (
        "frontend/hook-create.stub",
        include_str!("../../../stubs/frontend/hook-create.stub"),
    ),
    (
        "frontend/hook-update.stub",
        include_str!("../../../stubs/frontend/hook-update.stub"),
    ),
    (
        "frontend/hook-delete.stub",
        include_str!("../../../stubs/frontend/hook-delete.stub"),
    ),
    (
        "frontend/component-table.stub",
        include_str!("../../../stubs/frontend/component-table.stub"),
    ),
    (
        "frontend/component-form.stub",
        include_str!("../../../stubs/frontend/component-form.stub"),
    ),
    (
        "frontend/component-filters.stub",
        include_str!("../../../stubs/frontend/component-filters.stub"),
    ),
    (
        "frontend/component-detail.stub",
        include_str!("../../../stubs/frontend/component-detail.stub"),
    ),
    (
        "frontend/page-list.stub",
        include_str!("../../../stubs/frontend/page-list.stub"),
    ),
    (
        "frontend/page-edit.stub",
        include_str!("../../../stubs/frontend/page-edit.stub"),
    ),
];

/// Source of stub templates: a project-local directory when one was
/// configured, otherwise the embedded set.
#[derive(Debug, Clone, Default)]
pub struct Stubs {
    dir: Option<PathBuf>,
}

impl Stubs {
    pub fn embedded() -> Self {
        Stubs { dir: None }
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Stubs {
            dir: Some(dir.into()),
        }
    }

    /// Load one template. A configured directory is authoritative: a stub
    /// missing from it aborts the run rather than silently falling back.
    pub fn load(&self, name: &str) -> Result<String> {
        match &self.dir {
            Some(dir) => {
                let path = dir.join(name);
                fs::read_to_string(&path).map_err(|_| Error::StubMissing {
                    name: name.to_string(),
                    dir: dir.clone(),
                })
            }
            None => EMBEDDED_STUBS
                .iter()
                .find(|(stub, _)| *stub == name)
                .map(|(_, body)| (*body).to_string())
                .ok_or_else(|| Error::StubMissing {
                    name: name.to_string(),
                    dir: PathBuf::from("<embedded>"),
                }),
        }
    }
}

/// Write a freshly rendered file, creating parent directories as needed.
/// Overwrite targets are clobbered unconditionally; regenerating an entity
/// discards hand edits to them.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    debug!(path = %path.display(), "writing");
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
