use std::path::{Path, PathBuf};

use gantry_core::Name;

/// Locale codes the admin application ships with.
pub const LOCALES: &[&str] = &["en", "ru", "uz"];

/// Well-known paths inside the target application tree.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Project { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn migrations_dir(&self) -> PathBuf {
        self.root.join("server/migrations")
    }

    /// Directory of one generated backend module.
    pub fn backend_module_dir(&self, module: &Name, entity: &Name) -> PathBuf {
        self.root
            .join("server/src/modules")
            .join(module.snake_case())
            .join(entity.snake_case())
    }

    pub fn container_path(&self) -> PathBuf {
        self.root.join("server/src/app/container.ts")
    }

    pub fn routes_path(&self) -> PathBuf {
        self.root.join("server/src/routes/api.ts")
    }

    pub fn providers_path(&self) -> PathBuf {
        self.root.join("server/src/app/providers.ts")
    }

    pub fn server_locale_path(&self, locale: &str) -> PathBuf {
        self.root.join("server/locales").join(format!("{locale}.json"))
    }

    /// Directory of one generated frontend module.
    pub fn frontend_module_dir(&self, module: &Name, entity: &Name) -> PathBuf {
        self.root
            .join("web/src/modules")
            .join(module.kebab_case())
            .join(entity.kebab_case())
    }

    pub fn hooks_barrel_path(&self) -> PathBuf {
        self.root.join("web/src/hooks/index.ts")
    }

    pub fn i18n_aggregator_path(&self) -> PathBuf {
        self.root.join("web/src/i18n/resources.ts")
    }
}
