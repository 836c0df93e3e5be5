use std::sync::LazyLock;

use gantry_core::{Name, PlaceholderStyle, ReplacementMap};
use regex::Regex;
use tracing::{error, info};

use crate::error::Result;
use crate::project::Project;
use crate::render::{read_file, write_file, Stubs};

static REGISTER_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^export function registerServices\(container: Container\): void \{$")
        .unwrap()
});

const IMPORT_ANCHOR: &str = "import { Container } from '@gantry/core';";

/// Upsert the entity's service/repository bindings into the shared
/// container file. The file is created from its stub when absent; when the
/// binding already exists the patch is skipped; otherwise missing import
/// lines land right after the framework import and the binding statement
/// becomes the first line of the `registerServices` body.
pub fn patch(project: &Project, stubs: &Stubs, module: &Name, entity: &Name) -> Result<()> {
    let path = project.container_path();
    let pascal = entity.upper_camel_case();
    let module_path = format!(
        "../modules/{}/{}",
        module.snake_case(),
        entity.snake_case()
    );

    let imports = [
        format!("import {{ {pascal}Repository }} from '{module_path}/repository';"),
        format!("import {{ {pascal}Service }} from '{module_path}/service';"),
    ];
    let binding = format!(
        "  container.bind('{pascal}ServiceContract', {pascal}Service).bind('{pascal}RepositoryContract', {pascal}Repository);"
    );

    if !path.exists() {
        let template = stubs.load("backend/container.stub")?;
        write_file(&path, &ReplacementMap::new().apply(&template, PlaceholderStyle::Braced))?;
    }

    let contents = read_file(&path)?;
    if contents.contains(&binding) {
        info!(entity = %pascal, "container binding already registered, skipping");
        return Ok(());
    }

    // Both anchors must resolve before anything is written, so a partial
    // patch never reaches disk.
    let Some(import_at) = contents.find(IMPORT_ANCHOR) else {
        error!(path = %path.display(), "container import anchor not found, leaving file unmodified");
        return Ok(());
    };
    let Some(register) = REGISTER_ANCHOR.find(&contents) else {
        error!(path = %path.display(), "registerServices anchor not found, leaving file unmodified");
        return Ok(());
    };

    let mut updated = contents.clone();

    // Binding first: its offset is past the import anchor, so inserting the
    // imports afterwards would invalidate it.
    let body_start = register.end() + 1;
    updated.insert_str(body_start.min(updated.len()), &format!("{binding}\n"));

    let mut import_insert = import_at + IMPORT_ANCHOR.len() + 1;
    for import in &imports {
        if updated.contains(import.as_str()) {
            continue;
        }
        let line = format!("{import}\n");
        updated.insert_str(import_insert.min(updated.len()), &line);
        import_insert += line.len();
    }

    write_file(&path, &updated)
}
