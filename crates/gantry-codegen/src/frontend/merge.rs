use std::sync::LazyLock;

use gantry_core::Name;
use regex::Regex;
use tracing::{error, info};

use crate::error::Result;
use crate::project::Project;
use crate::render::{read_file, write_file};

static TYPE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)export type ModuleResources = \{(.*?)\};").unwrap());

static OBJECT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)export const moduleResources[^=]*= \{(.*?)\};").unwrap());

const AGGREGATOR_SEED: &str = "export type ResourceLoader = (locale: string) => Promise<unknown>;

export type ModuleResources = {
};

export const moduleResources: Record<string, ResourceLoader> = {
};
";

/// Append the five hook re-exports to the shared hooks barrel, guarded by
/// the presence of the list-hook export name.
pub fn patch_hooks_barrel(project: &Project, module: &Name, entity: &Name) -> Result<()> {
    let path = project.hooks_barrel_path();
    let pascal = entity.upper_camel_case();
    let kebab = entity.kebab_case();
    let module_path = format!("../modules/{}/{}", module.kebab_case(), kebab);

    let marker = format!("use{pascal}List");
    let contents = if path.exists() { read_file(&path)? } else { String::new() };
    if contents.contains(&marker) {
        info!(entity = %pascal, "hooks already exported, skipping");
        return Ok(());
    }

    let exports = [
        format!("export {{ use{pascal}List }} from '{module_path}/hooks/use-{kebab}-list';"),
        format!("export {{ use{pascal} }} from '{module_path}/hooks/use-{kebab}';"),
        format!("export {{ useCreate{pascal} }} from '{module_path}/hooks/use-create-{kebab}';"),
        format!("export {{ useUpdate{pascal} }} from '{module_path}/hooks/use-update-{kebab}';"),
        format!("export {{ useDelete{pascal} }} from '{module_path}/hooks/use-delete-{kebab}';"),
    ];

    let mut updated = contents;
    for export in exports {
        updated.push_str(&export);
        updated.push('\n');
    }
    write_file(&path, &updated)
}

/// Insert the entity's member into both aggregator blocks: the
/// `ModuleResources` type literal and the `moduleResources` object literal.
/// When either block is missing its expected shape the file is left alone
/// and only this patch is abandoned; the rest of the run continues.
pub fn patch_i18n_aggregator(project: &Project, module: &Name, entity: &Name) -> Result<()> {
    let path = project.i18n_aggregator_path();
    if !path.exists() {
        write_file(&path, AGGREGATOR_SEED)?;
    }

    let contents = read_file(&path)?;
    let camel = entity.camel_case();
    let member_marker = format!("  {camel}:");
    if contents.contains(&member_marker) {
        info!(entity = %camel, "i18n resources already registered, skipping");
        return Ok(());
    }

    let (Some(type_block), Some(object_block)) = (
        TYPE_BLOCK_RE.captures(&contents),
        OBJECT_BLOCK_RE.captures(&contents),
    ) else {
        error!(path = %path.display(), "aggregator blocks not found, leaving file unmodified");
        return Ok(());
    };

    let type_member = format!("  {camel}: ResourceLoader;\n");
    let object_member = format!(
        "  {camel}: (locale: string) => import(`../modules/{}/{}/locales/${{locale}}.json`),\n",
        module.kebab_case(),
        entity.kebab_case()
    );

    let type_end = type_block.get(1).expect("type block group").end();
    let object_end = object_block.get(1).expect("object block group").end();

    // Later offset first so the earlier insertion point stays valid.
    let mut updated = contents.clone();
    let (first, second) = if object_end > type_end {
        ((object_end, object_member), (type_end, type_member))
    } else {
        ((type_end, type_member), (object_end, object_member))
    };
    updated.insert_str(first.0, &first.1);
    updated.insert_str(second.0, &second.1);

    write_file(&path, &updated)
}
