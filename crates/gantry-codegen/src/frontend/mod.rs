mod fragments;
pub mod list_metadata;
mod merge;
pub mod source_model;

use gantry_core::builder::computed_default;
use gantry_core::{Cast, Field, Manifest, Name, PlaceholderStyle, ReplacementMap};
use tracing::info;

use crate::error::Result;
use crate::frontend::list_metadata::ListMetadata;
use crate::project::{Project, LOCALES};
use crate::render::{write_file, Stubs};

/// Per-entity frontend artifacts, relative to the module directory; the
/// relative paths are themselves templates. Every file is freshly
/// overwritten on each run.
const FRONTEND_FILES: &[(&str, &str)] = &[
    ("frontend/config.stub", "config.ts"),
    ("frontend/types.stub", "types.ts"),
    ("frontend/schema.stub", "schema.ts"),
    ("frontend/api.stub", "api.ts"),
    ("frontend/constants.stub", "constants.ts"),
    ("frontend/store.stub", "store.ts"),
    ("frontend/routes.stub", "routes.tsx"),
    ("frontend/index.stub", "index.ts"),
    ("frontend/hook-list.stub", "hooks/use-{entityKebab}-list.ts"),
    ("frontend/hook-one.stub", "hooks/use-{entityKebab}.ts"),
    ("frontend/hook-create.stub", "hooks/use-create-{entityKebab}.ts"),
    ("frontend/hook-update.stub", "hooks/use-update-{entityKebab}.ts"),
    ("frontend/hook-delete.stub", "hooks/use-delete-{entityKebab}.ts"),
    ("frontend/component-table.stub", "components/{entityPascal}Table.tsx"),
    ("frontend/component-form.stub", "components/{entityPascal}Form.tsx"),
    ("frontend/component-filters.stub", "components/{entityPascal}Filters.tsx"),
    ("frontend/component-detail.stub", "components/{entityPascal}DetailDrawer.tsx"),
    ("frontend/page-list.stub", "pages/{entityPascal}ListPage.tsx"),
    ("frontend/page-edit.stub", "pages/{entityPascal}EditPage.tsx"),
];

/// Fields the UI never edits directly; they are synthesized into the type
/// and table fragments where needed.
const SYNTHETIC_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// One field of the frontend model, recovered either from the persisted
/// manifest or from the generated backend sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendField {
    pub name: Name,
    pub ts_type: String,
    pub required: bool,
    pub default: Option<String>,
    pub options: Vec<String>,
    pub nullable: bool,
    pub datetime: bool,
}

impl FrontendField {
    fn from_manifest(field: &Field) -> FrontendField {
        let ts_type = if field.is_has_many() {
            "number[]".to_string()
        } else {
            match field.cast {
                Some(Cast::Integer) => "number",
                Some(Cast::Boolean) => "boolean",
                _ => "string",
            }
            .to_string()
        };
        let default = (field.has_default || field.is_has_many())
            .then(|| computed_default(field));
        FrontendField {
            name: field.name.clone(),
            ts_type,
            required: field.required,
            options: field
                .rule
                .strip_prefix("in:")
                .map(|list| list.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            nullable: !field.required,
            datetime: field.cast == Some(Cast::Datetime),
            default,
        }
    }
}

/// Generate the frontend module matching an already generated backend
/// module.
pub fn generate(project: &Project, stubs: &Stubs, module: &Name, entity: &Name) -> Result<()> {
    let backend_dir = project.backend_module_dir(module, entity);

    let (mut fields, table) = match Manifest::read(&backend_dir)? {
        Some(manifest) => {
            let fields = manifest.fields.iter().map(FrontendField::from_manifest).collect();
            (fields, manifest.table)
        }
        None => {
            info!(
                module = %backend_dir.display(),
                "no manifest found, recovering the field model from generated sources"
            );
            let fields = source_model::parse(&backend_dir)?;
            (fields, entity.plural_snake_case())
        }
    };
    fields.retain(|field| !SYNTHETIC_FIELDS.contains(&field.name.snake_case().as_str()));

    let metadata = ListMetadata::parse_file(&backend_dir.join("requests/list.ts"));
    let map = build_map(module, entity, &table, &fields, &metadata);

    let web_dir = project.frontend_module_dir(module, entity);
    for (stub, relative_template) in FRONTEND_FILES {
        let template = stubs.load(stub)?;
        let relative = map.apply(relative_template, PlaceholderStyle::Terse);
        write_file(
            &web_dir.join(relative),
            &map.apply(&template, PlaceholderStyle::Terse),
        )?;
    }

    // Locale bundles are rebuilt from scratch on every run; they carry no
    // hand edits by contract.
    for &locale in LOCALES {
        let bundle = fragments::locale_bundle(&fields, entity, locale);
        let body = serde_json::to_string_pretty(&bundle).expect("bundle serializes");
        write_file(
            &web_dir.join("locales").join(format!("{locale}.json")),
            &format!("{body}\n"),
        )?;
    }

    merge::patch_hooks_barrel(project, module, entity)?;
    merge::patch_i18n_aggregator(project, module, entity)?;

    info!(
        module = %module.kebab_case(),
        entity = %entity.kebab_case(),
        files = FRONTEND_FILES.len(),
        "frontend module generated"
    );
    Ok(())
}

fn build_map(
    module: &Name,
    entity: &Name,
    table: &str,
    fields: &[FrontendField],
    metadata: &ListMetadata,
) -> ReplacementMap {
    let mut map = ReplacementMap::new();

    map.insert("entityPascal", entity.upper_camel_case());
    map.insert("entityCamel", entity.camel_case());
    map.insert("entityKebab", entity.kebab_case());
    map.insert("entityConstant", entity.upper_snake_case());
    map.insert("pluralCamel", entity.plural_camel_case());
    map.insert("pluralKebab", entity.plural_kebab_case());
    map.insert("moduleKebab", module.kebab_case());
    map.insert("tableName", table.to_string());

    map.insert("typeFields", fragments::type_fields(fields));
    map.insert("inputFields", fragments::input_fields(fields));
    map.insert("schemaRules", fragments::schema_rules(fields));
    map.insert("defaultValues", fragments::default_values(fields));
    map.insert("columnDefs", fragments::column_defs(fields, metadata, entity));
    map.insert("formFields", fragments::form_fields(fields, entity));
    map.insert("detailFields", fragments::detail_fields(fields, entity));

    map.insert("sortableList", quoted(&metadata.sortable));
    map.insert("searchableList", quoted(&metadata.searchable));
    map.insert("relationList", quoted(&metadata.relations));
    map.insert("fieldList", quoted(&metadata.fieldable));
    let pairs: Vec<String> = metadata
        .filters
        .iter()
        .map(|(key, value)| format!("{key}: '{value}'"))
        .collect();
    map.insert("filterPairs", pairs.join(", "));

    map
}

fn quoted(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|value| format!("'{value}'")).collect();
    quoted.join(", ")
}
