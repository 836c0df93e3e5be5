mod container;
mod locale;
mod providers;
mod routes;

use gantry_core::builder::{self, BuildContext};
use gantry_core::schema;
use gantry_core::{Field, Manifest, Name, PlaceholderStyle, TypeRules};
use tracing::info;

use crate::error::Result;
use crate::project::Project;
use crate::render::{write_file, Stubs};

/// Per-entity backend artifacts, relative to the module directory. Every
/// one of these is freshly overwritten on each run.
const BACKEND_FILES: &[(&str, &str)] = &[
    ("backend/model.stub", "model.ts"),
    ("backend/dto.stub", "dto.ts"),
    ("backend/store-request.stub", "requests/store.ts"),
    ("backend/update-request.stub", "requests/update.ts"),
    ("backend/list-request.stub", "requests/list.ts"),
    ("backend/controller.stub", "controller.ts"),
    ("backend/service-contract.stub", "service.contract.ts"),
    ("backend/service.stub", "service.ts"),
    ("backend/repository-contract.stub", "repository.contract.ts"),
    ("backend/repository.stub", "repository.ts"),
    ("backend/resource.stub", "resource.ts"),
    ("backend/policy.stub", "policy.ts"),
    ("backend/query.stub", "query.ts"),
    ("backend/events.stub", "events.ts"),
    ("backend/factory.stub", "factory.ts"),
    ("backend/seeder.stub", "seeder.ts"),
    ("backend/api-test.stub", "__tests__/api.spec.ts"),
    ("backend/module.stub", "module.ts"),
    ("backend/barrel.stub", "index.ts"),
];

/// Generate the backend module for one entity: parse its migration, render
/// the per-entity artifacts, persist the field manifest and patch the
/// shared files.
pub fn generate(project: &Project, stubs: &Stubs, module: &Name, entity: &Name) -> Result<()> {
    let rules = TypeRules::default();
    let migrations_dir = project.migrations_dir();
    let table = entity.plural_snake_case();

    let Some(migration) = schema::find_migration(&migrations_dir, &table) else {
        info!(table = %table, "no migration found, nothing to generate");
        return Ok(());
    };
    let model = schema::parse(&migration, &rules)?;
    if model.is_empty() {
        info!(migration = %migration.display(), "no table statement found, nothing to generate");
        return Ok(());
    }

    let mut fields = model.fields.clone();
    for relation in schema::has_many_relations(&migrations_dir, &model.table)? {
        fields.push(Field::from_has_many(relation, &model.table));
    }

    let ctx = BuildContext {
        module,
        entity,
        table: &model.table,
        fields: &fields,
    };
    let map = builder::replacement_map(&ctx, &migrations_dir);

    let module_dir = project.backend_module_dir(module, entity);
    for (stub, relative) in BACKEND_FILES {
        let template = stubs.load(stub)?;
        write_file(
            &module_dir.join(relative),
            &map.apply(&template, PlaceholderStyle::Braced),
        )?;
    }

    Manifest {
        module: module.clone(),
        entity: entity.clone(),
        table: model.table.clone(),
        fields,
        constants: model.constants.clone(),
    }
    .write(&module_dir)?;

    container::patch(project, stubs, module, entity)?;
    routes::patch(project, stubs, module, entity)?;
    providers::patch(project, stubs, module, entity)?;
    locale::merge(project, entity)?;

    info!(
        module = %module.snake_case(),
        entity = %entity.snake_case(),
        files = BACKEND_FILES.len(),
        "backend module generated"
    );
    Ok(())
}
