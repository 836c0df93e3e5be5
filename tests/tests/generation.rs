use gantry_codegen::{backend, frontend, Project, Stubs};
use gantry_core::Name;
use pretty_assertions::assert_eq;
use tests::{read, write_billing_fixture};

fn generate_backend(project: &Project) {
    backend::generate(
        project,
        &Stubs::embedded(),
        &Name::new("Billing"),
        &Name::new("Invoice"),
    )
    .expect("backend generation");
}

fn generate_frontend(project: &Project) {
    frontend::generate(
        project,
        &Stubs::embedded(),
        &Name::new("Billing"),
        &Name::new("Invoice"),
    )
    .expect("frontend generation");
}

#[test]
fn backend_generation_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_billing_fixture(dir.path());
    let project = Project::new(dir.path());

    generate_backend(&project);

    let model = read(dir.path(), "server/src/modules/billing/invoice/model.ts");
    assert!(model.contains("static table = 'invoices';"));
    assert!(model.contains("    'title',"));
    assert!(model.contains("    'amount',"));
    assert!(!model.contains("    'payments',"), "HasMany must not be fillable");
    assert!(model.contains("    amount: 'integer',"));
    assert!(model.contains("return this.belongsTo('customers', 'customer_id');"));
    assert!(model.contains("return this.hasMany('payments', 'invoice_id');"));
    assert!(model.contains("hasRelatedRecords(): boolean"));

    let store = read(dir.path(), "server/src/modules/billing/invoice/requests/store.ts");
    assert!(store.contains("title: 'required|string|max:255',"));
    assert!(store.contains("status: 'nullable|in:draft,sent,paid',"));
    assert!(store.contains("customer_id: 'required|integer|exists:customers,id',"));

    let dto = read(dir.path(), "server/src/modules/billing/invoice/dto.ts");
    assert!(dto.contains("public amount: number = 0,"));
    assert!(dto.contains("public archived: boolean = false,"));
    assert!(dto.contains("public payments: number[] = [],"));
    assert!(dto.contains("input.castId('customer_id'),"));
    assert!(dto.contains("input.get('issued_at') ?? null,"));

    let list = read(dir.path(), "server/src/modules/billing/invoice/requests/list.ts");
    assert!(list.contains("return ['id', 'title', 'amount'];"));
    assert!(list.contains("return { status: 'eq', archived: 'bool' };"));

    let routes = read(dir.path(), "server/src/routes/api.ts");
    assert!(routes.contains("router.apiResource('invoices', InvoiceController);"));

    let providers = read(dir.path(), "server/src/app/providers.ts");
    assert!(providers.contains("'modules/billing/invoice',"));

    let messages = read(dir.path(), "server/locales/en.json");
    assert!(messages.contains("\"invoice.created\""));
}

#[test]
fn backend_generation_is_idempotent_on_shared_files() {
    let dir = tempfile::tempdir().unwrap();
    write_billing_fixture(dir.path());
    let project = Project::new(dir.path());

    generate_backend(&project);
    let container = read(dir.path(), "server/src/app/container.ts");
    let routes = read(dir.path(), "server/src/routes/api.ts");
    let providers = read(dir.path(), "server/src/app/providers.ts");
    let messages = read(dir.path(), "server/locales/en.json");

    generate_backend(&project);
    assert_eq!(container, read(dir.path(), "server/src/app/container.ts"));
    assert_eq!(routes, read(dir.path(), "server/src/routes/api.ts"));
    assert_eq!(providers, read(dir.path(), "server/src/app/providers.ts"));
    assert_eq!(messages, read(dir.path(), "server/locales/en.json"));
}

#[test]
fn locale_merge_preserves_hand_edits_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    write_billing_fixture(dir.path());
    let project = Project::new(dir.path());

    generate_backend(&project);

    let path = dir.path().join("server/locales/en.json");
    let mut messages: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    messages.insert(
        "invoice.created".to_string(),
        serde_json::Value::String("Bespoke wording".to_string()),
    );
    std::fs::write(&path, serde_json::to_string_pretty(&messages).unwrap()).unwrap();

    generate_backend(&project);

    let merged: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(merged["invoice.created"], "Bespoke wording");
}

#[test]
fn missing_migration_generates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("server/migrations")).unwrap();
    let project = Project::new(dir.path());

    generate_backend(&project);

    assert!(!dir.path().join("server/src/modules/billing/invoice").exists());
    assert!(!dir.path().join("server/src/routes/api.ts").exists());
}

#[test]
fn frontend_generation_consumes_the_backend_module() {
    let dir = tempfile::tempdir().unwrap();
    write_billing_fixture(dir.path());
    let project = Project::new(dir.path());

    generate_backend(&project);
    generate_frontend(&project);

    let config = read(dir.path(), "web/src/modules/billing/invoice/config.ts");
    assert!(config.contains("endpoint: '/api/invoices',"));
    assert!(config.contains("sortable: ['id', 'title', 'amount'],"));
    assert!(config.contains("filters: { status: 'eq', archived: 'bool' },"));

    let types = read(dir.path(), "web/src/modules/billing/invoice/types.ts");
    assert!(types.contains("export interface Invoice {"));
    assert!(types.contains("  title: string;"));
    assert!(types.contains("  id: number;"));
    assert!(!types.contains("  id: number;\n  id:"), "id must not duplicate");

    let form = read(
        dir.path(),
        "web/src/modules/billing/invoice/components/InvoiceForm.tsx",
    );
    assert!(form.contains("<Form.Select name=\"status\""));
    assert!(form.contains("<Form.Toggle name=\"archived\""));

    let barrel = read(dir.path(), "web/src/hooks/index.ts");
    assert_eq!(barrel.matches("export {").count(), 5);

    let aggregator = read(dir.path(), "web/src/i18n/resources.ts");
    assert!(aggregator.contains("  invoice: ResourceLoader;"));

    let bundle = read(dir.path(), "web/src/modules/billing/invoice/locales/en.json");
    let parsed: serde_json::Value = serde_json::from_str(&bundle).unwrap();
    assert_eq!(parsed["fields"]["title"], "Title");
    assert_eq!(parsed["options"]["status"]["draft"], "Draft");
}

#[test]
fn frontend_falls_back_to_source_recovery_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    write_billing_fixture(dir.path());
    let project = Project::new(dir.path());

    generate_backend(&project);
    std::fs::remove_file(
        dir.path()
            .join("server/src/modules/billing/invoice/.manifest.json"),
    )
    .unwrap();
    generate_frontend(&project);

    let types = read(dir.path(), "web/src/modules/billing/invoice/types.ts");
    assert!(types.contains("  title: string;"));
    assert!(types.contains("  amount: number | null;"));

    let schema = read(dir.path(), "web/src/modules/billing/invoice/schema.ts");
    assert!(schema.contains("title: rules.string().required(),"));
    assert!(schema.contains("status: rules.oneOf(['draft', 'sent', 'paid'])"));
}

#[test]
fn repeated_frontend_runs_do_not_duplicate_merges() {
    let dir = tempfile::tempdir().unwrap();
    write_billing_fixture(dir.path());
    let project = Project::new(dir.path());

    generate_backend(&project);
    generate_frontend(&project);
    let barrel = read(dir.path(), "web/src/hooks/index.ts");
    let aggregator = read(dir.path(), "web/src/i18n/resources.ts");

    generate_frontend(&project);
    assert_eq!(barrel, read(dir.path(), "web/src/hooks/index.ts"));
    assert_eq!(aggregator, read(dir.path(), "web/src/i18n/resources.ts"));
}
