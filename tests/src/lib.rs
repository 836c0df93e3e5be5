//! Shared fixtures for the end-to-end generation tests.

use std::fs;
use std::path::Path;

pub const INVOICES_MIGRATION: &str = r"import { SchemaBuilder } from '@gantry/orm';

export async function up(schema: SchemaBuilder): Promise<void> {
  await schema.createTable('invoices', (table) => {
    table.increments('id');
    table.string('title').notNullable();
    table.string('status').defaultTo('draft'); // enum: draft,sent,paid
    table.integer('amount').defaultTo(0);
    table.boolean('archived').defaultTo(false);
    table.datetime('issued_at').nullable();
    table.integer('customer_id').references('id').inTable('customers');
    table.timestamps();
  });
}

const SORTABLE_COLUMNS = ['id', 'title', 'amount'];
const FILTERS = { status: 'eq', archived: 'bool' };
const SEARCHABLE_COLUMNS = ['title'];
const FIELDABLE_COLUMNS = ['id', 'title', 'status', 'amount'];
const CAST_IDS = { customer_id: 'int' };
const NULLABLE_FIELDS = ['issued_at'];
";

pub const CUSTOMERS_MIGRATION: &str = r"import { SchemaBuilder } from '@gantry/orm';

export async function up(schema: SchemaBuilder): Promise<void> {
  await schema.createTable('customers', (table) => {
    table.increments('id');
    table.string('name').notNullable();
    table.timestamps();
  });
}
";

pub const PAYMENTS_MIGRATION: &str = r"import { SchemaBuilder } from '@gantry/orm';

export async function up(schema: SchemaBuilder): Promise<void> {
  await schema.createTable('payments', (table) => {
    table.increments('id');
    table.foreignId('invoice_id');
    table.integer('amount').defaultTo(0);
    table.timestamps();
  });
}
";

/// Lay down the billing migrations inside `root/server/migrations`.
pub fn write_billing_fixture(root: &Path) {
    let migrations = root.join("server/migrations");
    fs::create_dir_all(&migrations).expect("create migrations dir");
    fs::write(
        migrations.join("2024_01_01_000001_create_customers_table.ts"),
        CUSTOMERS_MIGRATION,
    )
    .expect("write customers migration");
    fs::write(
        migrations.join("2024_01_01_000002_create_invoices_table.ts"),
        INVOICES_MIGRATION,
    )
    .expect("write invoices migration");
    fs::write(
        migrations.join("2024_01_01_000003_create_payments_table.ts"),
        PAYMENTS_MIGRATION,
    )
    .expect("write payments migration");
}

pub fn read(root: &Path, relative: &str) -> String {
    let path = root.join(relative);
    fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()))
}
