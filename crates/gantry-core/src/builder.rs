use std::path::Path;

use crate::field::{Cast, Field, RelationKind};
use crate::name::Name;
use crate::replace::ReplacementMap;
use crate::schema::constants::Constants;
use crate::schema::parser;

/// Locale suffixes recognized on multilingual columns, default language
/// first. `title_en` / `title_ru` / `title_uz` collapse into one `title`
/// display group.
pub const LOCALE_SUFFIXES: &[&str] = &["_en", "_ru", "_uz"];

/// Everything the writers need to know about the entity being generated.
#[derive(Debug)]
pub struct BuildContext<'a> {
    pub module: &'a Name,
    pub entity: &'a Name,
    pub table: &'a str,
    /// Schema columns plus synthesized HasMany relation fields, in order.
    pub fields: &'a [Field],
}

/// Derive the full placeholder map for one entity.
///
/// List-query constants are re-located from the migrations directory by
/// globbing for the pluralized, snake-cased entity name; when no migration
/// matches, the constant sets are silently empty.
pub fn replacement_map(ctx: &BuildContext<'_>, migrations_dir: &Path) -> ReplacementMap {
    let constants = relocate_constants(migrations_dir, ctx.entity);
    replacement_map_with(ctx, &constants)
}

/// Same derivation with the constant sets already in hand (used by the
/// manifest-driven path, which does not re-read the migration).
pub fn replacement_map_with(ctx: &BuildContext<'_>, constants: &Constants) -> ReplacementMap {
    let mut map = ReplacementMap::new();

    map.insert("modulePascal", ctx.module.upper_camel_case());
    map.insert("moduleSnake", ctx.module.snake_case());
    map.insert("moduleKebab", ctx.module.kebab_case());
    map.insert("entityPascal", ctx.entity.upper_camel_case());
    map.insert("entityCamel", ctx.entity.camel_case());
    map.insert("entitySnake", ctx.entity.snake_case());
    map.insert("entityKebab", ctx.entity.kebab_case());
    map.insert("pluralPascal", ctx.entity.plural_upper_camel_case());
    map.insert("pluralCamel", ctx.entity.plural_camel_case());
    map.insert("pluralSnake", ctx.entity.plural_snake_case());
    map.insert("pluralKebab", ctx.entity.plural_kebab_case());
    map.insert("tableName", ctx.table.to_string());

    map.insert("fillable", fillable(ctx.fields));
    map.insert("casts", casts(ctx.fields));
    map.insert("storeRules", store_rules(ctx.fields));
    map.insert("updateRules", update_rules(ctx.fields));
    map.insert("dtoProperties", dto_properties(ctx.fields, constants));
    map.insert("dtoAssignments", dto_assignments(ctx.fields, constants));
    map.insert("resourceFields", resource_fields(ctx.fields));
    map.insert("relationAccessors", relation_accessors(ctx.fields));
    map.insert("relationGuard", relation_guard(ctx.fields));
    map.insert("displayAccessors", display_accessors(ctx.fields));
    map.insert("factoryFields", factory_fields(ctx.fields));

    map.insert("sortableColumns", quoted_inline(&constants.sortable_columns));
    map.insert("searchableColumns", quoted_inline(&constants.searchable_columns));
    map.insert("fieldableColumns", quoted_inline(&constants.fieldable_columns));
    map.insert("filterEntries", pair_inline(&constants.filters));
    map.insert("allowedRelations", allowed_relations(ctx.fields));

    map
}

fn relocate_constants(migrations_dir: &Path, entity: &Name) -> Constants {
    let table = entity.plural_snake_case();
    parser::find_migration(migrations_dir, &table)
        .and_then(|path| std::fs::read_to_string(path).ok())
        .map(|src| Constants::parse(&src))
        .unwrap_or_default()
}

/// Every field except HasMany relations is mass-assignable.
fn fillable(fields: &[Field]) -> String {
    lines(fields.iter().filter(|field| !field.is_has_many()), |field| {
        format!("    '{}',", field.name.snake_case())
    })
}

fn casts(fields: &[Field]) -> String {
    lines(fields.iter().filter(|field| field.cast.is_some()), |field| {
        format!(
            "    {}: '{}',",
            field.name.snake_case(),
            field.cast.expect("filtered").as_str()
        )
    })
}

/// `required|`/`nullable|` prefix plus the base rule, with uniqueness and
/// foreign-key existence suffixes where the field calls for them.
fn store_rule_body(field: &Field) -> String {
    let prefix = if field.required { "required" } else { "nullable" };
    let mut rule = format!("{prefix}|{}", field.rule);
    if field.unique {
        rule.push_str(&format!("|unique:{},{}", field.table, field.name.snake_case()));
    }
    if field.is_belongs_to() {
        let relation = field.relation.as_ref().expect("belongs-to checked");
        rule.push_str(&format!("|exists:{},id", relation.table));
    }
    rule
}

fn store_rules(fields: &[Field]) -> String {
    lines(fields.iter(), |field| {
        format!("    {}: '{}',", field.name.snake_case(), store_rule_body(field))
    })
}

/// Update rules share the store rule body, but unique fields switch to the
/// array shape so the current record can be excluded from the uniqueness
/// probe.
fn update_rules(fields: &[Field]) -> String {
    lines(fields.iter(), |field| {
        let name = field.name.snake_case();
        if !field.unique {
            return format!("    {name}: '{}',", store_rule_body(field));
        }

        let prefix = if field.required { "required" } else { "nullable" };
        let mut parts: Vec<String> = format!("{prefix}|{}", field.rule)
            .split('|')
            .map(|part| format!("'{part}'"))
            .collect();
        if field.is_belongs_to() {
            let relation = field.relation.as_ref().expect("belongs-to checked");
            parts.push(format!("'exists:{},id'", relation.table));
        }
        parts.push(format!("uniqueIgnoringCurrent('{}', '{name}')", field.table));
        format!("    {name}: [{}],", parts.join(", "))
    })
}

/// DTO constructor-parameter partition: mandatory parameters first (no
/// default, not boolean-flagged, not HasMany), then defaulted parameters,
/// each keeping the original field order.
fn partition<'a>(fields: &'a [Field], constants: &Constants) -> (Vec<&'a Field>, Vec<&'a Field>) {
    fields.iter().partition(|&field| !is_defaulted(field, constants))
}

fn is_defaulted(field: &Field, constants: &Constants) -> bool {
    field.is_has_many()
        || field.has_default
        || constants
            .boolean_fields
            .contains(&field.name.snake_case())
}

/// The default literal emitted for a defaulted DTO parameter.
pub fn computed_default(field: &Field) -> String {
    if field.is_has_many() {
        return "[]".to_string();
    }
    let Some(literal) = &field.default_literal else {
        return "null".to_string();
    };
    match field.cast {
        Some(Cast::Boolean) => {
            if literal == "true" || literal == "1" {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        Some(Cast::Integer) => {
            if literal.parse::<i64>().is_ok() {
                literal.clone()
            } else {
                "0".to_string()
            }
        }
        Some(Cast::String) => {
            // A string default only survives for enumerated or bare-string
            // rules; anything else cannot be trusted as a literal.
            if field.rule.starts_with("in:") || field.rule == "string" {
                format!("'{literal}'")
            } else {
                "null".to_string()
            }
        }
        Some(Cast::Datetime) | None => "null".to_string(),
    }
}

fn ts_type(field: &Field) -> &'static str {
    if field.is_has_many() {
        return "number[]";
    }
    match field.cast {
        Some(Cast::Integer) => "number",
        Some(Cast::Boolean) => "boolean",
        Some(Cast::String) | Some(Cast::Datetime) | None => "string",
    }
}

fn dto_properties(fields: &[Field], constants: &Constants) -> String {
    let (mandatory, defaulted) = partition(fields, constants);
    let mut out: Vec<String> = mandatory
        .iter()
        .map(|field| format!("    public {}: {},", field.name.snake_case(), ts_type(field)))
        .collect();
    for field in defaulted {
        let default = computed_default(field);
        let nullable = if default == "null" { " | null" } else { "" };
        out.push(format!(
            "    public {}: {}{nullable} = {default},",
            field.name.snake_case(),
            ts_type(field)
        ));
    }
    out.join("\n")
}

/// Constructor arguments for `fromInput`, in the same mandatory-then-
/// defaulted order as the parameters they feed.
fn dto_assignments(fields: &[Field], constants: &Constants) -> String {
    let (mandatory, defaulted) = partition(fields, constants);

    let read = |field: &Field| {
        let name = field.name.snake_case();
        if constants.cast_ids.contains_key(&name) {
            format!("input.castId('{name}')")
        } else {
            format!("input.get('{name}')")
        }
    };

    let mut out: Vec<String> = Vec::new();
    for field in mandatory {
        let source = read(field);
        let name = field.name.snake_case();
        if constants.nullable_fields.contains(&name) && !field.has_default {
            out.push(format!("      {source} ?? null,"));
        } else {
            out.push(format!("      {source},"));
        }
    }
    for field in defaulted {
        let source = read(field);
        let name = field.name.snake_case();
        if constants.nullable_fields.contains(&name) && !field.has_default {
            out.push(format!("      {source} ?? null,"));
        } else {
            out.push(format!("      {source} ?? {},", computed_default(field)));
        }
    }
    out.join("\n")
}

/// Resource members: synthesized `id` first, then own non-relation fields,
/// then BelongsTo accessors, then HasMany accessors, with `created_at` /
/// `updated_at` closing the object. Deduplicated by member name.
fn resource_fields(fields: &[Field]) -> String {
    let mut seen: Vec<String> = Vec::new();
    let mut out: Vec<String> = Vec::new();
    let mut push = |key: String, line: String| {
        if !seen.contains(&key) {
            seen.push(key);
            out.push(line);
        }
    };

    push("id".to_string(), "      id: this.model.id,".to_string());
    for field in fields.iter().filter(|field| field.relation.is_none()) {
        let name = field.name.snake_case();
        push(name.clone(), format!("      {name}: this.model.{name},"));
    }
    for field in fields.iter().filter(|field| field.is_belongs_to()) {
        let accessor = field.relation.as_ref().expect("belongs-to").accessor.camel_case();
        push(accessor.clone(), format!("      {accessor}: this.related('{accessor}'),"));
    }
    for field in fields.iter().filter(|field| field.is_has_many()) {
        let accessor = field.relation.as_ref().expect("has-many").accessor.camel_case();
        push(
            accessor.clone(),
            format!("      {accessor}: this.collection('{accessor}'),"),
        );
    }
    for name in ["created_at", "updated_at"] {
        push(name.to_string(), format!("      {name}: this.model.{name},"));
    }
    out.join("\n")
}

fn relation_accessors(fields: &[Field]) -> String {
    let accessors: Vec<String> = fields
        .iter()
        .filter_map(|field| field.relation.as_ref())
        .map(|relation| {
            let accessor = relation.accessor.camel_case();
            let call = match relation.kind {
                RelationKind::BelongsTo => "belongsTo",
                RelationKind::HasMany => "hasMany",
            };
            format!(
                "  {accessor}(): Relation {{\n    return this.{call}('{}', '{}');\n  }}",
                relation.table, relation.foreign_key
            )
        })
        .collect();
    accessors.join("\n\n")
}

/// One boolean guard over all HasMany relations, used before destructive
/// operations. Empty when the entity owns nothing.
fn relation_guard(fields: &[Field]) -> String {
    let checks: Vec<String> = fields
        .iter()
        .filter(|field| field.is_has_many())
        .map(|field| {
            let accessor = field.relation.as_ref().expect("has-many").accessor.camel_case();
            format!("this.{accessor}().exists()")
        })
        .collect();
    if checks.is_empty() {
        return String::new();
    }
    format!(
        "\n  hasRelatedRecords(): boolean {{\n    return {};\n  }}\n",
        checks.join(" || ")
    )
}

/// Multilingual display accessors: columns sharing a base name under the
/// recognized locale suffixes collapse into one accessor returning the
/// default-language value with per-locale overrides.
fn display_accessors(fields: &[Field]) -> String {
    let mut groups: Vec<(String, Vec<&'static str>)> = Vec::new();
    for field in fields {
        let name = field.name.snake_case();
        for &suffix in LOCALE_SUFFIXES {
            if let Some(base) = name.strip_suffix(suffix) {
                if base.is_empty() {
                    continue;
                }
                match groups.iter_mut().find(|(existing, _)| existing == base) {
                    Some((_, suffixes)) => suffixes.push(suffix),
                    None => groups.push((base.to_string(), vec![suffix])),
                }
            }
        }
    }

    let default_suffix = LOCALE_SUFFIXES[0];
    let accessors: Vec<String> = groups
        .iter()
        .map(|(base, suffixes)| {
            let fallback_suffix = if suffixes.contains(&default_suffix) {
                default_suffix
            } else {
                suffixes[0]
            };
            let mut body = format!(
                "  display{}(locale: string): string {{\n    const fallback = this.model.{base}{fallback_suffix};\n    switch (locale) {{\n",
                Name::new(base).upper_camel_case()
            );
            for suffix in suffixes {
                if *suffix == fallback_suffix {
                    continue;
                }
                let locale = suffix.trim_start_matches('_');
                body.push_str(&format!(
                    "      case '{locale}':\n        return this.model.{base}{suffix} ?? fallback;\n"
                ));
            }
            body.push_str("      default:\n        return fallback;\n    }\n  }");
            body
        })
        .collect();
    accessors.join("\n\n")
}

fn factory_fields(fields: &[Field]) -> String {
    let skip = ["id", "created_at", "updated_at"];
    lines(
        fields.iter().filter(|field| {
            !field.is_has_many() && !skip.contains(&field.name.snake_case().as_str())
        }),
        |field| {
            let name = field.name.snake_case();
            let value = if let Some(options) = field.rule.strip_prefix("in:") {
                let quoted: Vec<String> =
                    options.split(',').map(|option| format!("'{option}'")).collect();
                format!("faker.pick([{}])", quoted.join(", "))
            } else {
                match field.cast {
                    Some(Cast::Integer) => "faker.integer()".to_string(),
                    Some(Cast::Boolean) => "faker.boolean()".to_string(),
                    Some(Cast::Datetime) => "faker.datetime()".to_string(),
                    Some(Cast::String) | None => "faker.sentence()".to_string(),
                }
            };
            format!("    {name}: {value},")
        },
    )
}

fn allowed_relations(fields: &[Field]) -> String {
    let names: Vec<String> = fields
        .iter()
        .filter_map(|field| field.relation.as_ref())
        .map(|relation| format!("'{}'", relation.accessor.camel_case()))
        .collect();
    names.join(", ")
}

fn quoted_inline(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|value| format!("'{value}'")).collect();
    quoted.join(", ")
}

fn pair_inline(pairs: &indexmap::IndexMap<String, String>) -> String {
    let rendered: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}: '{value}'"))
        .collect();
    rendered.join(", ")
}

fn lines<'a, I, F>(fields: I, render: F) -> String
where
    I: Iterator<Item = &'a Field>,
    F: Fn(&Field) -> String,
{
    let rendered: Vec<String> = fields.map(render).collect();
    rendered.join("\n")
}
