use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;
use crate::field::{Field, Relation};
use crate::name::Name;
use crate::rules::TypeRules;
use crate::schema::constants::Constants;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:createTable|alterTable)\(\s*'([a-z][a-z0-9_]*)'").unwrap()
});

static COLUMN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"table\.([A-Za-z]+)\(\s*'([a-z][a-z0-9_]*)'").unwrap());

static DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.defaultTo\(\s*([^)]*?)\s*\)").unwrap());

static ENUM_OPTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.enu\(\s*'[a-z0-9_]+'\s*,\s*\[([^\]]*)\]").unwrap());

static ENUM_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//\s*enum:\s*([A-Za-z0-9_,\s]+)$").unwrap());

static INLINE_FK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.references\(\s*'[a-z0-9_]+'\s*\)\s*\.inTable\(\s*'([a-z0-9_]+)'\s*\)").unwrap()
});

static SEPARATE_FK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"table\.foreign\(\s*'([a-z0-9_]+)'\s*\)\s*\.references\(\s*'([a-z0-9_]+)\.[a-z0-9_]+'\s*\)")
        .unwrap()
});

static CONSTRAINED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.constrained\(\s*'([a-z0-9_]+)'\s*\)").unwrap());

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

/// Declaration methods that look like column calls but are not columns.
const NON_COLUMN_METHODS: &[&str] = &[
    "foreign",
    "index",
    "dropColumn",
    "dropForeign",
    "renameColumn",
    "primary",
];

/// Everything recovered from one migration file.
#[derive(Debug, Clone, Default)]
pub struct SchemaModel {
    /// Empty when the file has no recognizable create/alter-table call; the
    /// caller treats that as "nothing to generate", not as an error.
    pub table: String,
    pub fields: Vec<Field>,
    pub constants: Constants,
}

impl SchemaModel {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Parse one migration file. Only I/O failures are errors; a file without a
/// table statement yields an empty model.
pub fn parse(path: &Path, rules: &TypeRules) -> Result<SchemaModel, Error> {
    let src = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_source(&src, rules))
}

/// Parse migration source text into a table name, field list and constant
/// sets.
///
/// A column's modifiers are read only from the line that declares it: the
/// first occurrence of a column name wins, and modifiers continued on later
/// source lines are not applied. Migrations are expected to keep one
/// declaration per line.
pub fn parse_source(src: &str, rules: &TypeRules) -> SchemaModel {
    let table = match TABLE_RE.captures(src) {
        Some(caps) => caps[1].to_string(),
        None => return SchemaModel::default(),
    };

    // Separate foreign-key declarations apply to columns declared on other
    // lines, so collect them up front.
    let separate_fks: Vec<(String, String)> = SEPARATE_FK_RE
        .captures_iter(src)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect();

    let mut fields: Vec<Field> = Vec::new();

    for line in src.lines() {
        let Some(caps) = COLUMN_RE.captures(line) else {
            continue;
        };
        let method = caps[1].to_string();
        let column = caps[2].to_string();

        if NON_COLUMN_METHODS.contains(&method.as_str()) {
            continue;
        }
        // First occurrence per column wins.
        if fields.iter().any(|field| field.name.snake_case() == column) {
            continue;
        }

        let nullable = line.contains(".nullable()");
        let unique = line.contains(".unique()");
        let default_literal = DEFAULT_RE
            .captures(line)
            .map(|caps| caps[1].trim_matches('\'').to_string());
        let has_default = default_literal.is_some();

        let (cast, rule) = infer_type(line, &method, rules);
        let relation = infer_belongs_to(line, &method, &column, &separate_fks);

        fields.push(Field {
            name: Name::new(&column),
            method,
            required: !(has_default || nullable),
            has_default,
            default_literal,
            unique,
            cast,
            rule,
            relation,
            table: table.clone(),
        });
    }

    SchemaModel {
        constants: Constants::parse(src),
        table,
        fields,
    }
}

/// Fixed type/cast inference: enumerations (either the `enu` declaration or
/// a `// enum:` trailing comment on a string column) become inclusion
/// rules; everything else goes through the injected rule table.
fn infer_type(line: &str, method: &str, rules: &TypeRules) -> (Option<crate::field::Cast>, String) {
    if method == "enu" {
        let options = ENUM_OPTIONS_RE
            .captures(line)
            .map(|caps| quoted_values(&caps[1]))
            .unwrap_or_default();
        return (Some(crate::field::Cast::String), TypeRules::inclusion(&options));
    }

    if method == "string" {
        if let Some(caps) = ENUM_COMMENT_RE.captures(line) {
            let options: Vec<String> = caps[1]
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect();
            return (Some(crate::field::Cast::String), TypeRules::inclusion(&options));
        }
    }

    rules.lookup(method)
}

/// BelongsTo inference, in priority order, first match wins:
/// 1. inline `.references(..).inTable('target')` on the declaring line;
/// 2. a separate `table.foreign('col').references('target.col')` statement;
/// 3. the `foreignId` shorthand, with an explicit `.constrained('target')`
///    or a target pluralized from the column name minus its `_id` suffix.
fn infer_belongs_to(
    line: &str,
    method: &str,
    column: &str,
    separate_fks: &[(String, String)],
) -> Option<Relation> {
    if let Some(caps) = INLINE_FK_RE.captures(line) {
        return Some(Relation::belongs_to(column, &caps[1]));
    }

    if let Some((_, target)) = separate_fks.iter().find(|(col, _)| col == column) {
        return Some(Relation::belongs_to(column, target));
    }

    if method == "foreignId" {
        let target = match CONSTRAINED_RE.captures(line) {
            Some(caps) => caps[1].to_string(),
            None => {
                let base = column.strip_suffix("_id").unwrap_or(column);
                Name::new(base).plural_snake_case()
            }
        };
        return Some(Relation::belongs_to(column, &target));
    }

    None
}

/// Scan every migration in `dir` for foreign keys pointing at `table` and
/// synthesize one HasMany relation per referencing table. A table is listed
/// at most once regardless of how many referencing columns it declares.
pub fn has_many_relations(dir: &Path, table: &str) -> Result<Vec<Relation>, Error> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
        .collect();
    paths.sort();

    let mut relations: Vec<Relation> = Vec::new();

    for path in paths {
        let src = fs::read_to_string(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        let Some(related) = TABLE_RE.captures(&src).map(|caps| caps[1].to_string()) else {
            continue;
        };
        if related == table {
            continue;
        }
        if relations.iter().any(|rel| rel.table == related) {
            continue;
        }
        if let Some(foreign_key) = referencing_column(&src, table) {
            relations.push(Relation::has_many(&related, &foreign_key));
        }
    }

    Ok(relations)
}

/// The column in `src` that points at `table` via any of the three
/// foreign-key patterns, if there is one.
fn referencing_column(src: &str, table: &str) -> Option<String> {
    let escaped = regex::escape(table);

    let inline = Regex::new(&format!(
        r"table\.[A-Za-z]+\(\s*'([a-z0-9_]+)'[^\n]*\.references\(\s*'[a-z0-9_]+'\s*\)\s*\.inTable\(\s*'{escaped}'\s*\)"
    ))
    .unwrap();
    if let Some(caps) = inline.captures(src) {
        return Some(caps[1].to_string());
    }

    let separate = Regex::new(&format!(
        r"table\.foreign\(\s*'([a-z0-9_]+)'\s*\)\s*\.references\(\s*'{escaped}\."
    ))
    .unwrap();
    if let Some(caps) = separate.captures(src) {
        return Some(caps[1].to_string());
    }

    let shorthand = Regex::new(r"table\.foreignId\(\s*'([a-z0-9_]+)'\s*\)([^\n]*)").unwrap();
    for caps in shorthand.captures_iter(src) {
        let column = caps[1].to_string();
        let rest = &caps[2];
        let target = match CONSTRAINED_RE.captures(rest) {
            Some(explicit) => explicit[1].to_string(),
            None => {
                let base = column.strip_suffix("_id").unwrap_or(&column);
                Name::new(base).plural_snake_case()
            }
        };
        if target == table {
            return Some(column);
        }
    }

    None
}

/// Locate the migration that creates `table` inside the migrations
/// directory. Returns `None` when no filename matches.
pub fn find_migration(dir: &Path, table: &str) -> Option<PathBuf> {
    let marker = format!("create_{table}_table");
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains(&marker))
        })
        .collect();
    paths.sort();
    paths.into_iter().next()
}

fn quoted_values(body: &str) -> Vec<String> {
    QUOTED_RE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}
