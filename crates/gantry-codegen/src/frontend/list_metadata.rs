use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

static SORTABLE_RE: LazyLock<Regex> = LazyLock::new(|| method_array_re("sortableColumns"));
static SEARCHABLE_RE: LazyLock<Regex> = LazyLock::new(|| method_array_re("searchableColumns"));
static RELATIONS_RE: LazyLock<Regex> = LazyLock::new(|| method_array_re("allowedRelations"));
static FIELDABLE_RE: LazyLock<Regex> = LazyLock::new(|| method_array_re("fieldableColumns"));

static FILTERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"filters\(\)[^{]*\{\s*return\s*\{([^}]*)\}").unwrap());

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

static PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*:\s*'([^']*)'").unwrap());

fn method_array_re(method: &str) -> Regex {
    Regex::new(&format!(r"{method}\(\)[^{{]*\{{\s*return\s*\[([^\]]*)\]")).unwrap()
}

/// List-query metadata extracted from a generated list request class. A
/// missing file or a missing method simply leaves the corresponding set
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMetadata {
    pub sortable: Vec<String>,
    pub filters: IndexMap<String, String>,
    pub searchable: Vec<String>,
    pub relations: Vec<String>,
    pub fieldable: Vec<String>,
}

impl ListMetadata {
    pub fn parse_file(path: &Path) -> ListMetadata {
        match std::fs::read_to_string(path) {
            Ok(src) => ListMetadata::parse(&src),
            Err(_) => ListMetadata::default(),
        }
    }

    pub fn parse(src: &str) -> ListMetadata {
        ListMetadata {
            sortable: method_values(&SORTABLE_RE, src),
            filters: FILTERS_RE
                .captures(src)
                .map(|caps| {
                    PAIR_RE
                        .captures_iter(&caps[1])
                        .map(|pair| (pair[1].to_string(), pair[2].to_string()))
                        .collect()
                })
                .unwrap_or_default(),
            searchable: method_values(&SEARCHABLE_RE, src),
            relations: method_values(&RELATIONS_RE, src),
            fieldable: method_values(&FIELDABLE_RE, src),
        }
    }
}

fn method_values(re: &Regex, src: &str) -> Vec<String> {
    re.captures(src)
        .map(|caps| {
            QUOTED_RE
                .captures_iter(&caps[1])
                .map(|quoted| quoted[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}
