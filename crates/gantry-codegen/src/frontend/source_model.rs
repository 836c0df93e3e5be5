use std::path::Path;
use std::sync::LazyLock;

use gantry_core::Name;
use regex::Regex;

use crate::error::{Error, Result};
use crate::frontend::FrontendField;

static DTO_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export class ([A-Za-z0-9]+)Data").unwrap());

static DTO_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*public\s+([a-z][a-z0-9_]*)\s*:\s*([A-Za-z\[\]]+(?:\s*\|\s*null)?)\s*(?:=\s*([^,\n]+?)\s*)?,$")
        .unwrap()
});

static RULE_PIPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*([a-z][a-z0-9_]*)\s*:\s*'([^']*)',$").unwrap());

static RULE_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*([a-z][a-z0-9_]*)\s*:\s*\[([^\]\n]*)\],$").unwrap());

static RULE_CONST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*([a-z][a-z0-9_]*)\s*:\s*[A-Za-z0-9]+Request\.([A-Z][A-Z0-9_]*),$")
        .unwrap()
});

static CONST_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"static readonly ([A-Z][A-Z0-9_]*)\s*=\s*'([^']*)'").unwrap()
});

static CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*\([^)]*\)").unwrap());

static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'([^']*)'").unwrap());

/// Reconstruct the field model of a previously generated backend module
/// from its DTO and store-request sources.
///
/// The DTO's constructor parameters provide names, types and default
/// expressions; the store request's `rules()` entries provide requiredness
/// and enumerated options. Rule values come in three shapes: a bracketed
/// literal list, a quoted pipe-delimited string, or a reference to a
/// `static readonly` constant of the request class holding a pipe string.
pub fn parse(module_dir: &Path) -> Result<Vec<FrontendField>> {
    let dto_path = module_dir.join("dto.ts");
    if !dto_path.exists() {
        return Err(Error::DtoMissing { path: dto_path });
    }
    let dto_src = std::fs::read_to_string(&dto_path).map_err(|source| Error::Io {
        path: dto_path.clone(),
        source,
    })?;
    if !DTO_CLASS_RE.is_match(&dto_src) {
        return Err(Error::DtoClassMissing { path: dto_path });
    }

    let rules = parse_rules(&module_dir.join("requests/store.ts"));

    let mut fields = Vec::new();
    for caps in DTO_PARAM_RE.captures_iter(&dto_src) {
        let name = caps[1].to_string();
        let raw_type = caps[2].trim().to_string();
        let default = caps.get(3).map(|default| default.as_str().to_string());

        let rule = rules
            .iter()
            .find(|(rule_name, _)| *rule_name == name)
            .map(|(_, rule)| rule.clone())
            .unwrap_or_default();
        let parts: Vec<&str> = rule.split('|').collect();
        let options = parts
            .iter()
            .find_map(|part| part.strip_prefix("in:"))
            .map(|list| list.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        let nullable = raw_type.contains("| null") || parts.contains(&"nullable");
        let ts_type = raw_type.replace(" | null", "").trim().to_string();

        fields.push(FrontendField {
            name: Name::new(&name),
            ts_type,
            required: parts.contains(&"required"),
            default,
            options,
            nullable,
            datetime: parts.contains(&"date"),
        });
    }

    Ok(fields)
}

/// Field name to pipe-delimited rule string, from the store request file.
/// An absent or unrecognized file simply yields no rules.
fn parse_rules(path: &Path) -> Vec<(String, String)> {
    let Ok(src) = std::fs::read_to_string(path) else {
        return Vec::new();
    };

    let mut rules: Vec<(String, String)> = Vec::new();
    let mut push = |name: String, rule: String| {
        if !rules.iter().any(|(existing, _)| *existing == name) {
            rules.push((name, rule));
        }
    };

    for caps in RULE_PIPE_RE.captures_iter(&src) {
        push(caps[1].to_string(), caps[2].to_string());
    }
    for caps in RULE_LIST_RE.captures_iter(&src) {
        // Rule helpers like `uniqueIgnoringCurrent('invoices', 'id')` carry
        // quoted arguments of their own; drop the calls before collecting
        // the rule literals.
        let body = CALL_RE.replace_all(&caps[2], "");
        let parts: Vec<String> = QUOTED_RE
            .captures_iter(&body)
            .map(|quoted| quoted[1].to_string())
            .collect();
        push(caps[1].to_string(), parts.join("|"));
    }
    for caps in RULE_CONST_RE.captures_iter(&src) {
        let constant = &caps[2];
        if let Some(decl) = CONST_DECL_RE
            .captures_iter(&src)
            .find(|decl| &decl[1] == constant)
        {
            push(caps[1].to_string(), decl[2].to_string());
        }
    }

    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DTO: &str = r"
import { StoreRequest } from '@gantry/http';

export class WidgetData {
  constructor(
    public name: string,
    public status: string = 'draft',
    public enabled: boolean = true,
    public issued_at: string | null = null,
  ) {}
}
";

    const STORE_REQUEST: &str = r"
import { FormRequest, Rules } from '@gantry/http';

export class StoreWidgetRequest extends FormRequest {
  static readonly STATUS_RULES = 'required|in:draft,final';

  rules(): Rules {
    return {
      name: ['required', 'string', 'max:255'],
      status: StoreWidgetRequest.STATUS_RULES,
      enabled: 'nullable|boolean',
      issued_at: 'nullable|date',
    };
  }
}
";

    fn write_module(dir: &Path) {
        std::fs::create_dir_all(dir.join("requests")).unwrap();
        std::fs::write(dir.join("dto.ts"), DTO).unwrap();
        std::fs::write(dir.join("requests/store.ts"), STORE_REQUEST).unwrap();
    }

    #[test]
    fn recovers_fields_from_generated_sources() {
        let dir = tempfile::tempdir().unwrap();
        write_module(dir.path());
        let fields = parse(dir.path()).unwrap();

        let by_name = |name: &str| {
            fields
                .iter()
                .find(|field| field.name.snake_case() == name)
                .unwrap()
        };

        assert_eq!(fields.len(), 4);
        assert!(by_name("name").required);
        assert!(by_name("name").options.is_empty());
        assert_eq!(by_name("name").default, None);

        // Constant-reference rule shape resolves through the class body.
        assert_eq!(by_name("status").options, vec!["draft", "final"]);
        assert_eq!(by_name("status").default.as_deref(), Some("'draft'"));

        assert_eq!(by_name("enabled").ts_type, "boolean");
        assert_eq!(by_name("enabled").default.as_deref(), Some("true"));
        assert!(!by_name("enabled").required);

        assert!(by_name("issued_at").nullable);
        assert_eq!(by_name("issued_at").ts_type, "string");
    }

    #[test]
    fn missing_dto_file_is_a_descriptive_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse(dir.path()).unwrap_err();
        assert!(matches!(err, Error::DtoMissing { .. }));
        assert!(err.to_string().contains("generate the backend module first"));
    }

    #[test]
    fn missing_dto_class_is_a_descriptive_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dto.ts"), "export const nothing = 1;\n").unwrap();
        let err = parse(dir.path()).unwrap_err();
        assert!(matches!(err, Error::DtoClassMissing { .. }));
    }

    #[test]
    fn missing_store_request_leaves_rules_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dto.ts"), DTO).unwrap();
        let fields = parse(dir.path()).unwrap();
        assert!(fields.iter().all(|field| !field.required));
    }
}
