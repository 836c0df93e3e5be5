use gantry_core::Name;
use serde_json::{json, Map, Value};

use crate::frontend::list_metadata::ListMetadata;
use crate::frontend::FrontendField;

/// Members of the entity interface: `id` first, recovered fields, audit
/// timestamps last.
pub fn type_fields(fields: &[FrontendField]) -> String {
    let mut out = vec!["  id: number;".to_string()];
    for field in fields {
        let nullable = if field.nullable { " | null" } else { "" };
        out.push(format!(
            "  {}: {}{nullable};",
            field.name.snake_case(),
            field.ts_type
        ));
    }
    out.push("  created_at: string;".to_string());
    out.push("  updated_at: string;".to_string());
    out.join("\n")
}

/// Members of the input interface; fields without a `required` rule are
/// optional on the wire.
pub fn input_fields(fields: &[FrontendField]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .map(|field| {
            let optional = if field.required { "" } else { "?" };
            let nullable = if field.nullable { " | null" } else { "" };
            format!(
                "  {}{optional}: {}{nullable};",
                field.name.snake_case(),
                field.ts_type
            )
        })
        .collect();
    lines.join("\n")
}

pub fn schema_rules(fields: &[FrontendField]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .map(|field| {
            let base = if !field.options.is_empty() {
                let quoted: Vec<String> =
                    field.options.iter().map(|option| format!("'{option}'")).collect();
                format!("oneOf([{}])", quoted.join(", "))
            } else {
                match field.ts_type.as_str() {
                    "number" | "number[]" => "number()".to_string(),
                    "boolean" => "boolean()".to_string(),
                    _ => "string()".to_string(),
                }
            };
            let modifier = if field.required { "required" } else { "optional" };
            format!("  {}: rules.{base}.{modifier}(),", field.name.snake_case())
        })
        .collect();
    lines.join("\n")
}

/// Form default entries; only fields that recovered a default expression
/// contribute, the rest are filled from the record being edited.
pub fn default_values(fields: &[FrontendField]) -> String {
    let lines: Vec<String> = fields
        .iter()
        .filter_map(|field| {
            field
                .default
                .as_ref()
                .map(|default| format!("        {}: {default},", field.name.snake_case()))
        })
        .collect();
    lines.join("\n")
}

pub fn column_defs(fields: &[FrontendField], metadata: &ListMetadata, entity: &Name) -> String {
    let camel = entity.camel_case();
    let lines: Vec<String> = fields
        .iter()
        .filter(|field| field.ts_type != "number[]")
        .map(|field| {
            let name = field.name.snake_case();
            let sortable = metadata.sortable.contains(&name);
            format!(
                "        {{ key: '{name}', labelKey: '{camel}.fields.{name}', sortable: {sortable} }},"
            )
        })
        .collect();
    lines.join("\n")
}

pub fn form_fields(fields: &[FrontendField], entity: &Name) -> String {
    let camel = entity.camel_case();
    let lines: Vec<String> = fields
        .iter()
        .map(|field| {
            let name = field.name.snake_case();
            let label = format!("labelKey=\"{camel}.fields.{name}\"");
            if !field.options.is_empty() {
                let quoted: Vec<String> =
                    field.options.iter().map(|option| format!("'{option}'")).collect();
                return format!(
                    "      <Form.Select name=\"{name}\" {label} options={{[{}]}} />",
                    quoted.join(", ")
                );
            }
            match field.ts_type.as_str() {
                "boolean" => format!("      <Form.Toggle name=\"{name}\" {label} />"),
                "number" => format!("      <Form.Number name=\"{name}\" {label} />"),
                "number[]" => format!("      <Form.MultiSelect name=\"{name}\" {label} />"),
                _ if field.datetime => {
                    format!("      <Form.DatePicker name=\"{name}\" {label} />")
                }
                _ => format!("      <Form.Text name=\"{name}\" {label} />"),
            }
        })
        .collect();
    lines.join("\n")
}

pub fn detail_fields(fields: &[FrontendField], entity: &Name) -> String {
    let camel = entity.camel_case();
    let lines: Vec<String> = fields
        .iter()
        .filter(|field| field.ts_type != "number[]")
        .map(|field| {
            let name = field.name.snake_case();
            format!(
                "          {{ labelKey: '{camel}.fields.{name}', value: selected.{name} }},"
            )
        })
        .collect();
    lines.join("\n")
}

/// One locale bundle: per-field labels, validation messages and enum
/// option labels, plus the fixed table/repository/presentation blocks.
pub fn locale_bundle(fields: &[FrontendField], entity: &Name, locale: &str) -> Value {
    let mut labels = Map::new();
    let mut validation = Map::new();
    let mut options = Map::new();

    for field in fields {
        let name = field.name.snake_case();
        labels.insert(name.clone(), Value::String(humanize(&name)));
        if field.required {
            validation.insert(
                format!("{name}_required"),
                Value::String(required_message(&name, locale)),
            );
        }
        if !field.options.is_empty() {
            let mut members = Map::new();
            for option in &field.options {
                members.insert(option.clone(), Value::String(humanize(option)));
            }
            options.insert(name, Value::Object(members));
        }
    }

    json!({
        "fields": labels,
        "validation": validation,
        "options": options,
        "table": table_block(entity, locale),
        "repository": repository_block(locale),
        "presentation": presentation_block(locale),
    })
}

fn table_block(entity: &Name, locale: &str) -> Value {
    let title = humanize(&entity.plural_snake_case());
    match locale {
        "ru" => json!({ "title": title, "empty": "Записей нет", "search": "Поиск..." }),
        "uz" => json!({ "title": title, "empty": "Yozuvlar yo'q", "search": "Qidirish..." }),
        _ => json!({ "title": title, "empty": "No records found", "search": "Search..." }),
    }
}

fn repository_block(locale: &str) -> Value {
    match locale {
        "ru" => json!({
            "created": "Запись создана",
            "updated": "Запись обновлена",
            "deleted": "Запись удалена",
            "load_failed": "Не удалось загрузить данные",
        }),
        "uz" => json!({
            "created": "Yozuv yaratildi",
            "updated": "Yozuv yangilandi",
            "deleted": "Yozuv o'chirildi",
            "load_failed": "Ma'lumotlarni yuklab bo'lmadi",
        }),
        _ => json!({
            "created": "Record created",
            "updated": "Record updated",
            "deleted": "Record deleted",
            "load_failed": "Failed to load data",
        }),
    }
}

fn presentation_block(locale: &str) -> Value {
    match locale {
        "ru" => json!({
            "save": "Сохранить",
            "edit": "Редактировать",
            "create": "Создать",
            "detail": "Подробности",
            "delete_confirm": "Удалить запись?",
        }),
        "uz" => json!({
            "save": "Saqlash",
            "edit": "Tahrirlash",
            "create": "Yaratish",
            "detail": "Tafsilotlar",
            "delete_confirm": "Yozuv o'chirilsinmi?",
        }),
        _ => json!({
            "save": "Save",
            "edit": "Edit",
            "create": "Create",
            "detail": "Details",
            "delete_confirm": "Delete this record?",
        }),
    }
}

fn required_message(name: &str, locale: &str) -> String {
    let label = humanize(name);
    match locale {
        "ru" => format!("Поле «{label}» обязательно"),
        "uz" => format!("{label} maydoni majburiy"),
        _ => format!("{label} is required"),
    }
}

/// `customer_id` -> `Customer id`.
fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_fields() -> Vec<FrontendField> {
        vec![
            FrontendField {
                name: Name::new("title"),
                ts_type: "string".to_string(),
                required: true,
                default: None,
                options: Vec::new(),
                nullable: false,
                datetime: false,
            },
            FrontendField {
                name: Name::new("status"),
                ts_type: "string".to_string(),
                required: true,
                default: Some("'draft'".to_string()),
                options: vec!["draft".to_string(), "sent".to_string()],
                nullable: false,
                datetime: false,
            },
            FrontendField {
                name: Name::new("archived"),
                ts_type: "boolean".to_string(),
                required: false,
                default: Some("false".to_string()),
                options: Vec::new(),
                nullable: false,
                datetime: false,
            },
        ]
    }

    #[test]
    fn type_fields_frame_id_and_timestamps() {
        let rendered = type_fields(&sample_fields());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.first().unwrap().trim(), "id: number;");
        assert_eq!(lines.last().unwrap().trim(), "updated_at: string;");
    }

    #[test]
    fn input_fields_mark_optionals() {
        let rendered = input_fields(&sample_fields());
        assert!(rendered.contains("  title: string;"));
        assert!(rendered.contains("  archived?: boolean;"));
    }

    #[test]
    fn schema_rules_pick_base_by_shape() {
        let rendered = schema_rules(&sample_fields());
        assert!(rendered.contains("title: rules.string().required(),"));
        assert!(rendered.contains("status: rules.oneOf(['draft', 'sent']).required(),"));
        assert!(rendered.contains("archived: rules.boolean().optional(),"));
    }

    #[test]
    fn form_fields_use_controls_by_type() {
        let rendered = form_fields(&sample_fields(), &Name::new("Invoice"));
        assert!(rendered.contains("<Form.Text name=\"title\""));
        assert!(rendered.contains("<Form.Select name=\"status\""));
        assert!(rendered.contains("<Form.Toggle name=\"archived\""));
    }

    #[test]
    fn locale_bundle_includes_field_and_fixed_blocks() {
        let bundle = locale_bundle(&sample_fields(), &Name::new("Invoice"), "en");
        assert_eq!(bundle["fields"]["title"], "Title");
        assert_eq!(bundle["validation"]["title_required"], "Title is required");
        assert_eq!(bundle["options"]["status"]["draft"], "Draft");
        assert_eq!(bundle["table"]["title"], "Invoices");
        assert_eq!(bundle["presentation"]["save"], "Save");
    }
}
