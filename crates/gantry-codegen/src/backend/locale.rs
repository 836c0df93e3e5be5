use std::fs;

use gantry_core::Name;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::project::{Project, LOCALES};
use crate::render::write_file;

/// The nine message keys every entity contributes to each locale file.
const MESSAGE_KEYS: &[&str] = &[
    "created",
    "updated",
    "deleted",
    "restored",
    "fetched",
    "listed",
    "not_found",
    "duplicate",
    "validation_failed",
];

/// Merge the entity's messages into the three shared locale files. The
/// merge is additive-only: an existing key is never overwritten, even when
/// the newly computed text differs. Files are parsed as JSON data.
pub fn merge(project: &Project, entity: &Name) -> Result<()> {
    for &locale in LOCALES {
        let path = project.server_locale_path(locale);
        let mut messages: Map<String, Value> = if path.exists() {
            let body = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&body).map_err(|source| Error::Locale {
                path: path.clone(),
                source,
            })?
        } else {
            Map::new()
        };

        let mut added = 0;
        for key in MESSAGE_KEYS {
            let full_key = format!("{}.{key}", entity.snake_case());
            if messages.contains_key(&full_key) {
                continue;
            }
            messages.insert(full_key, Value::String(message(locale, key, entity)));
            added += 1;
        }
        debug!(locale, added, "merged entity messages");

        let body = serde_json::to_string_pretty(&Value::Object(messages)).map_err(|source| {
            Error::Locale {
                path: path.clone(),
                source,
            }
        })?;
        write_file(&path, &format!("{body}\n"))?;
    }
    Ok(())
}

fn message(locale: &str, key: &str, entity: &Name) -> String {
    let label = label(entity);
    match locale {
        "ru" => match key {
            "created" => format!("{label}: запись создана"),
            "updated" => format!("{label}: запись обновлена"),
            "deleted" => format!("{label}: запись удалена"),
            "restored" => format!("{label}: запись восстановлена"),
            "fetched" => format!("{label}: запись получена"),
            "listed" => format!("{label}: список получен"),
            "not_found" => format!("{label}: запись не найдена"),
            "duplicate" => format!("{label}: такая запись уже существует"),
            _ => format!("{label}: данные не прошли проверку"),
        },
        "uz" => match key {
            "created" => format!("{label} yaratildi"),
            "updated" => format!("{label} yangilandi"),
            "deleted" => format!("{label} o'chirildi"),
            "restored" => format!("{label} tiklandi"),
            "fetched" => format!("{label} topildi"),
            "listed" => format!("{label} ro'yxati olindi"),
            "not_found" => format!("{label} topilmadi"),
            "duplicate" => format!("{label} allaqachon mavjud"),
            _ => format!("{label} ma'lumotlari noto'g'ri"),
        },
        _ => match key {
            "created" => format!("{label} created"),
            "updated" => format!("{label} updated"),
            "deleted" => format!("{label} deleted"),
            "restored" => format!("{label} restored"),
            "fetched" => format!("{label} fetched"),
            "listed" => format!("{label} list retrieved"),
            "not_found" => format!("{label} not found"),
            "duplicate" => format!("{label} already exists"),
            _ => format!("{label} payload failed validation"),
        },
    }
}

/// Human-readable entity label: `invoice_item` -> `Invoice item`.
fn label(entity: &Name) -> String {
    let spaced = entity.snake_case().replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
