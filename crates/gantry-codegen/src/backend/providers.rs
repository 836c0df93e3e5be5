use gantry_core::{Name, PlaceholderStyle, ReplacementMap};
use tracing::{error, info};

use crate::error::Result;
use crate::project::Project;
use crate::render::{read_file, write_file, Stubs};

/// Append the module's provider path to the bootstrap list. The entry is
/// inserted as the trailing element of the single array literal returned by
/// `providers()`.
pub fn patch(project: &Project, stubs: &Stubs, module: &Name, entity: &Name) -> Result<()> {
    let path = project.providers_path();
    let provider = format!("modules/{}/{}", module.snake_case(), entity.snake_case());

    if !path.exists() {
        let template = stubs.load("backend/providers.stub")?;
        write_file(&path, &ReplacementMap::new().apply(&template, PlaceholderStyle::Braced))?;
    }

    let contents = read_file(&path)?;
    if contents.contains(&provider) {
        info!(provider = %provider, "provider already listed, skipping");
        return Ok(());
    }

    // The closing bracket of the return array is the structural anchor.
    let lines: Vec<&str> = contents.lines().collect();
    let open = lines.iter().position(|line| line.trim() == "return [");
    let close = open.and_then(|start| {
        lines[start..]
            .iter()
            .position(|line| line.trim() == "];")
            .map(|offset| start + offset)
    });
    let Some(close) = close else {
        error!(path = %path.display(), "providers array not found, leaving file unmodified");
        return Ok(());
    };

    let mut updated: Vec<String> = lines.iter().map(|line| (*line).to_string()).collect();
    updated.insert(close, format!("    '{provider}',"));
    write_file(&path, &format!("{}\n", updated.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_patch(dir: &tempfile::TempDir, module: &str, entity: &str) {
        let project = Project::new(dir.path());
        patch(&project, &Stubs::embedded(), &Name::new(module), &Name::new(entity)).unwrap();
    }

    fn providers_file(dir: &tempfile::TempDir) -> String {
        std::fs::read_to_string(dir.path().join("server/src/app/providers.ts")).unwrap()
    }

    #[test]
    fn appends_trailing_entry() {
        let dir = tempfile::tempdir().unwrap();
        run_patch(&dir, "Billing", "Invoice");
        run_patch(&dir, "Billing", "Payment");
        let contents = providers_file(&dir);
        let invoice = contents.find("'modules/billing/invoice',").unwrap();
        let payment = contents.find("'modules/billing/payment',").unwrap();
        assert!(invoice < payment);
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        run_patch(&dir, "Billing", "Invoice");
        let first = providers_file(&dir);
        run_patch(&dir, "Billing", "Invoice");
        assert_eq!(first, providers_file(&dir));
    }

    #[test]
    fn missing_array_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server/src/app/providers.ts");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "export const providers = null;\n").unwrap();
        run_patch(&dir, "Billing", "Invoice");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export const providers = null;\n"
        );
    }
}
