use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gantry_codegen::EMBEDDED_STUBS;
use tracing::info;

/// Copy the embedded stub set into `<root>/stubs` so a project can
/// customize the generated output. Existing files are left alone.
pub fn exec(root: &Path) -> Result<()> {
    let stubs_dir = root.join("stubs");
    let mut written = 0;

    for (name, body) in EMBEDDED_STUBS {
        let path = stubs_dir.join(name);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, body).with_context(|| format!("failed to write {}", path.display()))?;
        written += 1;
    }

    info!(dir = %stubs_dir.display(), written, "stubs published");
    Ok(())
}
