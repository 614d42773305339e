//! TypeScript declarations for host front-ends.

use crate::arguments::ViewArguments;
use crate::error::BridgeError;
use crate::events::ViewEvent;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use ts_rs::TS;

const EXPORTED_TYPES: &[&str] = &["ViewEvent", "ViewArguments", "BridgeError"];

fn export_single_type<T: TS + 'static>(out_dir: &Path) -> Result<()> {
    T::export_all_to(out_dir).with_context(|| format!("Failed to export {}", T::name()))
}

/// Rewrites every `.ts` file in `out_dir`, plus an `index.ts` re-exporting them.
pub fn export_ts_bindings(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for entry in
        fs::read_dir(out_dir).with_context(|| format!("Failed to list {}", out_dir.display()))?
    {
        let path = entry.context("Failed to read entry")?.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("ts") {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }

    export_single_type::<ViewEvent>(out_dir)?;
    export_single_type::<ViewArguments>(out_dir)?;
    export_single_type::<BridgeError>(out_dir)?;

    let index_content: String = EXPORTED_TYPES
        .iter()
        .map(|name| format!("export type {{ {name} }} from \"./{name}\";\n"))
        .collect();
    let index_path = out_dir.join("index.ts");
    fs::write(&index_path, index_content)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    Ok(())
}
