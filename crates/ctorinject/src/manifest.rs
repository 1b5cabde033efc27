use crate::prelude::*;
use ctorinject_core::manifest::Manifest;
use std::fs;
use std::path::Path;

/// Load the manifest at `path`, or an empty one when no path is given.
pub fn load(path: Option<&Path>) -> Result<Manifest> {
    let Some(path) = path else {
        log::debug!("no manifest given, starting from an empty target list");
        return Ok(Manifest::default());
    };

    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;

    let manifest = Manifest::from_toml(&content)
        .with_context(|| f!("Invalid manifest {}", path.display()))?;

    log::debug!(
        "loaded manifest {}: {} extend, {} create, {} fixes",
        path.display(),
        manifest.extend.len(),
        manifest.create.len(),
        manifest.fixes.len()
    );

    Ok(manifest)
}
