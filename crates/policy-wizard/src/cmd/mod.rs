pub mod catalog;
pub mod run;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use policy_qa::{Catalog, security_policy};

/// Loads the catalog at `path`, or the built-in security policy catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path.display()))?;
            Catalog::from_json_str(&raw)
                .with_context(|| format!("failed to load catalog {}", path.display()))
        }
        None => Ok(security_policy().clone()),
    }
}
