use std::collections::HashSet;

use fitquest_core::{Catalog, ExerciseTemplate};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Loads the template catalog from a JSON file, or the built-in catalog
/// when no path is configured.
pub async fn load_catalog(path: Option<&str>) -> AppResult<Catalog> {
    let Some(path) = path else {
        let catalog = Catalog::builtin();
        info!("using built-in catalog with {} templates", catalog.len());
        return Ok(catalog);
    };

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| AppError::Catalog(format!("failed to read '{path}': {err}")))?;
    let catalog = parse_catalog(&raw)?;
    info!("loaded {} templates from {path}", catalog.len());
    Ok(catalog)
}

/// Parses a JSON array of templates. Later duplicates of a name are dropped
/// since the name is the template's key.
pub fn parse_catalog(raw: &str) -> AppResult<Catalog> {
    let templates: Vec<ExerciseTemplate> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(templates.len());
    for template in templates {
        if template.name.trim().is_empty() {
            return Err(AppError::Catalog("template name is required".to_string()));
        }
        if seen.insert(template.name.clone()) {
            unique.push(template);
        } else {
            warn!(name = %template.name, "dropping duplicate template");
        }
    }
    Ok(Catalog::new(unique))
}
