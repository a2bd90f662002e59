//! Template directory path resolution.

use std::path::PathBuf;

use lookml_model::{DEFAULT_BASE_VIEWS_DIR, GeneratorOptions};

/// Environment variable for overriding the base views directory.
pub const BASE_VIEWS_ENV_VAR: &str = "LOOKML_BASE_VIEWS_DIR";

/// File suffix shared by template sources and generated views.
pub const TEMPLATE_SUFFIX: &str = ".view.lkml";

/// Get the base views directory.
///
/// Resolution order:
/// 1. `explicit` (the `--base-views` flag)
/// 2. `base_views_dir` from the loaded options
/// 3. `LOOKML_BASE_VIEWS_DIR` environment variable
/// 4. `#models/_base/views` relative to the working directory
pub fn resolve_base_views_dir(explicit: Option<PathBuf>, options: &GeneratorOptions) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = &options.base_views_dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var(BASE_VIEWS_ENV_VAR)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    PathBuf::from(DEFAULT_BASE_VIEWS_DIR)
}
