#![deny(unsafe_code)]

//! Base view templates: discovery on disk and field scanning.

pub mod error;
pub mod paths;
pub mod registry;
pub mod scan;

pub use crate::error::{Result, TemplateError};
pub use crate::paths::{BASE_VIEWS_ENV_VAR, TEMPLATE_SUFFIX, resolve_base_views_dir};
pub use crate::registry::{BaseTemplate, TemplateRegistry};
pub use crate::scan::scan_template_fields;
