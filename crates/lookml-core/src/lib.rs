//! View generation: template matching, per-column rendering, view
//! assembly and the table relationship graph.

pub mod emit;
pub mod error;
pub mod matcher;
pub mod relationships;
pub mod render;

pub use emit::{build_view, output_path, render_view_text, write_view};
pub use error::{GenerateError, Result};
pub use matcher::{TemplateMatch, match_templates};
pub use relationships::{
    Link, LinkData, LinkSource, build_link_data_array, load_link_source, write_link_data,
};
pub use render::{render_column, render_placeholder};
