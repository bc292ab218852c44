//! Resource templates and placeholder substitution.
//!
//! - `{{name}}` substitution and [`Substitutions`] in [`substitution`]
//! - Loading templates from the resource root in [`renderer`]
//! - Parsing rendered `.json` templates in [`rendered`]

pub mod rendered;
pub mod renderer;
pub mod substitution;

pub use rendered::{normalize_quotes, parse_json, Rendered};
pub use renderer::{TemplateRenderer, DEFAULT_RESOURCE_ROOT};
pub use substitution::{placeholders, render_str, Substitutions};
