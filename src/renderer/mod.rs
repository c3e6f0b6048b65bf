//! Template lookup and rendering functionality
//!
//! The engine boundary is a small trait so orchestration code depends only
//! on template lookup by name and rendering against a variable mapping, not
//! on MiniJinja directly.

pub mod interface;
pub mod minijinja;

pub use interface::TemplateRenderer;
pub use minijinja::MiniJinjaRenderer;
