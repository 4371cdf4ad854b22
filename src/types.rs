pub mod project_model;
pub use project_model::*;
