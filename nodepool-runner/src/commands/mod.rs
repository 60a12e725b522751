pub mod expand;
pub mod flatten;
pub mod plan;
pub mod schema;
pub mod validate;
