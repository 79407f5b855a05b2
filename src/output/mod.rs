pub mod schema;

pub use schema::{Applicability, BuildPlan, Provided, Required};
