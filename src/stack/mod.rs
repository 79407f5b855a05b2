//! Closed identifier sets: target stacks and build plan components.

#[macro_use]
pub mod id_enum_macro;

pub mod component_id;
pub mod stack_id;

pub use component_id::ComponentId;
pub use stack_id::StackId;
