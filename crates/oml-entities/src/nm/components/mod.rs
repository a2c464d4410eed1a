pub mod classifier;
pub mod object_registry;
