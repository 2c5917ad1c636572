pub mod merge;
pub mod registry;
