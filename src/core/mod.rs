pub mod assembler;
pub mod error;
pub mod events;
pub mod model;
pub mod naming;
pub mod planner;
pub mod splitter;
