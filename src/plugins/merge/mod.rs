pub mod append;
pub mod buffer;
pub mod stream;
