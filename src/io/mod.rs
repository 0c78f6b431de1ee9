pub mod reader;
pub mod snapshot;
pub mod writer;
