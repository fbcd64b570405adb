//! Random-access reading of container bytes.

mod byte_source;

pub use byte_source::{ByteSource, FileSource, MemorySource};
