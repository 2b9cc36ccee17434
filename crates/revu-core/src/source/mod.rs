pub mod read;

pub use read::{SourceContext, read_source};
