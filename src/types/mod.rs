pub mod errors;

pub use errors::{Error, ErrorId, ErrorKind, Result};
