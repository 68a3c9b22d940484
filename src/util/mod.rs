pub mod checksum;
mod coding;
mod result;

pub use coding::*;
pub use result::{Code, Error, Result};
