#[macro_use]
pub mod util;

pub use util::*;

solutions![d16];
