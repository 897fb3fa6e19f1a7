mod dynamic;
mod preparer;

pub use dynamic::*;
pub use preparer::*;
