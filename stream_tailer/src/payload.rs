mod decoded;
mod kind;
mod registry;

pub use decoded::*;
pub use kind::*;
pub use registry::*;
