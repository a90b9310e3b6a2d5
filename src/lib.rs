pub mod lang;

pub use lang::runtime::{evaluate, Runtime};
pub use lang::value::Value;
