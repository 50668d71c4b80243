//! The Ghost Objects.

mod class;
mod function;
mod map;
mod module;
mod value;

pub use class::*;
pub use function::*;
pub use map::*;
pub use module::*;
pub use value::*;
