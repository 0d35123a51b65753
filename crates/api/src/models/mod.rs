pub mod input;
pub mod script;
pub mod symbol;

pub use input::*;
pub use script::*;
pub use symbol::*;
