pub mod logging;
pub mod outline;

pub use outline::{IndexState, OutlineIndex, OutlineView, TreeBuilder};
pub use shellscope_api::{OutlineError, Result};
