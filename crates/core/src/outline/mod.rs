pub mod builder;
pub mod index;
pub mod view;

pub use builder::{TreeBuilder, placeholder, shorten};
pub use index::{IndexState, OutlineIndex};
pub use view::OutlineView;
