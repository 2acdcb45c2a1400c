mod map;
mod set;
mod tree;

pub use set::{SetIntoIter, SetIter};
pub use tree::{IntoIter, IntoKeys, Iter, Keys, Range, Values};
