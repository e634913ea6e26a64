pub mod codec;
pub mod store;

pub use store::{SpecificsRow, SpecificsStore};
