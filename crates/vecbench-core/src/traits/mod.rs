pub mod store;

pub use store::{SearchFilter, VectorSession, VectorStore};
