pub mod hnsw;
