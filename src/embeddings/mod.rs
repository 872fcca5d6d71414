// Embedding providers, chunking, and vector-index synchronization

pub mod chunker;
pub mod google;
pub mod openai;
pub mod provider;
pub mod sync;
pub mod vector_store;

pub use chunker::*;
pub use provider::*;
pub use sync::*;
pub use vector_store::*;
