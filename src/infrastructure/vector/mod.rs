//! Vector store implementations

mod pinecone;

pub use pinecone::PineconeStore;
