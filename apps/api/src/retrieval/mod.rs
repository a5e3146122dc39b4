// Semantic job search: embeddings, vector store, retrieved items and the
// grounded-answer responder built on top of them.

pub mod document;
pub mod embedder;
pub mod prompts;
pub mod responder;
pub mod vector_store;

pub use embedder::OpenAiEmbedder;
pub use responder::SemanticSearchResponder;
pub use vector_store::{QdrantClient, SearchFilter};
