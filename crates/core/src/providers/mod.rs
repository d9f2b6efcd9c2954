pub mod registry;
pub mod subscription;
pub mod traits;

// External collaborator implementations
pub mod gemini;
pub mod memory_store;
