//! Storage adapters - In-memory persistence for development and tests.

mod in_memory_conversation_repository;

pub use in_memory_conversation_repository::InMemoryConversationRepository;
