pub mod credential_store;
pub mod in_memory;

pub use credential_store::PostgresCredentialStore;
pub use in_memory::InMemoryCredentialStore;
