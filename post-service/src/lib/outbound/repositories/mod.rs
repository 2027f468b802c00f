pub mod in_memory;
pub mod post;

pub use in_memory::InMemoryPostRepository;
pub use post::PostgresPostRepository;
