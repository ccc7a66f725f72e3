pub mod identity;
pub mod memory;
pub mod project;

pub use identity::PostgresCredentialStore;
pub use memory::InMemoryCredentialStore;
pub use memory::InMemoryProjectRepository;
pub use project::PostgresProjectRepository;
