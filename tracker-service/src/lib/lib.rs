pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::identity;
pub use domain::ownership;
pub use domain::project;
pub use outbound::repositories;
