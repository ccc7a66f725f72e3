pub mod identity;
pub mod ownership;
pub mod project;
