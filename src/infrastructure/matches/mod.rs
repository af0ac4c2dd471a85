//! Match infrastructure implementations

mod in_memory;
mod postgres_repository;
mod service;

pub use in_memory::InMemoryMatchRepository;
pub use postgres_repository::PostgresMatchRepository;
pub use service::{CreateMatchRequest, MatchService, UpdateMatchRequest};
