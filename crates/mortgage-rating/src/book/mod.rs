//! Mortgage book: the storage-facing collaborator that keeps submitted mortgages.
//!
//! Persistence stays behind [`MortgageRepository`]; the book validates submissions the way
//! the data-entry form does and attaches the single-mortgage rating to every stored entry.

pub mod repository;
pub mod router;
pub mod service;
pub mod validation;


pub use repository::{MortgageEntry, MortgageRepository, RepositoryError};
pub use router::book_router;
pub use service::{BookError, MortgageBook};
pub use validation::validate_submission;
