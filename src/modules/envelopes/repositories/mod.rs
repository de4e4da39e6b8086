pub mod envelope_repository;

pub use envelope_repository::{EnvelopeRepository, MySqlEnvelopeRepository};
