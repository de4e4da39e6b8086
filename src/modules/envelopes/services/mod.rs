pub mod envelope_service;

pub use envelope_service::EnvelopeService;
