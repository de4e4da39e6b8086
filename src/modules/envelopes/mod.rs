// Envelopes module: savings targets paid off in installments

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Envelope, PaymentReceipt};
pub use repositories::{EnvelopeRepository, MySqlEnvelopeRepository};
pub use services::EnvelopeService;
