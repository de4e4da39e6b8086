pub mod envelope;

pub use envelope::{
    CreateEnvelopeRequest, Envelope, PayInstallmentRequest, PaymentReceipt, UpdateEnvelopeRequest,
};
