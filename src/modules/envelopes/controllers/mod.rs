pub mod envelope_controller;

pub use envelope_controller::configure;
