// Adapters layer: concrete implementations for external systems.

pub mod twilio;

pub use twilio::TwilioSender;
