//! External service adapters: secret resolution and the one-way document
//! processor notification.

pub mod processor;
pub mod secrets;

pub use processor::{HttpProcessorNotifier, ProcessorNotifier};
pub use secrets::{EnvSecretProvider, SecretManagerClient, SecretProvider, ServiceCredentials};
