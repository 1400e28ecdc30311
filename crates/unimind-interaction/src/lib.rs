//! Adapters to external AI backends.

pub mod gemini_gateway;

pub use gemini_gateway::GeminiGateway;
