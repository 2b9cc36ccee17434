//! Upstream model boundary: prompt construction, transport, and the
//! Gemini text-generation client.

pub mod gemini;
pub mod prompt;
pub mod transport;

pub use gemini::{GeminiClient, GeminiConfig};
pub use transport::{HttpReply, HttpTransport, Transport};
