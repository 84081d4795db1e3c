//! HTTP client: request transport and streaming receive engine.
//!
//! # Receive State Machine
//!
//! Response boundaries are unknown until bytes arrive, so the engine
//! classifies each read against a small state machine:
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AWAITING_HEADERS │ ← Accumulate until \r\n\r\n is located
//!        └──────┬───────────┘
//!               │ Delimiter found, headers parsed
//!               ▼
//!        ┌──────────────────┐
//!        │  RECEIVING_BODY  │ ← Append reads, count received bytes
//!        └──────┬───────────┘
//!               │ Content-Length covered, or EOF
//!               ▼
//!        ┌──────────────────┐
//!        │     COMPLETE     │ ← Wire-observed length becomes authoritative
//!        └──────────────────┘
//!
//!   EOF or read error before the delimiter → FAILED (no response object)
//! ```
//!
//! The transport owns the connection around the engine: it serializes the
//! request, writes it (with one reconnect-and-retry on write failure), runs
//! the engine, and closes the connection on every exit path.

pub mod error;
pub mod receive;
pub mod transport;

pub use error::TransportError;
pub use transport::Transport;
