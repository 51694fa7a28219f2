//! Invocation client for the letter counter server.
//!
//! One session connects to the server (spawning it as a child process over
//! stdio, or attaching over TCP), lists its tools, calls `letter_counter`
//! once and disconnects. The CLI and the web UI are thin layers over
//! [`run_session`].

mod backend;
mod config;
mod error;
mod request;
mod session;

pub use backend::CountBackend;
pub use config::{ClientConfig, ServiceLocation};
pub use error::{ClientError, ClientResult};
pub use request::CountRequest;
pub use session::{CountOutcome, InvocationSession, SessionState, run_session};
