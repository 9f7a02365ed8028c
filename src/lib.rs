#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::return_self_not_must_use)]

//! AIVA chat session engine
//!
//! Implements the conversational session model behind the AIVA chatbot UI:
//! an ordered in-memory transcript, the pending-reply lifecycle, and a
//! simulated asynchronous reply behind an injectable generator.
//!
//! The UI shell itself (rendering, routing, styling) is out of scope; its
//! seams are modeled as traits: [`reply::ReplyGenerator`] for the reply
//! backend and [`auth::AuthService`] / [`auth::Navigator`] for the login
//! guard and logout flow.

pub mod auth;
pub mod config;
pub mod reply;
pub mod runtime;
pub mod session;
pub mod shell;
pub mod state_machine;

pub use config::SessionConfig;
pub use runtime::{SessionHandle, SessionManager, UiEvent};
pub use session::{Sender, Snapshot, Turn};
pub use shell::ChatShell;
pub use state_machine::{Event, SessionState};
