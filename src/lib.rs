//! Wxchat is a terminal chat client for a remote weather agent service.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns conversation state, the message model, configuration,
//!   and the fixed strings of the chat contract.
//! - [`api`] defines the request/response payloads exchanged with the agent
//!   service and the client seam used to reach it.
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`utils`] holds input sanitization, URL construction, and transcript
//!   logging helpers shared across the layers.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which resolves configuration and dispatches
//! into [`ui::chat_loop`] for the interactive session.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
