//! Terminal UI layer for the interactive chat session.
//!
//! - [`chat_loop`]: the main interaction loop that polls terminal events,
//!   dispatches submissions to the agent client, and applies completions.
//! - [`renderer`]: frame composition — transcript lines, typing indicator,
//!   input area, and scroll bounds.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns the conversation itself.

pub mod chat_loop;
pub mod renderer;
