//! # Types Module
//!
//! Wire-level data types exchanged between the relay and its caller.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ImprovementRequest`] | A prompt to be reworded |
//! | [`InboundCommand`] | Message received from the UI collaborator |
//! | [`ImprovementResult`] | Tagged success/failure outcome of one relay call |

pub mod command;
pub mod result;

pub use command::{ImprovementRequest, InboundCommand, IMPROVE_PROMPT_ACTION};
pub use result::ImprovementResult;
