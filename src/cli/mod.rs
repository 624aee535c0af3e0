//! Interactive command interface
//!
//! This module contains the command loop and the prompting it is built on,
//! bridging terminal input with the service layer.

pub mod prompt;
pub mod shell;

pub use prompt::Prompter;
pub use shell::{Command, Shell, RAW_PREVIEW_LINES};
