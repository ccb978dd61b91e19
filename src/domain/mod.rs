//! Domain types for the manual payment workflow and the ports it talks through.

pub mod details;
pub mod notice;
pub mod order;
pub mod package;
pub mod ports;
pub mod status;
pub mod submission;
