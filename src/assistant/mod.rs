//! Scripted pieces of the landing page: the FAQ chatbot and the live writing demo.

pub mod chatbot;
pub mod demo;
