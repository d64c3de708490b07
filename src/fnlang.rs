//! Main module for fnlang library functionality

pub mod ast;
pub mod config;
pub mod lexing;
pub mod parsing;
pub mod token;
