pub mod archive;
pub mod commands;
pub mod error;
pub mod http;
pub mod install;
pub mod manifest;
pub mod package;
pub mod platform;
pub mod runtime;
