pub mod clap_app;
pub mod command;
pub mod config;
pub mod logging;
pub mod output;
