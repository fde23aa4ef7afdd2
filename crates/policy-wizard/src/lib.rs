pub mod cli;
pub mod cmd;
pub mod config;
pub mod driver;
pub mod logging;
pub mod sink;
