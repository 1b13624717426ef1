pub mod browser;
pub mod checker;
pub mod commands;
