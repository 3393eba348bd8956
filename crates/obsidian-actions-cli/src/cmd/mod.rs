pub mod call;
pub mod command;
pub mod config;
pub mod dataview;
pub mod file;
pub mod folder;
pub mod note;
pub mod vault;
