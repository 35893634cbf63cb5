pub mod audio;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod flash;
pub mod input;
pub mod interaction;
pub mod render;
pub mod selection;
pub mod state;
pub mod texture_loader;
pub mod widget;
