pub mod app;
pub mod config;
pub mod data_source;
pub mod helper;
pub mod input_panel;
pub mod pagination;
pub mod presentation;
pub mod types;
pub mod visibility;
