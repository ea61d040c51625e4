pub mod app;
pub mod cli;
pub mod commands;
pub mod context;
pub mod forms;
pub mod image;
pub mod rest;
pub mod search;
pub mod storage;
pub mod stores;
pub mod tracing;
pub mod types;
