pub mod agent;
pub mod api;
pub mod backend;
pub mod config;
pub mod game;
pub mod llms_txt;
pub mod metrics;
