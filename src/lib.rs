pub mod cli;
pub mod clients;
pub mod commands;
pub mod config;
pub mod drafts;
pub mod generator;
pub mod keywords;
pub mod publisher;
