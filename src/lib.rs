pub mod batch;
pub mod commands;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod performance;
pub mod simulation;
pub mod strategy;
pub mod trading_rules;
