// src/serving/mod.rs

pub mod analytics;
pub mod engine;
pub mod resolver;
pub mod selector;
