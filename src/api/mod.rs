// src/api/mod.rs

pub mod handlers;
