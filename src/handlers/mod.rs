// src/handlers/mod.rs

pub mod question;
pub mod session;
