//! HTTP route handlers

pub mod game;
pub mod history;
pub mod status;
