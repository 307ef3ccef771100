//! Common test utilities and helpers
//!
//! - Temp-dir SQLite fixtures with a low bcrypt cost
//! - In-process `axum-test` servers that keep cookies like a browser

#![allow(dead_code)]

pub mod database;
pub mod http;
