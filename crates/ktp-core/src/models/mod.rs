//! Data models for KTP records and configuration.

pub mod config;
pub mod ktp;
