pub mod batch;
pub mod compare;
pub mod config;
mod input;
mod output;
pub mod parse;
