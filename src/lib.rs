#![cfg_attr(not(test), no_std)]

pub mod client;
pub mod commands;
pub mod config;
pub mod protocol;
pub mod serial;
