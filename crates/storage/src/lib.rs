#![forbid(unsafe_code)]

pub mod mapping;
pub mod remote;
pub mod repository;
pub mod session_store;
pub mod sqlite;
