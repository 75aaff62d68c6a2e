pub mod catalogue;
pub mod config;
pub mod dto;
pub mod error;
pub mod format;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod security;
pub mod source;
pub mod state;
