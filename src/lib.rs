pub mod api;
pub mod auction;
pub mod auth;
pub mod cancel;
pub mod config;
pub mod error;
pub mod handlers;
pub mod session;
pub mod storage;
pub mod view;
