//! Classified announcements service.
//!
//! Authors post announcements under headings and keep "suitable ad"
//! subscriptions; a new announcement matching a subscription is mailed to
//! the subscriber. Requests are authenticated with signed bearer tokens.

pub mod api;
pub mod cleanup;
pub mod config;
pub mod dto;
pub mod entities;
pub mod error;
pub mod mapping;
pub mod migration;
pub mod notification;
pub mod repository;
pub mod security;
pub mod service;
pub mod state;

pub use error::{AppError, Result};
