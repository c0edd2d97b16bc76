pub mod api;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod i18n;
pub mod security;
pub mod translation;
