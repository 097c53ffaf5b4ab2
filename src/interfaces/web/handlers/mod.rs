pub mod chat;
pub mod mind;
pub mod models;
pub mod pages;
