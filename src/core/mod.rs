pub mod chat;
pub mod config;
pub mod connectors;
pub mod error;
pub mod llm;
pub mod mind;
pub mod terminal;

#[cfg(test)]
pub mod testing;
