//! Seongraph LSP — blocking language-server client and position bridge

pub mod bridge;
pub mod client;
pub mod error;
pub mod resolver;


pub use bridge::{LspBridge, ResolvedLocation};
pub use client::LspClient;
pub use error::{Error, Result};
pub use resolver::{RawLocation, StaticResolver, SymbolResolver};
