//! Credential persistence for the authenticated API session.

pub mod token_store;

pub use token_store::TokenStore;
