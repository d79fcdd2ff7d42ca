//! OAuth 1.0a credential models exchanged with the provider.

pub mod token;

pub use token::{secret::*, *};
