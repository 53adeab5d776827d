//! Secret containers for key material
//!
//! Thin aliases over `secrecy`: values are zeroized on drop and `Debug`
//! prints `[REDACTED]`.

mod secret;

pub use secret::{IntoSecret, SecretBytes, SecretString};
