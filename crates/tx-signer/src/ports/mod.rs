//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that wallet and tooling code calls
//!
//! The signer has no driven ports: it never touches the network or storage.

pub mod inbound;
