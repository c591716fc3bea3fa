//! Core components of the `bvb-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`BvbClient`] and its builder.
//! - The primary [`BvbError`] type.
//! - The [`Transport`] seam that performs the actual HTTP exchange.
//! - Ticker normalization ([`Symbol`], [`SymbolSelector`]).

/// The main client (`BvbClient`), builder, and configuration.
pub mod client;
/// Scalar conversions and exchange-timezone helpers.
pub mod conversions;
/// The primary error type (`BvbError`) for the crate.
pub mod error;
pub(crate) mod html;
/// Ticker symbols and selectors.
pub mod symbol;
/// Outbound request descriptors and the transport trait.
pub mod transport;

// convenient re-exports so most code can just `use crate::core::BvbClient`
pub use client::{BvbClient, BvbClientBuilder};
pub use error::{BvbError, Schema};
pub use symbol::{Symbol, SymbolSelector};
pub use transport::{HttpTransport, Method, Request, Transport, TransportFuture};
