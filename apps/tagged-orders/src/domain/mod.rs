//! Domain Layer
//!
//! The innermost layer containing business logic with zero infrastructure dependencies.
//! This layer defines:
//!
//! - **Value Objects**: Immutable domain types with equality by value
//! - **Domain Services**: Stateless transforms over orders and symbols
//! - **Collaborator Traits**: Abstractions implemented here or in adapters
//!
//! # Bounded Contexts
//!
//! - [`orders`]: Order model and the dedup → filter → sort pipeline
//! - [`instruments`]: Instrument reference data and trading symbol humanization

pub mod instruments;
pub mod orders;
pub mod shared;
