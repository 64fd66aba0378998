// Domain records and shared conventions
pub mod model;

// Crate-wide error taxonomy
pub mod error;

// Observable key-value stores
pub mod store;

// PokeAPI collaborator trait and HTTP client
pub mod remote;

// Catalog loading and at-most-once detail hydration
pub mod hydration;

// Derived list/detail projections
pub mod view;

// Local favorite mutations
pub mod favorite;

// Configuration
pub mod config;
