// Catalog loading and at-most-once detail hydration

mod engine;

pub use engine::Hydrator;
