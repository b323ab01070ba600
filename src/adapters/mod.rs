// Adapters layer: concrete implementations for external systems (record storage).

pub mod json_store;

pub use json_store::JsonFileStore;
