pub mod render;
pub mod service;
