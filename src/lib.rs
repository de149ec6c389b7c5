pub mod classify;
pub mod core;
pub mod deck;
pub mod dictionary;
pub mod tiering;

pub use crate::core::errors::FudagenError;
