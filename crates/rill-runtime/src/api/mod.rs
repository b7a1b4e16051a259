//! Embedding API
//!
//! Hosts interact with the interpreter through two surfaces:
//! - `conversion` — bidirectional translation between host-native types
//!   and runtime values
//! - `native` — a builder for registering host closures as callable
//!   native functions

pub mod conversion;
pub mod native;

pub use conversion::{ConversionError, FromValue, ToValue};
pub use native::NativeFunctionBuilder;
