//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types                    |
//! | `handle` | Reloadable configuration handle              |

mod error;
mod handle;

pub use error::ConfigError;
pub use handle::ConfigHandle;
