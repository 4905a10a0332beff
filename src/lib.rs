//! Call a function once and get an `Outcome` back, whatever happens.
//!
//! ```rust
//! use futures_executor::block_on;
//! use tranqui::{tranqui, Error};
//!
//! async fn fetch_user(id: u32) -> Result<String, Error> {
//!     if id == 0 {
//!         return Err(Error::msg("User not found"));
//!     }
//!     Ok(format!("User-{}", id))
//! }
//!
//! let outcome = block_on(tranqui(fetch_user, (7,)));
//! assert!(outcome.is_ok());
//! assert_eq!(outcome.value().map(String::as_str), Some("User-7"));
//!
//! let outcome = block_on(tranqui(fetch_user, (0,)));
//! assert!(outcome.has_error());
//! assert_eq!(outcome.error().unwrap().message(), "User not found");
//! ```

pub use tranqui_core::*;
