//! HTTP-facing surfaces of the mux.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → service.rs (tower entry point)
//!     → routing layer (lookup + dispatch)
//!     → matched handler, or
//!     → error.rs (classify + render routing failure)
//!
//! Fallback dispatch additionally:
//!     → form.rs (buffer + decode urlencoded body)
//! ```

pub mod error;
pub mod form;
pub mod service;

pub use error::{DispatchError, ErrorRenderer, PlainTextRenderer};
pub use form::FormParams;
pub use service::RouterService;
