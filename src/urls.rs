//! Route templates, reverse lookup, history and the route table.
//!
//! # Examples
//!
//! ```rust
//! use shasta::urls::{ParameterMap, reverse_lookup};
//!
//! let params = ParameterMap::new().with("id", 1).with("name", "leland");
//! assert_eq!(reverse_lookup("some-path/:id(/:name)", &params), "some-path/1/leland");
//! ```

pub use shasta_urls::*;
