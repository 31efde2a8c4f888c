//! xmlnav - Load an XML file and walk its element tree through handles.
//!
//! Documents are owned by a [`Navigator`]. Callers get back copyable
//! [`DocumentHandle`]s and [`NodeHandle`]s that are checked on every call, so
//! a handle kept past [`Navigator::unload`] yields
//! [`NavError::InvalidHandle`] instead of stale data.
//!
//! # Example
//!
//! ```
//! use xmlnav::{LoadOptions, Navigator};
//!
//! let mut nav = Navigator::new();
//! let (doc, root) = nav
//!     .load_str("<suite><scheme>a</scheme><scheme>b</scheme></suite>", &LoadOptions::default())
//!     .unwrap();
//!
//! let mut names = Vec::new();
//! let mut current = nav.find_first(root, "scheme").unwrap();
//! while let Some(node) = current {
//!     names.push(nav.contents(node).unwrap().text);
//!     current = nav.find_next(node, "scheme").unwrap();
//! }
//! assert_eq!(names, ["a", "b"]);
//!
//! nav.unload(doc).unwrap();
//! ```
//!
//! # Architecture
//!
//! - [`navigator`]: document registry and the find/count/contents/attribute operations
//! - [`types`]: handles and the bounded text result
//! - [`config`]: load options and defaults
//! - [`error`]: error types and Result alias
//! - [`source`]: reading and decoding files
//! - [`xml`]: roxmltree helpers and the element arena
//! - [`cli`]: command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod navigator;
pub mod source;
pub mod types;
pub mod xml;

pub use config::{LoadOptions, NameMatching};
pub use error::{NavError, Result};
pub use navigator::Navigator;
pub use types::{BoundedText, DocumentHandle, DocumentId, NodeHandle, NodeIndex};
