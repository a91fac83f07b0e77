//! # playground-rs
//!
//! Core library for a live code playground: the user edits an HTML
//! fragment, a CSS fragment, and a JavaScript or TypeScript source, and
//! a sandboxed preview is rebuilt from them continuously.
//!
//! This crate holds everything that does not need a browser:
//! - **Session state**: the record of the three sources plus the style
//!   augmentation mode and the typed-script flag.
//! - **Document assembly**: the pure function that turns a session and
//!   an executable script into the complete preview HTML document.
//! - **Share-token codec**: a compact binary encoding of the session,
//!   DEFLATE-compressed and rendered as URL-safe text, so a whole
//!   editing session fits in a query string.
//! - **Scheduling primitives**: the build-generation counter and the
//!   compiler-readiness gate used by the UI's debounced rebuild loop.
//!
//! ## Example
//!
//! ```
//! use playground_rs::{decode, encode, Session};
//!
//! let session = Session::default();
//! let token = encode(&session);
//! assert_eq!(decode(&token).unwrap(), session);
//! ```

pub mod codec;
pub mod document;
pub mod error;
pub mod schedule;
pub mod session;
pub mod wire;

pub use codec::{decode, encode};
pub use document::{assemble, augmentation_snippet};
pub use error::CodecError;
pub use schedule::{BuildCounter, BuildTicket, QUIESCENCE_MS, ReadyFlag, can_build};
pub use session::{Session, StyleAugmentation};
