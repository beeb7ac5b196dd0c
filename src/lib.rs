#![allow(clippy::needless_doctest_main)]

//! Auto-nulling back-references for the value types of a Windows UI toolkit
//!
//! A [`Referenceable<T>`] wraps a value (a control, a menu item, a dialog
//! field) so that [`Reference<T>`] handles can point at it without owning it.
//! The handles live wherever the caller puts them and never allocate.
//!
//! - When the referent is dropped, every reference to it reads as null.
//! - When the referent's content is relocated to another referent
//!   ([`Referenceable::take_from`], [`relocate!`]), every reference follows.
//!
//! Both referents and attached references must stay in place, which is
//! expressed with [`Pin`](core::pin::Pin): pin them on the stack with
//! [`pin!`](core::pin::pin), inside a pinned parent struct, or with
//! `Box::pin`.
//!
//! # Simple examples
//!
//! ```
//! use backref::{reference, relocate, Referenceable};
//! use std::pin::pin;
//!
//! #[derive(Default)]
//! struct Button {
//!     label: String,
//! }
//!
//! let mut ok = pin!(Referenceable::new(Button { label: "OK".into() }));
//! reference!(let default_button = ok.as_ref());
//! assert!(default_button.points_to(&ok));
//! {
//!     relocate!(let moved = ok.as_mut());
//!     assert!(default_button.points_to(&moved));
//!     let label = unsafe { default_button.value() }.map(|b| b.label.as_str());
//!     assert_eq!(label, Some("OK"));
//! }
//! assert!(default_button.is_null());
//! ```
//!
//! # Note
//! Nothing here is thread-safe. `Referenceable<T>` and `Reference<T>` are
//! neither `Send` nor `Sync`.
//!

mod error;
mod list;
mod macros;
mod reference;
mod referenceable;
mod utility;

pub use error::*;
pub use reference::*;
pub use referenceable::*;
