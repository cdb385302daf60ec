//! Domain models for folio.
//!
//! # Core Concepts
//!
//! ## Page layout
//!
//! The animator works on an explicit view state rather than a live document:
//!
//! - [`PageState`]: everything the animator can see or change on the page.
//! - [`Section`]: a scroll target with its measured geometry.
//! - [`NavLink`]: header navigation entry pointing at a section.
//! - [`AnimatedElement`]: element that plays a one-shot [`Entrance`].
//! - [`SkillBar`] and [`RadialBar`]: progress visuals filled on first view.
//!
//! ## Contact submissions
//!
//! These exist only for the duration of one request:
//!
//! - [`ContactForm`]: raw submission, every field optional.
//! - [`ContactMessage`]: validated submission.
//! - [`OutboundMessage`]: the email handed to a mail sender.

mod contact;
mod page;

pub use contact::*;
pub use page::*;
