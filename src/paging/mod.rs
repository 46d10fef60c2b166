//! Client-side pagination over filtered collections, and server-side offset pages.

mod offset;
mod paginator;

pub use offset::OffsetPage;
pub use paginator::{Page, Paginator};
