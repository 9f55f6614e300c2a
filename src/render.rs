//! Renderers over a frozen document snapshot.
//!
//! Renderers never mutate the document and never fail on authoring
//! mistakes: unresolved references degrade to visible markers and are
//! reported as warnings alongside the output.

/// Markdown rendering.
pub mod markdown;
pub use markdown::{Rendered, RenderWarning};

/// The interactive browser view.
pub mod view;
pub use view::{ViewError, ViewServer};
