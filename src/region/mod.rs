//! Multi-region stylization: each selection is a rectangle with its own style and blend policy,
//! rendered independently and merged over the source in order.

pub(crate) mod compositor;
pub(crate) mod mask;
pub(crate) mod selection;
pub(crate) mod selector;

pub use compositor::composite_selections;
pub use selection::{
    BlendMode, BlendSpec, DEFAULT_BLEND_RADIUS, MAX_BLEND_RADIUS, NonSelectedAreaMode, Selection,
    blend_preview_rect,
};
pub use selector::{
    MIN_PREVIEW_SIZE, MIN_SELECTION_SIZE, PendingSelection, RegionSelector, SelectorState,
};
