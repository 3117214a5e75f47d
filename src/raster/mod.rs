//! CPU raster layer: a mark-batching drawing surface over `vello_cpu`, plus the premultiplied
//! blur and compositing kernels the surface and the region compositor share.

pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod surface;

pub use surface::Surface;
