//!
//! # flot_render_raster
//!
//! Renders flot paths into bitmaps using `tiny-skia`, and exports them as PNG files.
//!
//! `PixmapSurface` implements `DrawingSurface` so that paths can be replayed straight into a pixmap,
//! converting canvas-style arcs and ellipses into bezier curves as it goes. `export_png()` renders a
//! whole collection at the export size with the origin in the centre of the image:
//!
//! ```
//! # use flot_paths::*;
//! # use flot_render_raster::*;
//! # use std::sync::*;
//! let catalog         = Arc::new(InstructionCatalog::standard());
//! let mut collection  = PathCollection::with_empty_path(Arc::clone(&catalog));
//! let path_id         = collection.active_paths().next().unwrap().id();
//!
//! let mut rect = catalog.create_instruction("rect").unwrap();
//! rect.set("x", (-10).into());
//! rect.set("y", (-10).into());
//! rect.set("width", 20.into());
//! rect.set("height", 20.into());
//!
//! collection.path_mut(path_id).unwrap()
//!     .append(rect)
//!     .append(catalog.create_instruction("fill").unwrap());
//!
//! let settings    = ExportSettings { image_size: 64, ..ExportSettings::default() };
//! let png_data    = export_png(&collection, &settings).unwrap();
//!
//! assert!(&png_data[0..4] == b"\x89PNG");
//! ```
//!
#![warn(bare_trait_objects)]

#[macro_use]
extern crate log;

mod error;
mod export;
mod surface;
mod geometry;

pub use self::error::*;
pub use self::export::*;
pub use self::surface::*;
pub use self::geometry::*;
