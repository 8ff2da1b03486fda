//!
//! # flot_paths
//!
//! `flot_paths` is the model behind the flot vector path editor: a catalog of drawing instructions
//! with typed arguments, paths built from those instructions, and the compact flat encoding that
//! paths are persisted in.
//!
//! The `InstructionCatalog` describes every instruction the editor knows about. Each definition is
//! given a numeric identifier when it is registered, and that identifier is the only thing about an
//! instruction that is written out when a path is saved: `Path::encode()` produces the identifier of
//! each instruction followed by its argument values, and `PathDecoder` uses the catalog to split the
//! values back up into instructions.
//!
//! Argument writes are validated against the catalog. A write that doesn't fit is rejected and the
//! previous value is kept, so a path is always in a state that can be rendered. Paths are rendered
//! by replaying them against anything that implements `DrawingSurface`: `Vec<Draw>` records the
//! operations, and `flot_render_raster` renders them to a bitmap.
//!
//! ```
//! # use flot_paths::*;
//! # use std::sync::*;
//! let catalog     = Arc::new(InstructionCatalog::standard());
//! let mut path    = Path::new(PathId(0));
//!
//! let mut move_to = catalog.create_instruction("moveTo").unwrap();
//! move_to.set("x", 10.into());
//! move_to.set("y", 20.into());
//!
//! let mut fill    = catalog.create_instruction("fill").unwrap();
//! fill.set("color", "#ff0000".into());
//!
//! path.append(move_to).append(fill);
//!
//! let encoded = path.encode();
//! assert!(serde_json::to_string(&encoded).unwrap() == "[0,10,20,9,\"#ff0000\"]");
//! assert!(Path::decode(PathId(0), &catalog, &encoded).unwrap() == path);
//! ```
//!
#![warn(bare_trait_objects)]

#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

mod arg;
mod draw;
mod path;
mod color;
mod config;
mod catalog;
mod context;
mod storage;
mod encoding;
mod decoding;
mod transform;
mod collection;
mod instruction;

pub use self::arg::*;
pub use self::draw::*;
pub use self::path::*;
pub use self::color::*;
pub use self::config::*;
pub use self::catalog::*;
pub use self::context::*;
pub use self::storage::*;
pub use self::encoding::*;
pub use self::decoding::*;
pub use self::transform::*;
pub use self::collection::*;
pub use self::instruction::*;
