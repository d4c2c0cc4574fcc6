//! Scene domain module.
//!
//! - `node`: Renderable nodes (`SceneNode`) and their per-frame animation
//! - `materializer`: Descriptor interpretation (`materialize`)
//! - `session`: The live object group (`SceneSession`)

mod materializer;
mod node;
mod session;

pub use materializer::{materialize, materialize_or_fallback};
pub use node::{Geometry, Material, SceneNode, Transform};
pub use session::{RenderSettings, SceneSession};
