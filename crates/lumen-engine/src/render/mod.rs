//! GPU rendering subsystem.
//!
//! A lesson describes what it draws with a [`SceneConfig`]: vertex layout and
//! data, WGSL source, uniform blocks and textures. [`Scene::new`] turns that
//! into GPU resources once; each frame only uniform contents change.
//!
//! Bind group 0 layout, in order:
//! - one uniform buffer per `UniformSpec` (bindings `0..u`)
//! - one 2D texture per `TextureSource` (bindings `u..u+t`)
//! - one filtering sampler at binding `u+t`, when `t > 0`

mod ctx;
mod depth;
mod layout;
mod scene;
mod texture;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use depth::{DepthTarget, DEPTH_FORMAT};
pub use layout::{AttributeKind, VertexLayout};
pub use scene::{Scene, SceneConfig};
pub use texture::{GpuTexture, TextureImage, TextureSource};
pub use uniforms::{UniformHandle, UniformRegistry, UniformSlot, UniformSpec};
