//! GPU rendering support.
//!
//! Overlay renderers consume [`overlay::DrawList`](crate::overlay::DrawList)
//! streams and issue wgpu commands; each renderer owns its own pipelines and
//! buffers.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod ctx;
mod rect;
mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use rect::RectRenderer;
pub use text::TextRenderer;
