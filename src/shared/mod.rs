//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält Typen, die zwischen `core`/`app` und einem externen Rasterizer
//! geteilt werden, um direkte Abhängigkeiten zu vermeiden.

mod draw;
pub mod options;

pub use draw::{DirtyRange, DrawCommand, PatchVertex, PrimitiveKind};
pub use options::EditorOptions;
