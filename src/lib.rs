//! Ferguson-Patch-Editor.
//! Mathematik- und Interaktionskern als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::PatchCanvas;
pub use core::{FergusonPatch, HandleCircle, HermiteCurve, ViewVolume, Viewport};
pub use shared::{DirtyRange, DrawCommand, EditorOptions, PatchVertex, PrimitiveKind};
