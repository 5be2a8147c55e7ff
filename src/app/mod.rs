//! Interaktions-Fassade: aggregiert Patch, Viewport und Vertex-Buffer.

pub mod canvas;

pub use canvas::PatchCanvas;
