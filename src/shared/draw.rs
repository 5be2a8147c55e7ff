//! Draw-Vertrag zwischen Canvas und externem Rasterizer.
//!
//! Der Canvas liefert einen flachen Vertex-Buffer plus Draw-Befehle über
//! zusammenhängende Punkt-Bereiche; geänderte Bereiche werden als
//! [`DirtyRange`] gemeldet, damit der Rasterizer partiell hochladen kann.

use bytemuck::{Pod, Zeroable};

/// Primitiv-Typ eines Draw-Befehls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// Zusammenhängender Linienzug (Kurven, Probe-Querschnitte)
    LineStrip,
    /// Einzelne Liniensegmente in Paaren (Tangentenlinien)
    Lines,
    /// Triangle-Fan, erster Punkt ist das Zentrum (Handles, Probe-Marker)
    TriangleFan,
}

/// Ein zusammenhängender Teilbereich des Vertex-Buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Primitiv-Typ
    pub kind: PrimitiveKind,
    /// Erster Punkt (Index in Punkten, nicht Floats)
    pub first: usize,
    /// Anzahl der Punkte
    pub count: usize,
    /// RGBA-Farbe
    pub color: [f32; 4],
}

/// Vertex des geteilten Buffers (direkt GPU-uploadbar).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PatchVertex {
    /// Position im 2D-Raum
    pub position: [f32; 2],
}

/// Vom Canvas gemeldeter geänderter Buffer-Bereich (in Punkten).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRange {
    /// Erster geänderter Punkt
    pub first: usize,
    /// Anzahl der geänderten Punkte
    pub count: usize,
}
