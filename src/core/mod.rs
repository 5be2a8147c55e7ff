//! Core-Domänentypen: Handles, Hermite-Kurven, Ferguson-Patch, Viewport.

pub mod circle;
pub mod hermite;
pub mod patch;
pub mod viewport;

pub use circle::HandleCircle;
pub use hermite::HermiteCurve;
pub use patch::FergusonPatch;
pub use viewport::{ViewVolume, Viewport};
