//! Interaktions- und Render-Fassade über dem Ferguson-Patch.
//!
//! Der Canvas besitzt den Patch, den Viewport und den flachen Vertex-Buffer.
//! Pointer-Events kommen in Screen-Pixeln an, werden in Welt-Koordinaten
//! gemappt und an den Patch weitergereicht; nach jeder Geometrie-Änderung
//! wird nur der betroffene Buffer-Block neu geschrieben und als
//! [`DirtyRange`] gemeldet. Ein externer Rasterizer konsumiert
//! [`vertices`](PatchCanvas::vertices) plus [`draw_commands`](PatchCanvas::draw_commands).

use anyhow::Result;
use glam::Vec2;

use crate::core::{FergusonPatch, HermiteCurve, ViewVolume, Viewport};
use crate::shared::options::EditorOptions;
use crate::shared::{DirtyRange, DrawCommand, PatchVertex, PrimitiveKind};

/// Aggregiert Patch, Viewport und Vertex-Buffer zu einer Session.
#[derive(Debug, Clone)]
pub struct PatchCanvas {
    patch: FergusonPatch,
    viewport: Viewport,
    options: EditorOptions,
    /// Flacher Punkt-Buffer im festen Block-Layout (h0‖h1‖h2‖h3‖Probe)
    vertices: Vec<PatchVertex>,
    /// Seit dem letzten Abholen geänderte Bereiche
    dirty: Vec<DirtyRange>,
}

impl PatchCanvas {
    /// Erstellt eine Session mit dem Standard-Kontrollnetz:
    /// Ecken bei ±0.75, kleine achsenparallele Rand-Tangenten.
    pub fn new(options: EditorOptions, viewport_size: Vec2) -> Result<Self> {
        let p0 = Vec2::new(-0.75, 0.75);
        let p1 = Vec2::new(0.75, 0.75);
        let p2 = Vec2::new(-0.75, -0.75);
        let p3 = Vec2::new(0.75, -0.75);

        let t01 = Vec2::new(0.05, 0.0);
        let t02 = Vec2::new(0.0, -0.05);
        let t10 = Vec2::new(-0.05, 0.0);
        let t13 = Vec2::new(0.0, -0.05);
        let t20 = Vec2::new(0.0, 0.05);
        let t23 = Vec2::new(0.05, 0.0);
        let t31 = Vec2::new(0.0, 0.05);
        let t32 = Vec2::new(-0.05, 0.0);

        let block = options.curve_resolution as usize
            + 4
            + 4 * (options.handle_segments as usize + 1);

        let curve = |p0, t0, p1, t1, index: usize| {
            HermiteCurve::new(
                p0,
                t0,
                p1,
                t1,
                options.curve_resolution,
                index * block,
                options.tangent_scale,
                options.handle_radius,
                options.handle_segments,
            )
        };

        let patch = FergusonPatch::new(
            [
                curve(p0, t01, p1, t10, 0)?,
                curve(p1, t13, p3, t31, 1)?,
                curve(p2, t23, p3, t32, 2)?,
                curve(p0, t02, p2, t20, 3)?,
            ],
            options.patch_resolution,
            options.probe_marker_radius,
            options.probe_marker_segments,
        )?;

        Self::from_parts(patch, options, viewport_size)
    }

    /// Erstellt eine Session über einem vorgebauten Patch.
    ///
    /// Der Aufrufer ist für das geschlossene Viereck und konsistente
    /// `start_index`-Offsets der Kurven verantwortlich.
    pub fn from_parts(
        mut patch: FergusonPatch,
        options: EditorOptions,
        viewport_size: Vec2,
    ) -> Result<Self> {
        let [l, r, b, t, n, f] = options.view_volume;
        let viewport = Viewport::new(viewport_size, ViewVolume::new(l, r, b, t, n, f)?)?;

        let total = patch.total_point_count();
        let mut vertices = vec![PatchVertex { position: [0.0; 2] }; total];

        let boundaries = patch.sample_boundaries();
        write_floats(&mut vertices, 0, &boundaries);
        let (u, v) = patch.last_probe();
        let probe = patch.probe(u, v);
        write_floats(&mut vertices, patch.probe_start_index(), &probe);

        log::debug!(
            "PatchCanvas: Buffer mit {} Punkten aufgebaut, Viewport {}x{}",
            total,
            viewport_size.x,
            viewport_size.y
        );

        Ok(Self {
            patch,
            viewport,
            options,
            vertices,
            dirty: vec![DirtyRange {
                first: 0,
                count: total,
            }],
        })
    }

    /// Der Patch (lesend, z.B. für Probe-Auswertungen ohne Rendering).
    pub fn patch(&self) -> &FergusonPatch {
        &self.patch
    }

    /// Der Viewport (lesend).
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Die Session-Optionen.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Der komplette Vertex-Buffer (GPU-uploadbar über `bytemuck`).
    pub fn vertices(&self) -> &[PatchVertex] {
        &self.vertices
    }

    /// Holt die seit dem letzten Aufruf geänderten Buffer-Bereiche ab.
    pub fn take_dirty_ranges(&mut self) -> Vec<DirtyRange> {
        std::mem::take(&mut self.dirty)
    }

    /// Passt die Viewport-Größe an (Fenster-Resize).
    pub fn resize(&mut self, viewport_size: Vec2) -> Result<()> {
        self.viewport.resize(viewport_size)
    }

    /// Pointer-Press in Screen-Pixeln.
    pub fn pointer_press(&mut self, screen: Vec2) {
        let world = self.viewport.screen_to_world(screen);
        self.patch.on_press(world);
    }

    /// Pointer-Move in Screen-Pixeln.
    ///
    /// Schreibt bei einer Geometrie-Änderung nur den Block der bewegten Kurve
    /// neu und re-probt den inneren Punkt am gespeicherten `(u,v)`, damit die
    /// Querschnitte zur verschobenen Randkurve konsistent bleiben.
    pub fn pointer_move(&mut self, screen: Vec2) {
        let world = self.viewport.screen_to_world(screen);
        let Some(index) = self.patch.on_move(world) else {
            return;
        };

        let curve = self.patch.curve(index);
        let first = curve.start_index();
        let samples = curve.sample();
        self.write_block(first, &samples);

        let (u, v) = self.patch.last_probe();
        self.reprobe(u, v);
    }

    /// Pointer-Release in Screen-Pixeln: beendet die Geste.
    pub fn pointer_release(&mut self, _screen: Vec2) {
        self.patch.on_release();
    }

    /// Programmatische Probe-Anfrage (Spinbox-Pfad): interpoliert `(u,v)`
    /// und blendet die Probe-Geometrie ein.
    pub fn set_probe(&mut self, u: f32, v: f32) {
        self.reprobe(u, v);
        self.patch.set_probe_visible(true);
    }

    /// Blendet die Probe-Geometrie aus (Checkbox-Pfad).
    pub fn hide_probe(&mut self) {
        self.patch.set_probe_visible(false);
    }

    /// Blendet Handles/Tangenten ein oder aus.
    /// Ausgeblendete Handles deaktivieren auch die Drag-Interaktion.
    pub fn set_handles_visible(&mut self, visible: bool) {
        self.patch.set_handles_visible(visible);
    }

    /// Draw-Befehle über den aktuellen Buffer, Sichtbarkeits-Flags respektiert.
    ///
    /// Reihenfolge: pro Kurve Linienzug, dann (falls sichtbar) Tangentenlinien
    /// und vier Handle-Fans; zuletzt (falls sichtbar) die Probe-Querschnitte
    /// und der Marker-Fan.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::new();

        for curve in self.patch.curves() {
            let start = curve.start_index();
            let resolution = curve.resolution() as usize;
            commands.push(DrawCommand {
                kind: PrimitiveKind::LineStrip,
                first: start,
                count: resolution,
                color: self.options.curve_color,
            });

            if self.patch.handles_visible() {
                commands.push(DrawCommand {
                    kind: PrimitiveKind::Lines,
                    first: curve.start_tangent_index(),
                    count: 4,
                    color: self.options.tangent_color,
                });
                let fan_len = curve.handle_segments() as usize + 1;
                for k in 0..4 {
                    commands.push(DrawCommand {
                        kind: PrimitiveKind::TriangleFan,
                        first: start + resolution + 4 + k * fan_len,
                        count: fan_len,
                        color: self.options.handle_color,
                    });
                }
            }
        }

        if self.patch.probe_visible() {
            let probe_start = self.patch.probe_start_index();
            let resolution = self.patch.resolution() as usize;
            for strip in 0..2 {
                commands.push(DrawCommand {
                    kind: PrimitiveKind::LineStrip,
                    first: probe_start + strip * resolution,
                    count: resolution,
                    color: self.options.probe_color,
                });
            }
            commands.push(DrawCommand {
                kind: PrimitiveKind::TriangleFan,
                first: probe_start + 2 * resolution,
                count: self.patch.probe_marker_segments() as usize + 1,
                color: self.options.probe_color,
            });
        }

        commands
    }

    /// Interpoliert `(u,v)` neu und schreibt den Probe-Block.
    fn reprobe(&mut self, u: f32, v: f32) {
        let probe = self.patch.probe(u, v);
        let first = self.patch.probe_start_index();
        self.write_block(first, &probe);
    }

    /// Schreibt einen Block in den Buffer und meldet den Bereich als geändert.
    fn write_block(&mut self, first: usize, floats: &[f32]) {
        write_floats(&mut self.vertices, first, floats);
        self.dirty.push(DirtyRange {
            first,
            count: floats.len() / 2,
        });
    }
}

/// Schreibt eine flache Float-Folge (x,y-Paare) ab Punkt-Offset `first`.
fn write_floats(vertices: &mut [PatchVertex], first: usize, floats: &[f32]) {
    for (i, pair) in floats.chunks_exact(2).enumerate() {
        vertices[first + i].position = [pair[0], pair[1]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn canvas() -> PatchCanvas {
        PatchCanvas::new(EditorOptions::default(), Vec2::new(800.0, 600.0)).unwrap()
    }

    #[test]
    fn test_initial_buffer_layout() {
        let mut canvas = canvas();
        // 4 Blöcke à 58 Punkte + Probe-Block à 31 Punkte
        assert_eq!(canvas.vertices().len(), 263);
        let dirty = canvas.take_dirty_ranges();
        assert_eq!(dirty, vec![DirtyRange { first: 0, count: 263 }]);
        assert!(canvas.take_dirty_ranges().is_empty());
    }

    #[test]
    fn test_draw_commands_full_visibility() {
        let mut canvas = canvas();
        canvas.set_probe(0.5, 0.5);
        let commands = canvas.draw_commands();
        // Pro Kurve: 1 Strip + 1 Lines + 4 Fans; Probe: 2 Strips + 1 Fan
        assert_eq!(commands.len(), 4 * 6 + 3);

        let strips = commands
            .iter()
            .filter(|c| c.kind == PrimitiveKind::LineStrip)
            .count();
        assert_eq!(strips, 6);

        // Erster Fan von h0 sitzt direkt hinter Kurve + Tangentenlinien
        let fan = commands
            .iter()
            .find(|c| c.kind == PrimitiveKind::TriangleFan)
            .unwrap();
        assert_eq!(fan.first, 14);
        assert_eq!(fan.count, 11);
    }

    #[test]
    fn test_hidden_handles_reduce_draw_set() {
        let mut canvas = canvas();
        canvas.set_handles_visible(false);
        let commands = canvas.draw_commands();
        // Nur noch die vier Kurven-Strips
        assert_eq!(commands.len(), 4);
        assert!(commands.iter().all(|c| c.kind == PrimitiveKind::LineStrip));
    }

    #[test]
    fn test_probe_hidden_by_default() {
        let canvas = canvas();
        assert_eq!(canvas.draw_commands().len(), 4 * 6);
    }

    #[test]
    fn test_drag_roundtrip_through_screen_space() {
        let mut canvas = canvas();
        let p0 = canvas.patch().curve(0).p0();
        let screen = canvas.viewport().world_to_screen(p0);

        canvas.pointer_press(screen);
        assert!(canvas.patch().has_selection());

        let target_world = p0 + Vec2::new(0.3, -0.2);
        let target_screen = canvas.viewport().world_to_screen(target_world);
        canvas.pointer_move(target_screen);
        canvas.pointer_release(target_screen);

        let moved = canvas.patch().curve(0).p0();
        assert_relative_eq!(moved.x, target_world.x, epsilon = 1e-3);
        assert_relative_eq!(moved.y, target_world.y, epsilon = 1e-3);
        assert!(!canvas.patch().has_selection());
    }

    #[test]
    fn test_move_marks_curve_and_probe_dirty() {
        let mut canvas = canvas();
        canvas.take_dirty_ranges();

        let p3 = canvas.patch().curve(2).p1();
        let screen = canvas.viewport().world_to_screen(p3);
        canvas.pointer_press(screen);
        // h1.p1 teilt die Ecke p3 — irgendeine der beiden Kurven greift
        assert_eq!(canvas.patch().selected_count(), 1);

        let target = canvas
            .viewport()
            .world_to_screen(p3 + Vec2::new(0.1, 0.1));
        canvas.pointer_move(target);

        let dirty = canvas.take_dirty_ranges();
        assert_eq!(dirty.len(), 2);
        // Kurven-Block à 58 Punkte plus Probe-Block à 31 Punkte
        assert_eq!(dirty[0].count, 58);
        assert_eq!(dirty[1], DirtyRange { first: 232, count: 31 });
    }

    #[test]
    fn test_moved_curve_block_matches_resample() {
        let mut canvas = canvas();
        let p0 = canvas.patch().curve(0).p0();
        let screen = canvas.viewport().world_to_screen(p0);
        canvas.pointer_press(screen);
        canvas.pointer_move(canvas.viewport().world_to_screen(Vec2::new(-0.5, 0.5)));
        canvas.pointer_release(screen);

        let curve = canvas.patch().curve(0);
        let expected = curve.sample();
        let start = curve.start_index();
        for (i, pair) in expected.chunks_exact(2).enumerate() {
            assert_relative_eq!(canvas.vertices()[start + i].position[0], pair[0]);
            assert_relative_eq!(canvas.vertices()[start + i].position[1], pair[1]);
        }
    }

    #[test]
    fn test_move_without_press_changes_nothing() {
        let mut canvas = canvas();
        canvas.take_dirty_ranges();
        canvas.pointer_move(Vec2::new(400.0, 300.0));
        assert!(canvas.take_dirty_ranges().is_empty());
    }

    #[test]
    fn test_set_probe_updates_marker() {
        let mut canvas = canvas();
        canvas.take_dirty_ranges();
        canvas.set_probe(0.25, 0.75);

        assert_eq!(canvas.patch().last_probe(), (0.25, 0.75));
        let dirty = canvas.take_dirty_ranges();
        assert_eq!(dirty, vec![DirtyRange { first: 232, count: 31 }]);

        // Marker-Zentrum im Buffer = S(0.25, 0.75)
        let centre = canvas.patch().surface_point(0.25, 0.75);
        let marker = canvas.vertices()[232 + 2 * 10].position;
        assert_relative_eq!(marker[0], centre.x, epsilon = 1e-6);
        assert_relative_eq!(marker[1], centre.y, epsilon = 1e-6);

        canvas.hide_probe();
        assert!(!canvas.patch().probe_visible());
    }

    #[test]
    fn test_hidden_handles_block_gesture() {
        let mut canvas = canvas();
        canvas.set_handles_visible(false);
        let p0 = canvas.patch().curve(0).p0();
        canvas.pointer_press(canvas.viewport().world_to_screen(p0));
        assert!(!canvas.patch().has_selection());
    }

    #[test]
    fn test_rejects_degenerate_view_volume() {
        let mut options = EditorOptions::default();
        options.view_volume = [1.0, 1.0, -1.0, 1.0, -1.0, 1.0];
        assert!(PatchCanvas::new(options, Vec2::new(800.0, 600.0)).is_err());
    }
}
