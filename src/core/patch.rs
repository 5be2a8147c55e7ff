//! Bikubischer Ferguson-Patch aus vier Hermite-Randkurven.
//!
//! Der Patch liest Ecken und Rand-Tangenten live von seinen Kurven (kein
//! dupliziertes Ecken-State) und blendet sie zu einer Flächen-Auswertung
//! `S(u,v)`. Zusätzlich verwaltet er den Probe-Punkt: zwei
//! Querschnitts-Polylinien plus Marker am interpolierten inneren Punkt.

use anyhow::{bail, Result};
use glam::Vec2;

use super::circle::HandleCircle;
use super::hermite::HermiteCurve;

/// Ferguson-Patch mit vier Randkurven h0..h3.
///
/// Die Kurven bilden ein geschlossenes Viereck; der Aufrufer stellt die
/// Ecken-Verträge her (`h0.p0==h3.p0`, `h0.p1==h1.p0`, `h2.p0==h3.p1`,
/// `h2.p1==h1.p1`). Der Patch repariert ein aufgerissenes Viereck nicht.
#[derive(Debug, Clone)]
pub struct FergusonPatch {
    curves: [HermiteCurve; 4],
    /// Abtastpunkte pro Querschnitts-Polylinie (≥ 2)
    resolution: u32,

    /// Zuletzt angefragter Probe-Parameter u
    last_u: f32,
    /// Zuletzt angefragter Probe-Parameter v
    last_v: f32,
    /// Marker-Kreis am interpolierten inneren Punkt
    probe_marker: HandleCircle,

    /// Handles und Tangentenlinien zeichnen? (gated auch die Drag-Interaktion)
    show_handles: bool,
    /// Probe-Querschnitte und Marker zeichnen?
    show_probe: bool,
}

impl FergusonPatch {
    /// Erstellt einen Patch aus vier Randkurven.
    ///
    /// `resolution` bestimmt die Abtastung der Probe-Querschnitte;
    /// der Marker wird am jeweils letzten `(u,v)` platziert.
    pub fn new(
        curves: [HermiteCurve; 4],
        resolution: u32,
        probe_marker_radius: f32,
        probe_marker_segments: u32,
    ) -> Result<Self> {
        if resolution < 2 {
            bail!("Patch-Auflösung muss mindestens 2 sein, bekam {}", resolution);
        }
        let patch = Self {
            curves,
            resolution,
            last_u: 0.5,
            last_v: 0.5,
            probe_marker: HandleCircle::new(Vec2::ZERO, probe_marker_radius, probe_marker_segments)?,
            show_handles: true,
            show_probe: false,
        };
        log::debug!(
            "FergusonPatch: Kurven-Blöcke bei {:?}, Probe-Block bei {}",
            patch.curves.iter().map(HermiteCurve::start_index).collect::<Vec<_>>(),
            patch.probe_start_index()
        );
        Ok(patch)
    }

    /// Die vier Randkurven in fester Reihenfolge h0..h3.
    pub fn curves(&self) -> &[HermiteCurve; 4] {
        &self.curves
    }

    /// Eine einzelne Randkurve.
    pub fn curve(&self, index: usize) -> &HermiteCurve {
        &self.curves[index]
    }

    /// Abtastpunkte pro Probe-Querschnitt.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Zuletzt angefragtes Probe-Parameterpaar.
    pub fn last_probe(&self) -> (f32, f32) {
        (self.last_u, self.last_v)
    }

    /// Punkt-Offset des Probe-Blocks: direkt hinter den vier Kurven-Blöcken.
    pub fn probe_start_index(&self) -> usize {
        self.curves.iter().map(HermiteCurve::point_count).sum()
    }

    /// Länge des Probe-Blocks in Punkten: zwei Polylinien + Marker-Fan.
    pub fn probe_point_count(&self) -> usize {
        2 * self.resolution as usize + self.probe_marker.point_count()
    }

    /// Gesamtlänge des Vertex-Buffers in Punkten.
    pub fn total_point_count(&self) -> usize {
        self.probe_start_index() + self.probe_point_count()
    }

    // Patch-lokale Basis-Anordnung — bewusst anders nummeriert als die
    // Kurven-Basis; die Kreuzterme in `surface_point` hängen an genau
    // dieser Zuordnung.
    fn pb0(u3: f32, u2: f32, _u1: f32) -> f32 {
        2.0 * u3 - 3.0 * u2 + 1.0
    }

    fn pb1(u3: f32, u2: f32, u1: f32) -> f32 {
        u3 - 2.0 * u2 + u1
    }

    fn pb2(u3: f32, u2: f32, _u1: f32) -> f32 {
        u3 - u2
    }

    fn pb3(u3: f32, u2: f32, _u1: f32) -> f32 {
        -2.0 * u3 + 3.0 * u2
    }

    /// Wertet die geblendete Fläche `S(u,v)` aus.
    ///
    /// Ecken werden live von den Kurven gelesen (`p0=h0.p0`, `p1=h0.p1`,
    /// `p2=h2.p0`, `p3=h2.p1`); jede Kurve steuert ihre skalierte
    /// Start-Tangente und die Negation ihrer End-Tangente bei, weil eine
    /// geteilte Kante von den beiden Nachbarkurven gegenläufig durchlaufen
    /// wird. Parameter außerhalb `[0,1]` extrapolieren das Polynom und liefern
    /// Punkte außerhalb der sichtbaren Patch-Region.
    pub fn surface_point(&self, u: f32, v: f32) -> Vec2 {
        let u2 = u * u;
        let u3 = u2 * u;
        let v2 = v * v;
        let v3 = v2 * v;

        let [h0, h1, h2, h3] = &self.curves;

        let p0 = h0.p0();
        let p1 = h0.p1();
        let p2 = h2.p0();
        let p3 = h2.p1();

        let t01 = h0.scaled_t0();
        let t10 = -h0.scaled_t1();
        let t13 = h1.scaled_t0();
        let t31 = -h1.scaled_t1();
        let t23 = h2.scaled_t0();
        let t32 = -h2.scaled_t1();
        let t02 = h3.scaled_t0();
        let t20 = -h3.scaled_t1();

        let bu0 = Self::pb0(u3, u2, u);
        let bu1 = Self::pb1(u3, u2, u);
        let bu2 = Self::pb2(u3, u2, u);
        let bu3 = Self::pb3(u3, u2, u);

        Self::pb0(v3, v2, v) * (bu0 * p0 + bu1 * t02 + bu2 * t20 + bu3 * p2)
            + Self::pb1(v3, v2, v) * (bu0 * t01 + bu3 * t23)
            + Self::pb2(v3, v2, v) * (bu0 * t10 + bu3 * t32)
            + Self::pb3(v3, v2, v) * (bu0 * p1 + bu1 * t13 + bu2 * t31 + bu3 * p3)
    }

    /// Interpoliert den inneren Punkt `(u,v)` und liefert die Probe-Geometrie.
    ///
    /// Layout (in Punkten): `resolution` Punkte bei festem u über v gesweept,
    /// dann `resolution` Punkte bei festem v über u gesweept, dann der
    /// Marker-Fan an `S(u,v)`. Das Parameterpaar wird für spätere Re-Probes
    /// nach Handle-Drags gespeichert.
    pub fn probe(&mut self, u: f32, v: f32) -> Vec<f32> {
        self.last_u = u;
        self.last_v = v;

        let mut vertices = Vec::with_capacity(self.probe_point_count() * 2);
        let step = 1.0 / (self.resolution - 1) as f32;

        for i in 0..self.resolution {
            let p = self.surface_point(u, step * i as f32);
            vertices.push(p.x);
            vertices.push(p.y);
        }

        for i in 0..self.resolution {
            let p = self.surface_point(step * i as f32, v);
            vertices.push(p.x);
            vertices.push(p.y);
        }

        self.probe_marker.set_centre(self.surface_point(u, v));
        for p in self.probe_marker.outline_points() {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        vertices
    }

    /// Tastet alle vier Randkurven als einen zusammenhängenden Buffer ab
    /// (Konkatenation h0‖h1‖h2‖h3 im Block-Layout der Kurven).
    pub fn sample_boundaries(&self) -> Vec<f32> {
        let mut vertices = Vec::with_capacity(self.probe_start_index() * 2);
        for curve in &self.curves {
            vertices.extend(curve.sample());
        }
        vertices
    }

    /// Pointer-Press in Welt-Koordinaten.
    ///
    /// Ausgeblendete Handles deaktivieren die Drag-Interaktion komplett.
    /// Der Press stoppt bei der ersten Kurve, die den Treffer nimmt, damit
    /// patch-weit höchstens ein Handle selektiert ist — auch wenn sich an
    /// einer gemeinsamen Ecke die Handles zweier Kurven überlagern.
    pub fn on_press(&mut self, pos: Vec2) {
        if !self.show_handles || self.has_selection() {
            return;
        }
        for curve in &mut self.curves {
            if curve.on_press(pos) {
                break;
            }
        }
    }

    /// Pointer-Move in Welt-Koordinaten.
    ///
    /// Gibt den Index der Kurve zurück, deren Geometrie sich geändert hat,
    /// damit der Aufrufer nur diesen Block (plus Probe) neu hochladen muss.
    pub fn on_move(&mut self, pos: Vec2) -> Option<usize> {
        for (index, curve) in self.curves.iter_mut().enumerate() {
            if curve.has_selection() && curve.on_move(pos) {
                return Some(index);
            }
        }
        None
    }

    /// Pointer-Release: hebt Selektionen aller vier Kurven auf (idempotent).
    pub fn on_release(&mut self) {
        for curve in &mut self.curves {
            curve.on_release();
        }
    }

    /// Ist irgendein Handle des Patches gegriffen?
    pub fn has_selection(&self) -> bool {
        self.curves.iter().any(HermiteCurve::has_selection)
    }

    /// Anzahl der patch-weit selektierten Handles.
    pub fn selected_count(&self) -> usize {
        self.curves.iter().map(HermiteCurve::selected_count).sum()
    }

    /// Blendet Handles und Tangentenlinien ein/aus.
    pub fn set_handles_visible(&mut self, visible: bool) {
        self.show_handles = visible;
    }

    /// Sind Handles (und damit die Drag-Interaktion) aktiv?
    pub fn handles_visible(&self) -> bool {
        self.show_handles
    }

    /// Blendet die Probe-Geometrie ein/aus.
    pub fn set_probe_visible(&mut self, visible: bool) {
        self.show_probe = visible;
    }

    /// Wird die Probe-Geometrie gezeichnet?
    pub fn probe_visible(&self) -> bool {
        self.show_probe
    }

    /// Anzahl der Rand-Punkte des Probe-Markers.
    pub fn probe_marker_segments(&self) -> u32 {
        self.probe_marker.segments()
    }
}
