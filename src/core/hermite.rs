//! Kubische Hermite-Randkurve mit vier draggbaren Handles.
//!
//! Eine Kurve besitzt zwei Endpunkte und zwei Tangentenvektoren sowie je ein
//! [`HandleCircle`] pro Kontrollgröße. Die Kurve schreibt ihre Geometrie in
//! einen festen Block des geteilten Vertex-Buffers; `start_index` und
//! `start_tangent_index` adressieren diesen Block in Punkten.

use anyhow::{bail, Result};
use glam::Vec2;

use super::circle::HandleCircle;

/// Kubische Hermite-Kurve als Rand eines Ferguson-Patches.
///
/// Handle-Zentren bleiben nach jeder Mutation synchron zu
/// `{p0, p1, p0+t0, p1+t1}` — kein Handle darf stillschweigend von den
/// Kontrolldaten abweichen.
#[derive(Debug, Clone)]
pub struct HermiteCurve {
    /// Startpunkt
    p0: Vec2,
    /// Tangente am Startpunkt
    t0: Vec2,
    /// Endpunkt
    p1: Vec2,
    /// Tangente am Endpunkt
    t1: Vec2,

    /// Anzahl der Kurven-Abtastpunkte (≥ 2)
    resolution: u32,
    /// Skalierung der Tangenten in der Basis-Auswertung
    tangent_scale: f32,

    /// Punkt-Offset des Kurven-Blocks im geteilten Buffer
    start_index: usize,
    /// Punkt-Offset der Tangentenlinien (= `start_index + resolution`)
    start_tangent_index: usize,

    /// Handle für p0
    cp0: HandleCircle,
    /// Handle für p0 + t0
    ct0: HandleCircle,
    /// Handle für p1
    cp1: HandleCircle,
    /// Handle für p1 + t1
    ct1: HandleCircle,
}

impl HermiteCurve {
    /// Erstellt eine Randkurve mit vier Handles.
    ///
    /// `start_index` ist der Punkt-Offset des Kurven-Blocks im geteilten
    /// Vertex-Buffer. Auflösungen unter 2 sind abgelehnt, da die Schrittweite
    /// `1/(resolution−1)` sonst undefiniert ist.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p0: Vec2,
        t0: Vec2,
        p1: Vec2,
        t1: Vec2,
        resolution: u32,
        start_index: usize,
        tangent_scale: f32,
        handle_radius: f32,
        handle_segments: u32,
    ) -> Result<Self> {
        if resolution < 2 {
            bail!("Kurven-Auflösung muss mindestens 2 sein, bekam {}", resolution);
        }
        Ok(Self {
            p0,
            t0,
            p1,
            t1,
            resolution,
            tangent_scale,
            start_index,
            start_tangent_index: start_index + resolution as usize,
            cp0: HandleCircle::new(p0, handle_radius, handle_segments)?,
            ct0: HandleCircle::new(p0 + t0, handle_radius, handle_segments)?,
            cp1: HandleCircle::new(p1, handle_radius, handle_segments)?,
            ct1: HandleCircle::new(p1 + t1, handle_radius, handle_segments)?,
        })
    }

    /// Startpunkt.
    pub fn p0(&self) -> Vec2 {
        self.p0
    }

    /// Tangente am Startpunkt (unskaliert).
    pub fn t0(&self) -> Vec2 {
        self.t0
    }

    /// Endpunkt.
    pub fn p1(&self) -> Vec2 {
        self.p1
    }

    /// Tangente am Endpunkt (unskaliert).
    pub fn t1(&self) -> Vec2 {
        self.t1
    }

    /// Start-Tangente mit `tangent_scale` skaliert (geht in die Flächen-Blends ein).
    pub fn scaled_t0(&self) -> Vec2 {
        self.tangent_scale * self.t0
    }

    /// End-Tangente mit `tangent_scale` skaliert.
    pub fn scaled_t1(&self) -> Vec2 {
        self.tangent_scale * self.t1
    }

    /// Anzahl der Kurven-Abtastpunkte.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Punkt-Offset des Kurven-Blocks im geteilten Buffer.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Punkt-Offset der Tangentenlinien.
    pub fn start_tangent_index(&self) -> usize {
        self.start_tangent_index
    }

    /// Anzahl der Rand-Punkte eines Handle-Fans.
    pub fn handle_segments(&self) -> u32 {
        self.cp0.segments()
    }

    /// Gesamtlänge des Kurven-Blocks in Punkten:
    /// Kurve + 4 Tangenten-Endpunkte + 4 Handle-Fans.
    pub fn point_count(&self) -> usize {
        self.resolution as usize + 4 + 4 * self.cp0.point_count()
    }

    // Hermite-Basis, ausgewertet über vorberechnete Potenzen von u.
    fn b0(u3: f32, u2: f32, _u1: f32) -> f32 {
        2.0 * u3 - 3.0 * u2 + 1.0
    }

    fn b1(u3: f32, u2: f32, _u1: f32) -> f32 {
        -2.0 * u3 + 3.0 * u2
    }

    fn b2(u3: f32, u2: f32, u1: f32) -> f32 {
        u3 - 2.0 * u2 + u1
    }

    fn b3(u3: f32, u2: f32, _u1: f32) -> f32 {
        u3 - u2
    }

    /// Wertet die Kurve am Parameter `u` aus.
    ///
    /// `C(u) = b0·p0 + b1·p1 + b2·(s·t0) + b3·(s·t1)` mit Tangenten-Skalierung `s`.
    pub fn evaluate(&self, u: f32) -> Vec2 {
        let u2 = u * u;
        let u3 = u2 * u;
        Self::b0(u3, u2, u) * self.p0
            + Self::b1(u3, u2, u) * self.p1
            + Self::b2(u3, u2, u) * (self.tangent_scale * self.t0)
            + Self::b3(u3, u2, u) * (self.tangent_scale * self.t1)
    }

    /// Tastet den kompletten Kurven-Block als flache Float-Folge ab.
    ///
    /// Layout (in Punkten, Vertrag mit dem Renderer):
    /// 1. `resolution` Kurvenpunkte, Schrittweite `1/(resolution−1)`
    /// 2. 4 Tangentenlinien-Endpunkte: p0, p0+t0, p1, p1+t1
    /// 3. 4 Handle-Fans in der Reihenfolge p0, t0, p1, t1
    pub fn sample(&self) -> Vec<f32> {
        let mut vertices = Vec::with_capacity(self.point_count() * 2);
        let step = 1.0 / (self.resolution - 1) as f32;

        for i in 0..self.resolution {
            let p = self.evaluate(step * i as f32);
            vertices.push(p.x);
            vertices.push(p.y);
        }

        for p in [self.p0, self.p0 + self.t0, self.p1, self.p1 + self.t1] {
            vertices.push(p.x);
            vertices.push(p.y);
        }

        for handle in [&self.cp0, &self.ct0, &self.cp1, &self.ct1] {
            for p in handle.outline_points() {
                vertices.push(p.x);
                vertices.push(p.y);
            }
        }

        vertices
    }

    /// Pointer-Press in Welt-Koordinaten.
    ///
    /// Testet die Handles in Prioritätsreihenfolge p0, t0, p1, t1 und
    /// selektiert den ersten Treffer. Gibt zurück, ob ein Handle gegriffen wurde.
    /// Solange bereits ein Handle gegriffen ist, greift kein zweites.
    pub fn on_press(&mut self, pos: Vec2) -> bool {
        if self.has_selection() {
            return false;
        }
        if self.cp0.contains(pos) {
            self.cp0.select();
        } else if self.ct0.contains(pos) {
            self.ct0.select();
        } else if self.cp1.contains(pos) {
            self.cp1.select();
        } else if self.ct1.contains(pos) {
            self.ct1.select();
        } else {
            return false;
        }
        true
    }

    /// Pointer-Move in Welt-Koordinaten.
    ///
    /// Ein gegriffener Endpunkt nimmt seinen Tangentenvektor mit (das
    /// Tangenten-Handle wandert auf `p + t`); ein gegriffenes Tangenten-Handle
    /// setzt `t = pos − Endpunkt` und verschiebt nur sich selbst.
    /// Gibt zurück, ob sich die Geometrie geändert hat.
    pub fn on_move(&mut self, pos: Vec2) -> bool {
        if self.cp0.is_selected() {
            self.p0 = pos;
            self.cp0.set_centre(pos);
            self.ct0.set_centre(self.p0 + self.t0);
        } else if self.cp1.is_selected() {
            self.p1 = pos;
            self.cp1.set_centre(pos);
            self.ct1.set_centre(self.p1 + self.t1);
        } else if self.ct0.is_selected() {
            self.t0 = pos - self.p0;
            self.ct0.set_centre(pos);
        } else if self.ct1.is_selected() {
            self.t1 = pos - self.p1;
            self.ct1.set_centre(pos);
        } else {
            return false;
        }
        true
    }

    /// Pointer-Release: hebt alle Selektionen auf (idempotent).
    pub fn on_release(&mut self) {
        self.cp0.unselect();
        self.ct0.unselect();
        self.cp1.unselect();
        self.ct1.unselect();
    }

    /// Ist irgendein Handle dieser Kurve gegriffen?
    pub fn has_selection(&self) -> bool {
        self.cp0.is_selected()
            || self.ct0.is_selected()
            || self.cp1.is_selected()
            || self.ct1.is_selected()
    }

    /// Anzahl der selektierten Handles (für Exklusivitäts-Prüfungen).
    pub fn selected_count(&self) -> usize {
        [&self.cp0, &self.ct0, &self.cp1, &self.ct1]
            .iter()
            .filter(|c| c.is_selected())
            .count()
    }
}
