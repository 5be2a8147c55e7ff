//! Kreisförmiges Handle für Hit-Testing und Triangle-Fan-Rendering.

use anyhow::{bail, Result};
use glam::Vec2;

/// Draggbares Kontroll-Handle, dargestellt als kleiner Kreis.
///
/// Dient sowohl als Klickfläche (Hit-Test über quadrierten Abstand) als auch
/// als Geometrie-Quelle für das Triangle-Fan-Rendering des Markers.
#[derive(Debug, Clone)]
pub struct HandleCircle {
    /// Mittelpunkt in Welt-Koordinaten
    centre: Vec2,
    /// Radius in Welt-Einheiten
    radius: f32,
    /// Anzahl der Rand-Punkte des Fans
    segments: u32,
    /// Ist dieses Handle gerade gegriffen?
    selected: bool,
}

impl HandleCircle {
    /// Erstellt ein neues Handle.
    ///
    /// Unter 3 Segmenten entartet der Fan zu einer Linie.
    pub fn new(centre: Vec2, radius: f32, segments: u32) -> Result<Self> {
        if segments < 3 {
            bail!("Handle benötigt mindestens 3 Segmente, bekam {}", segments);
        }
        Ok(Self {
            centre,
            radius,
            segments,
            selected: false,
        })
    }

    /// Mittelpunkt in Welt-Koordinaten.
    pub fn centre(&self) -> Vec2 {
        self.centre
    }

    /// Verschiebt den Mittelpunkt (beim Drag des zugehörigen Kontrollpunkts).
    pub fn set_centre(&mut self, centre: Vec2) {
        self.centre = centre;
    }

    /// Radius in Welt-Einheiten.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Anzahl der Rand-Punkte des Fans.
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Anzahl der Punkte, die [`outline_points`](Self::outline_points) liefert
    /// (Zentrum + Rand).
    pub fn point_count(&self) -> usize {
        self.segments as usize + 1
    }

    /// Hit-Test über quadrierten euklidischen Abstand zum Mittelpunkt.
    pub fn contains(&self, p: Vec2) -> bool {
        (p - self.centre).length_squared() <= self.radius * self.radius
    }

    /// Punkte für das Triangle-Fan-Rendering: zuerst das Zentrum, dann
    /// `segments` Rand-Punkte gegen den Uhrzeigersinn.
    ///
    /// Winkelschritt ist `2π/(segments−1)`, damit der letzte Rand-Punkt wieder
    /// auf dem ersten liegt und der Fan geschlossen ist.
    pub fn outline_points(&self) -> Vec<Vec2> {
        let step = std::f32::consts::TAU / (self.segments - 1) as f32;
        let mut points = Vec::with_capacity(self.point_count());
        points.push(self.centre);
        for i in 0..self.segments {
            let angle = step * i as f32;
            points.push(self.centre + self.radius * Vec2::new(angle.cos(), angle.sin()));
        }
        points
    }

    /// Markiert das Handle als gegriffen (beim Pointer-Press).
    pub fn select(&mut self) {
        self.selected = true;
    }

    /// Hebt die Selektion auf (beim Pointer-Release).
    pub fn unselect(&mut self) {
        self.selected = false;
    }

    /// Ist dieses Handle gerade gegriffen?
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}
