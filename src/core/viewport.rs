//! Koordinaten-Mapping zwischen Screen-Pixeln und Welt-Koordinaten.
//!
//! Zwei Stufen: Screen-Pixel → normalisierte Gerätekoordinaten (NDC),
//! dann NDC → Welt über ein orthografisches Sichtvolumen.

use anyhow::{bail, Result};
use glam::Vec2;

/// Orthografisches Sichtvolumen der Session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewVolume {
    /// Linker Rand in Welt-Einheiten
    pub left: f32,
    /// Rechter Rand
    pub right: f32,
    /// Unterer Rand
    pub bottom: f32,
    /// Oberer Rand
    pub top: f32,
    /// Near-Plane
    pub near: f32,
    /// Far-Plane
    pub far: f32,
}

impl ViewVolume {
    /// Erstellt ein Sichtvolumen; entartete Ausdehnungen sind abgelehnt.
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Result<Self> {
        if left >= right || bottom >= top {
            bail!(
                "Sichtvolumen entartet: left={} right={} bottom={} top={}",
                left,
                right,
                bottom,
                top
            );
        }
        if near == far {
            bail!("Near- und Far-Plane dürfen nicht zusammenfallen: {}", near);
        }
        Ok(Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        })
    }
}

impl Default for ViewVolume {
    /// Default-Volumen der Session: ±10 in allen Achsen.
    fn default() -> Self {
        Self {
            left: -10.0,
            right: 10.0,
            bottom: -10.0,
            top: 10.0,
            near: -10.0,
            far: 10.0,
        }
    }
}

/// Viewport: Pixel-Größe plus Sichtvolumen.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Größe in Pixeln [Breite, Höhe]
    size: Vec2,
    volume: ViewVolume,
}

impl Viewport {
    /// Erstellt einen Viewport; Größen unter einem Pixel sind abgelehnt.
    pub fn new(size: Vec2, volume: ViewVolume) -> Result<Self> {
        if size.x < 1.0 || size.y < 1.0 {
            bail!("Viewport-Größe ungültig: {}x{}", size.x, size.y);
        }
        Ok(Self { size, volume })
    }

    /// Aktuelle Pixel-Größe.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Das Sichtvolumen.
    pub fn volume(&self) -> ViewVolume {
        self.volume
    }

    /// Passt die Pixel-Größe an (Fenster-Resize).
    pub fn resize(&mut self, size: Vec2) -> Result<()> {
        if size.x < 1.0 || size.y < 1.0 {
            bail!("Viewport-Größe ungültig: {}x{}", size.x, size.y);
        }
        self.size = size;
        Ok(())
    }

    /// Screen-Pixel → NDC: `x' = 2x/w − 1`, `y' = 1 − 2y/h`.
    pub fn screen_to_ndc(&self, screen: Vec2) -> Vec2 {
        Vec2::new(
            2.0 * screen.x / self.size.x - 1.0,
            1.0 - 2.0 * screen.y / self.size.y,
        )
    }

    /// NDC → Welt über das orthografische Sichtvolumen.
    ///
    /// Die x-Achse ist gespiegelt, weil die Kamera der Session auf −z sitzt
    /// und auf den Ursprung blickt.
    pub fn ndc_to_world(&self, ndc: Vec2) -> Vec2 {
        let rl = (self.volume.right - self.volume.left) / 2.0;
        let bt = (self.volume.top - self.volume.bottom) / 2.0;
        let hmid = self.volume.left + rl;
        let vmid = self.volume.bottom + bt;
        Vec2::new(hmid + rl * -ndc.x, vmid + bt * ndc.y)
    }

    /// Screen-Pixel → Welt (beide Stufen).
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.ndc_to_world(self.screen_to_ndc(screen))
    }

    /// Welt → Screen-Pixel (Umkehrung, z.B. für Tests und Scripting).
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let rl = (self.volume.right - self.volume.left) / 2.0;
        let bt = (self.volume.top - self.volume.bottom) / 2.0;
        let hmid = self.volume.left + rl;
        let vmid = self.volume.bottom + bt;
        let ndc = Vec2::new(-(world.x - hmid) / rl, (world.y - vmid) / bt);
        Vec2::new(
            (ndc.x + 1.0) * self.size.x / 2.0,
            (1.0 - ndc.y) * self.size.y / 2.0,
        )
    }
}
