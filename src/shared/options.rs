//! Zentrale Konfiguration für den Ferguson-Patch-Editor.
//!
//! `EditorOptions` enthält alle konstruktor-zeitigen Werte der Session.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kurven / Patch ──────────────────────────────────────────────────

/// Abtastpunkte pro Randkurve (≥ 2).
pub const CURVE_RESOLUTION: u32 = 10;
/// Abtastpunkte pro Probe-Querschnitt (≥ 2).
pub const PATCH_RESOLUTION: u32 = 10;
/// Skalierung der Tangenten in der Basis-Auswertung.
pub const TANGENT_SCALE: f32 = 1.0;

// ── Handles ─────────────────────────────────────────────────────────

/// Handle-Radius in Welt-Einheiten.
pub const HANDLE_RADIUS: f32 = 0.2;
/// Rand-Punkte pro Handle-Fan (≥ 3).
pub const HANDLE_SEGMENTS: u32 = 10;

// ── Probe ───────────────────────────────────────────────────────────

/// Radius des Probe-Markers in Welt-Einheiten.
pub const PROBE_MARKER_RADIUS: f32 = 0.02;
/// Rand-Punkte des Probe-Marker-Fans.
pub const PROBE_MARKER_SEGMENTS: u32 = 10;

// ── Farben ──────────────────────────────────────────────────────────

/// Farbe der Randkurven (RGBA: Schwarz).
pub const CURVE_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
/// Farbe der Tangentenlinien (RGBA: Rot).
pub const TANGENT_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
/// Farbe der Handle-Fans (RGBA: Grün).
pub const HANDLE_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
/// Farbe der Probe-Geometrie (RGBA: Blau).
pub const PROBE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

// ── Sichtvolumen ────────────────────────────────────────────────────

/// Orthografisches Sichtvolumen der Default-Session (±10 in allen Achsen).
pub const VIEW_VOLUME: [f32; 6] = [-10.0, 10.0, -10.0, 10.0, -10.0, 10.0];

fn default_probe_marker_segments() -> u32 {
    PROBE_MARKER_SEGMENTS
}

/// Alle konstruktor-zeitigen Editor-Optionen.
/// Wird als `ferguson_patch_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorOptions {
    // ── Geometrie ───────────────────────────────────────────────
    /// Abtastpunkte pro Randkurve
    pub curve_resolution: u32,
    /// Abtastpunkte pro Probe-Querschnitt
    pub patch_resolution: u32,
    /// Skalierung der Tangenten in der Basis-Auswertung
    pub tangent_scale: f32,

    // ── Handles ─────────────────────────────────────────────────
    /// Handle-Radius in Welt-Einheiten
    pub handle_radius: f32,
    /// Rand-Punkte pro Handle-Fan
    pub handle_segments: u32,

    // ── Probe ───────────────────────────────────────────────────
    /// Radius des Probe-Markers
    pub probe_marker_radius: f32,
    /// Rand-Punkte des Probe-Marker-Fans
    #[serde(default = "default_probe_marker_segments")]
    pub probe_marker_segments: u32,

    // ── Farben ──────────────────────────────────────────────────
    /// Farbe der Randkurven
    pub curve_color: [f32; 4],
    /// Farbe der Tangentenlinien
    pub tangent_color: [f32; 4],
    /// Farbe der Handle-Fans
    pub handle_color: [f32; 4],
    /// Farbe der Probe-Geometrie
    pub probe_color: [f32; 4],

    // ── Sichtvolumen ────────────────────────────────────────────
    /// Orthografisches Sichtvolumen [left, right, bottom, top, near, far]
    #[serde(default = "default_view_volume")]
    pub view_volume: [f32; 6],
}

fn default_view_volume() -> [f32; 6] {
    VIEW_VOLUME
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            curve_resolution: CURVE_RESOLUTION,
            patch_resolution: PATCH_RESOLUTION,
            tangent_scale: TANGENT_SCALE,
            handle_radius: HANDLE_RADIUS,
            handle_segments: HANDLE_SEGMENTS,
            probe_marker_radius: PROBE_MARKER_RADIUS,
            probe_marker_segments: PROBE_MARKER_SEGMENTS,
            curve_color: CURVE_COLOR,
            tangent_color: TANGENT_COLOR,
            handle_color: HANDLE_COLOR,
            probe_color: PROBE_COLOR,
            view_volume: VIEW_VOLUME,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei; bei Fehlern gelten die Defaults.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ferguson_patch_editor"))
            .with_extension("toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let opts = EditorOptions::default();
        assert_eq!(opts.curve_resolution, CURVE_RESOLUTION);
        assert_eq!(opts.handle_segments, HANDLE_SEGMENTS);
        assert_eq!(opts.view_volume, VIEW_VOLUME);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut opts = EditorOptions::default();
        opts.curve_resolution = 30;
        opts.tangent_scale = 0.5;
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: EditorOptions = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_partial_toml_uses_serde_defaults() {
        // Ältere Optionen-Dateien ohne view_volume bleiben ladbar
        let mut opts = EditorOptions::default();
        opts.patch_resolution = 20;
        let toml_str = toml::to_string(&opts).unwrap();
        let stripped: String = toml_str
            .lines()
            .filter(|l| !l.starts_with("view_volume") && !l.starts_with("probe_marker_segments"))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: EditorOptions = toml::from_str(&stripped).unwrap();
        assert_eq!(parsed.view_volume, VIEW_VOLUME);
        assert_eq!(parsed.patch_resolution, 20);
    }
}
