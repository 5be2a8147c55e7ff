//! Ferguson-Patch-Editor (headless).
//!
//! Baut die Default-Session auf, fährt eine gescriptete Drag-Geste und eine
//! Probe-Anfrage und protokolliert die resultierenden Buffer-Updates. Das
//! eigentliche Rastern übernimmt ein externer Renderer über
//! `vertices()` + `draw_commands()`.

use ferguson_patch_editor::{EditorOptions, PatchCanvas};
use glam::Vec2;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Ferguson-Patch-Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    // Optionen aus TOML laden (oder Standardwerte)
    let options = EditorOptions::load_from_file(&EditorOptions::config_path());
    let mut canvas = PatchCanvas::new(options, Vec2::new(800.0, 600.0))?;

    log::info!(
        "Session aufgebaut: {} Punkte im Buffer, {} Draw-Befehle",
        canvas.vertices().len(),
        canvas.draw_commands().len()
    );
    canvas.take_dirty_ranges();

    // Gescriptete Geste: Ecke p0 greifen und diagonal verschieben
    let p0 = canvas.patch().curve(0).p0();
    let press = canvas.viewport().world_to_screen(p0);
    let release = canvas.viewport().world_to_screen(p0 + Vec2::new(0.3, -0.2));
    canvas.pointer_press(press);
    canvas.pointer_move(release);
    canvas.pointer_release(release);

    for range in canvas.take_dirty_ranges() {
        log::info!(
            "Drag-Update: Punkte {}..{} neu geschrieben",
            range.first,
            range.first + range.count
        );
    }

    // Innerer Punkt bei (0.25, 0.75)
    canvas.set_probe(0.25, 0.75);
    let (u, v) = canvas.patch().last_probe();
    let inner = canvas.patch().surface_point(u, v);
    log::info!("Probe S({}, {}) = ({:.4}, {:.4})", u, v, inner.x, inner.y);
    log::info!("{} Draw-Befehle mit Probe-Overlay", canvas.draw_commands().len());

    Ok(())
}
