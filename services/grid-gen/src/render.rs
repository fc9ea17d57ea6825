//! Raster preview of a clipped grid.
//!
//! Draws the grid lines into an equirectangular canvas covering the region,
//! one stroke color per secondary, and writes a PNG. This is a quick-look
//! aid; chart-grade rendering happens downstream of the GeoJSON output.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tiny_skia::{Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

use loran_common::{BoundingBox, GridLine};

/// Stroke colors cycled over secondaries, [R, G, B, A].
const LINE_COLORS: [[u8; 4]; 6] = [
    [178, 24, 43, 255],
    [33, 102, 172, 255],
    [27, 120, 55, 255],
    [230, 97, 1, 255],
    [118, 42, 131, 255],
    [53, 151, 143, 255],
];

/// Render the grid lines to a PNG at `path`.
pub fn render_preview(
    lines: &[GridLine],
    region: &BoundingBox,
    width: u32,
    path: &Path,
) -> Result<()> {
    if width == 0 || region.width() <= 0.0 || region.height() <= 0.0 {
        return Err(anyhow!("preview needs a positive raster size and region"));
    }
    let height = ((width as f64) * region.height() / region.width())
        .round()
        .max(1.0) as u32;
    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| anyhow!("invalid preview dimensions"))?;
    pixmap.fill(Color::WHITE);

    // Stable color assignment: secondaries in order of first appearance.
    let mut secondaries: Vec<&str> = Vec::new();
    for line in lines {
        if !secondaries.contains(&line.secondary_id.as_str()) {
            secondaries.push(&line.secondary_id);
        }
    }

    let to_px = |lat: f64, lon: f64| -> (f32, f32) {
        let x = (lon - region.min_lon) / region.width() * width as f64;
        let y = (region.max_lat - lat) / region.height() * height as f64;
        (x as f32, y as f32)
    };

    let mut stroke = Stroke::default();
    stroke.width = 1.5;
    stroke.line_cap = LineCap::Round;
    stroke.line_join = LineJoin::Round;

    for line in lines {
        if line.points.len() < 2 {
            continue;
        }
        let color_index = secondaries
            .iter()
            .position(|id| *id == line.secondary_id)
            .unwrap_or(0);
        let [r, g, b, a] = LINE_COLORS[color_index % LINE_COLORS.len()];

        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let mut pb = PathBuilder::new();
        let (x0, y0) = to_px(line.points[0].lat, line.points[0].lon);
        pb.move_to(x0, y0);
        for p in &line.points[1..] {
            let (x, y) = to_px(p.lat, p.lon);
            pb.line_to(x, y);
        }

        if let Some(geometry) = pb.finish() {
            pixmap.stroke_path(&geometry, &paint, &stroke, Transform::identity(), None);
        }
    }

    pixmap
        .save_png(path)
        .with_context(|| format!("writing preview {}", path.display()))?;
    Ok(())
}
