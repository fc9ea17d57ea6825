//! Clipping polylines to a rectangular region.
//!
//! Parametric (Liang-Barsky) clipping per segment: crossing points are
//! linearly interpolated onto the region boundary, never snapped to the
//! nearest sample, and a line is split into separate runs wherever it leaves
//! the region.

use loran_common::{BoundingBox, GeoPoint, GridLine};

/// Clip a polyline to a bounding box, splitting it at boundary crossings.
///
/// Points inside the region pass through unchanged, so a fully contained
/// polyline comes back as a single identical run. A fully outside polyline
/// yields no runs. Segments that traverse the region with both endpoints
/// outside contribute their interior portion as a run of their own.
pub fn clip_polyline(points: &[GeoPoint], region: &BoundingBox) -> Vec<Vec<GeoPoint>> {
    let mut runs = Vec::new();
    let mut current: Vec<GeoPoint> = Vec::new();

    for segment in points.windows(2) {
        let (a, b) = (segment[0], segment[1]);
        match clip_segment(a, b, region) {
            None => flush(&mut current, &mut runs),
            Some((t0, t1)) => {
                let start = if t0 <= 0.0 { a } else { interpolate(a, b, t0) };
                let end = if t1 >= 1.0 { b } else { interpolate(a, b, t1) };

                if t0 > 0.0 {
                    // Entering the region afresh.
                    flush(&mut current, &mut runs);
                }
                if current.is_empty() {
                    current.push(start);
                }
                current.push(end);
                if t1 < 1.0 {
                    // Exits the region within this segment.
                    flush(&mut current, &mut runs);
                }
            }
        }
    }

    flush(&mut current, &mut runs);
    runs
}

/// Clip a grid line, preserving its pair and TD tags on every run.
pub fn clip_line(line: &GridLine, region: &BoundingBox) -> Vec<GridLine> {
    clip_polyline(&line.points, region)
        .into_iter()
        .map(|points| GridLine::new(line.chain_id.clone(), line.secondary_id.clone(), line.td_us, points))
        .collect()
}

/// Liang-Barsky interval of a segment inside the box, as parameters of the
/// segment from `a` to `b`. `None` when the segment misses the box entirely.
fn clip_segment(a: GeoPoint, b: GeoPoint, region: &BoundingBox) -> Option<(f64, f64)> {
    let dlon = b.lon - a.lon;
    let dlat = b.lat - a.lat;

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    let edges = [
        (-dlon, a.lon - region.min_lon),
        (dlon, region.max_lon - a.lon),
        (-dlat, a.lat - region.min_lat),
        (dlat, region.max_lat - a.lat),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this boundary; outside it means no intersection.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            if r > t0 {
                t0 = r;
            }
        } else {
            if r < t0 {
                return None;
            }
            if r < t1 {
                t1 = r;
            }
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

fn interpolate(a: GeoPoint, b: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint {
        lat: a.lat + t * (b.lat - a.lat),
        lon: a.lon + t * (b.lon - a.lon),
    }
}

fn flush(current: &mut Vec<GeoPoint>, runs: &mut Vec<Vec<GeoPoint>>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
