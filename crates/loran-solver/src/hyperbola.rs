//! Constant-TD curve solver.
//!
//! A LORAN line of position is the locus of points where the published time
//! difference for a master/secondary pair equals one TD value: a single
//! branch of a hyperbola whose foci are the two stations. Seeds for the curve
//! come from the closed-form hyperbola parameterization in a local tangent
//! frame at the baseline midpoint (x-axis along the master-to-secondary
//! azimuth); each seed is then pulled onto the true spherical locus by a
//! bounded Newton iteration along the TD gradient. Points that fail to
//! converge, or that fall in the near-degenerate zone along the baseline
//! extension, are skipped rather than diverged on.

use loran_common::{BoundingBox, GeoPoint, Station};
use tracing::debug;

use crate::config::SolverParams;
use crate::error::{GridError, Result};
use crate::propagation::Propagation;

/// Stations closer than this are treated as coincident.
const MIN_BASELINE_M: f64 = 1.0;

/// Relative margin on `|range difference| / baseline` past which the locus
/// collapses onto the baseline extension and nothing is drawn.
const BAND_MARGIN: f64 = 1e-6;

/// Outcome of solving one (pair, TD) combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolvedLine {
    /// Connected walk along the hyperbola branch. Empty when the TD has no
    /// locus within the search area.
    pub points: Vec<GeoPoint>,
    /// Marching steps abandoned because the Newton iteration hit its cap.
    pub nonconverged: u32,
    /// Marching steps skipped in the near-degenerate gradient zone.
    pub degenerate_skips: u32,
}

/// Local hyperbola frame for one (pair, TD) solve.
struct Frame {
    midpoint: GeoPoint,
    /// Azimuth of the baseline, master toward secondary, degrees.
    azimuth_deg: f64,
    /// Semi-transverse axis, meters.
    a_m: f64,
    /// Semi-conjugate axis, meters.
    b_m: f64,
    /// -1 when the branch bends around the master (secondary farther), else 1.
    branch_sign: f64,
    search_radius_m: f64,
}

impl Frame {
    /// Local Cartesian position on the branch at parameter `t`; `dir`
    /// selects the side of the baseline.
    fn local_point(&self, t: f64, dir: f64) -> (f64, f64) {
        (
            self.branch_sign * self.a_m * t.cosh(),
            dir * self.b_m * t.sinh(),
        )
    }

    /// Arc speed |d(x,y)/dt| of the parameterization, meters per unit t.
    fn arc_speed(&self, t: f64) -> f64 {
        (self.a_m * t.sinh()).hypot(self.b_m * t.cosh())
    }
}

enum Refined {
    Point(GeoPoint),
    Degenerate,
    NoConvergence,
}

/// Solves constant-TD curves for one region and parameter set.
pub struct HyperbolaSolver<'a> {
    params: &'a SolverParams,
    propagation: Propagation,
    region: BoundingBox,
}

impl<'a> HyperbolaSolver<'a> {
    pub fn new(params: &'a SolverParams, propagation: Propagation, region: BoundingBox) -> Self {
        Self {
            params,
            propagation,
            region,
        }
    }

    /// Compute the ordered point walk for one (pair, TD) combination.
    ///
    /// Returns an empty line when the TD lies outside the band the pair can
    /// geometrically produce. Coincident stations are an error; everything
    /// else degrades to skipped points counted in the result.
    pub fn solve(
        &self,
        master: &Station,
        secondary: &Station,
        coding_delay_us: f64,
        td_us: f64,
    ) -> Result<SolvedLine> {
        let m = master.position;
        let s = secondary.position;

        let baseline_m = geodesy::distance(m, s)?;
        if baseline_m < MIN_BASELINE_M {
            return Err(GridError::DegenerateGeometry {
                master: master.id.clone(),
                secondary: secondary.id.clone(),
            });
        }

        let k_m = self.propagation.range_difference(td_us, coding_delay_us);
        let c_m = baseline_m / 2.0;
        let a_m = k_m.abs() / 2.0;
        if a_m >= c_m * (1.0 - BAND_MARGIN) {
            debug!(
                td_us,
                k_m, baseline_m, "TD outside the reachable band for this pair"
            );
            return Ok(SolvedLine::default());
        }
        let b_m = (c_m * c_m - a_m * a_m).sqrt();

        let azimuth_deg = geodesy::bearing(m, s)?;
        let midpoint = geodesy::destination(m, azimuth_deg, c_m)?;

        // Positive range difference means the receiver is closer to the
        // master, which sits at x = -c in the local frame. Zero is the
        // perpendicular bisector; either sign yields x = 0 there.
        let branch_sign = if k_m > 0.0 { -1.0 } else { 1.0 };

        let frame = Frame {
            midpoint,
            azimuth_deg,
            a_m,
            b_m,
            branch_sign,
            search_radius_m: self.search_radius(midpoint)?,
        };

        let mut line = SolvedLine::default();
        let mut points = self.march(&frame, -1.0, false, m, s, coding_delay_us, td_us, &mut line)?;
        points.reverse();
        let forward = self.march(&frame, 1.0, true, m, s, coding_delay_us, td_us, &mut line)?;
        points.extend(forward);
        line.points = points;

        debug!(
            td_us,
            points = line.points.len(),
            nonconverged = line.nonconverged,
            degenerate_skips = line.degenerate_skips,
            "solved line"
        );
        Ok(line)
    }

    /// Marching stops once a seed is farther from the baseline midpoint than
    /// any point of the region can be.
    fn search_radius(&self, midpoint: GeoPoint) -> Result<f64> {
        let mut radius: f64 = 0.0;
        for corner in self.region.corners() {
            radius = radius.max(geodesy::distance(midpoint, corner)?);
        }
        Ok(radius + self.params.step_m)
    }

    /// Walk one side of the branch outward from the vertex, emitting refined
    /// points until the walk leaves the search area, a point fails, or the
    /// point cap is reached.
    #[allow(clippy::too_many_arguments)]
    fn march(
        &self,
        frame: &Frame,
        dir: f64,
        include_vertex: bool,
        m: GeoPoint,
        s: GeoPoint,
        coding_delay_us: f64,
        td_us: f64,
        line: &mut SolvedLine,
    ) -> Result<Vec<GeoPoint>> {
        let mut points = Vec::new();
        let mut t = if include_vertex {
            0.0
        } else {
            self.advance(frame, 0.0)
        };

        while points.len() < self.params.max_points {
            let (x, y) = frame.local_point(t, dir);
            let r = x.hypot(y);
            if !r.is_finite() || r > frame.search_radius_m {
                break;
            }

            let bearing_deg = frame.azimuth_deg + y.atan2(x).to_degrees();
            let seed = geodesy::destination(frame.midpoint, bearing_deg, r)?;

            match self.refine(seed, m, s, coding_delay_us, td_us)? {
                Refined::Point(p) => points.push(p),
                Refined::Degenerate => {
                    line.degenerate_skips += 1;
                    break;
                }
                Refined::NoConvergence => {
                    line.nonconverged += 1;
                    break;
                }
            }

            let next = self.advance(frame, t);
            if !(next > t) {
                break;
            }
            t = next;
        }

        Ok(points)
    }

    /// Advance the curve parameter so the next seed lands at most one step
    /// beyond the current one. Arc speed grows monotonically in `t`, so
    /// evaluating it again at the tentative endpoint bounds the spacing from
    /// above.
    fn advance(&self, frame: &Frame, t: f64) -> f64 {
        let v0 = frame.arc_speed(t).max(1e-3);
        let dt0 = (self.params.step_m / v0).min(5.0);
        let v1 = frame.arc_speed(t + dt0).max(v0);
        t + self.params.step_m / v1
    }

    /// Pull a seed onto the constant-TD locus with a bounded Newton
    /// iteration along the TD gradient.
    ///
    /// The gradient of the range difference is the difference of the unit
    /// bearing vectors toward the two stations; its magnitude vanishes on the
    /// baseline extension, which is exactly where the locus degenerates.
    fn refine(
        &self,
        seed: GeoPoint,
        m: GeoPoint,
        s: GeoPoint,
        coding_delay_us: f64,
        td_us: f64,
    ) -> Result<Refined> {
        let mut p = seed;
        for _ in 0..self.params.max_iterations {
            let master_dist = geodesy::distance(p, m)?;
            let secondary_dist = geodesy::distance(p, s)?;
            let residual =
                self.propagation
                    .time_difference(master_dist, secondary_dist, coding_delay_us)
                    - td_us;
            if residual.abs() <= self.params.tolerance_us {
                return Ok(Refined::Point(p));
            }

            let to_master = geodesy::bearing(p, m)?.to_radians();
            let to_secondary = geodesy::bearing(p, s)?.to_radians();
            let grad_east = to_master.sin() - to_secondary.sin();
            let grad_north = to_master.cos() - to_secondary.cos();
            let grad_mag = grad_east.hypot(grad_north);
            if grad_mag < self.params.min_gradient {
                return Ok(Refined::Degenerate);
            }

            // Directional derivative of the TD along the gradient bearing is
            // grad_mag / v microseconds per meter.
            let step_m = -residual * self.propagation.speed_m_per_us() / grad_mag;
            let mut bearing_deg = grad_east.atan2(grad_north).to_degrees();
            let mut dist_m = step_m;
            if dist_m < 0.0 {
                bearing_deg += 180.0;
                dist_m = -dist_m;
            }
            p = geodesy::destination(p, bearing_deg, dist_m)?;
        }
        Ok(Refined::NoConvergence)
    }
}
