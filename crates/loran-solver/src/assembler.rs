//! Grid assembly: fans the solver out over every (pair, TD value).

use loran_common::{BoundingBox, Chain, ChainPair, GridLine, Station, TdSequence};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::clip::clip_line;
use crate::config::SolverParams;
use crate::error::{GridError, Result};
use crate::hyperbola::{HyperbolaSolver, SolvedLine};
use crate::propagation::Propagation;

/// Counters accumulated over one assembly run.
///
/// Non-convergence is diagnostic only; it never fails the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyDiagnostics {
    /// (pair, TD) combinations that produced at least one in-region run.
    pub lines_solved: usize,
    /// Combinations whose locus missed the region entirely.
    pub lines_empty: usize,
    /// Pairs skipped for degenerate geometry.
    pub pairs_skipped: usize,
    /// Marching steps abandoned on Newton non-convergence.
    pub rays_nonconverged: u64,
    /// Marching steps skipped in the degenerate gradient zone.
    pub degenerate_skips: u64,
}

/// The complete clipped line set for one chain and region.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridAssembly {
    /// Clipped grid lines: pairs in chain-definition order, TD values
    /// ascending, split runs in walk order.
    pub lines: Vec<GridLine>,
    pub diagnostics: AssemblyDiagnostics,
}

/// Produce the full grid for one chain, clipped to the region.
///
/// Deterministic and repeatable: identical inputs yield bit-identical output.
/// Degenerate pairs are skipped with a warning; the run continues for the
/// remaining pairs.
pub fn assemble_chain(
    chain: &Chain,
    region: &BoundingBox,
    params: &SolverParams,
    propagation: Propagation,
) -> Result<GridAssembly> {
    let solver = HyperbolaSolver::new(params, propagation, *region);
    let mut assembly = GridAssembly::default();

    for pair in &chain.pairs {
        let td_values = resolve_td_values(&chain.master, pair, region, propagation)?;
        if td_values.is_empty() {
            debug!(
                chain = %chain.id,
                secondary = %pair.secondary.id,
                "no TD values for pair"
            );
            continue;
        }

        let solved: Vec<Result<SolvedLine>> = td_values
            .par_iter()
            .map(|&td_us| {
                solver.solve(&chain.master, &pair.secondary, pair.coding_delay_us, td_us)
            })
            .collect();

        if let Some(err) = solved
            .iter()
            .find_map(|r| match r {
                Err(GridError::DegenerateGeometry { .. }) => r.as_ref().err(),
                _ => None,
            })
        {
            warn!(
                chain = %chain.id,
                secondary = %pair.secondary.id,
                error = %err,
                "skipping pair"
            );
            assembly.diagnostics.pairs_skipped += 1;
            continue;
        }

        for (td_us, result) in td_values.iter().zip(solved) {
            let line = result?;
            assembly.diagnostics.rays_nonconverged += u64::from(line.nonconverged);
            assembly.diagnostics.degenerate_skips += u64::from(line.degenerate_skips);

            let unclipped = GridLine::new(
                chain.id.clone(),
                pair.secondary.id.clone(),
                *td_us,
                line.points,
            );
            let runs = clip_line(&unclipped, region);
            if runs.is_empty() {
                assembly.diagnostics.lines_empty += 1;
            } else {
                assembly.diagnostics.lines_solved += 1;
                assembly.lines.extend(runs);
            }
        }
    }

    Ok(assembly)
}

/// Resolve the TD family for a pair into ascending values.
///
/// Explicit and range families come straight from the configuration; the
/// auto family derives the band that covers the region and intersects it
/// with the band the pair can geometrically produce.
fn resolve_td_values(
    master: &Station,
    pair: &ChainPair,
    region: &BoundingBox,
    propagation: Propagation,
) -> Result<Vec<f64>> {
    if let Some(values) = pair.tds.explicit_values() {
        return Ok(values);
    }
    let TdSequence::Auto { step_us, buffer_us } = &pair.tds else {
        return Ok(Vec::new());
    };

    let (min_td, max_td) = td_coverage(
        master,
        &pair.secondary,
        pair.coding_delay_us,
        region,
        propagation,
        *buffer_us,
    )?;
    Ok(aligned_values(min_td, max_td, *step_us))
}

/// TD band that covers a region for one pair: the extremes over the region
/// corners, padded by a buffer, clamped to the geometrically reachable band.
fn td_coverage(
    master: &Station,
    secondary: &Station,
    coding_delay_us: f64,
    region: &BoundingBox,
    propagation: Propagation,
    buffer_us: f64,
) -> Result<(f64, f64)> {
    let mut min_td = f64::INFINITY;
    let mut max_td = f64::NEG_INFINITY;
    for corner in region.corners() {
        let master_dist = geodesy::distance(corner, master.position)?;
        let secondary_dist = geodesy::distance(corner, secondary.position)?;
        let td = propagation.time_difference(master_dist, secondary_dist, coding_delay_us);
        min_td = min_td.min(td);
        max_td = max_td.max(td);
    }

    let baseline_us = geodesy::distance(master.position, secondary.position)?
        / propagation.speed_m_per_us();
    Ok((
        (min_td - buffer_us).max(coding_delay_us - baseline_us),
        (max_td + buffer_us).min(coding_delay_us + baseline_us),
    ))
}

/// Values aligned to step multiples within [min_td, max_td], ascending.
fn aligned_values(min_td: f64, max_td: f64, step_us: f64) -> Vec<f64> {
    let mut values = Vec::new();
    if !(step_us > 0.0) || min_td > max_td {
        return values;
    }
    let mut td = (min_td / step_us).ceil() * step_us;
    while td <= max_td {
        values.push(td);
        td += step_us;
    }
    values
}
