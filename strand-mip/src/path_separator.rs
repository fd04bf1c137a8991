//! Aggregation path separation.
//!
//! At each call the separator classifies the relaxation rows by which bound
//! is tight, detects equality rows that force a continuous-column
//! substitution, and builds an arc adjacency over the remaining eligible
//! continuous columns. Every usable row then seeds an aggregation path:
//! continuous columns in the current aggregation are either substituted
//! away or projected out by folding in an adjacent row, until cut
//! generation succeeds, the path dead-ends, or the length bound is reached.
//!
//! Arc orientation makes every usable row behave like an upper-bounding
//! constraint on a flow network over the continuous columns. Only one
//! coefficient sign per row set is stored so that the path acquires an
//! orientation; the reversed orientation is covered by the second
//! generation attempt on the complemented aggregation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strand_core::LpRelaxation;
use tracing::{debug, trace};

use crate::aggregator::LpAggregator;
use crate::cutgen::CutGenerator;
use crate::pool::CutPool;
use crate::settings::SeparatorSettings;
use crate::transformed::TransformedLp;

/// Row classification by which bound is tight in the current solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    /// Neither bound within tolerance, or consumed as a substitution row.
    Unusable,
    /// The lower-bound slack is the smaller one.
    GreaterEqual,
    /// Both bounds coincide.
    Equal,
    /// The upper-bound slack is the smaller one.
    LessEqual,
}

/// Per-column substitution source: the equality row and pivot coefficient.
type ColSubstitution = Option<(usize, f64)>;

/// Flat in-arc/out-arc tables with per-column index ranges.
#[derive(Debug)]
struct ArcLists {
    in_rows: Vec<(usize, f64)>,
    out_rows: Vec<(usize, f64)>,
    col_in: Vec<(usize, usize)>,
    col_out: Vec<(usize, usize)>,
}

impl ArcLists {
    fn build(
        relax: &LpRelaxation,
        transformed: &TransformedLp,
        kinds: &[RowKind],
        substitutions: &[ColSubstitution],
        capacity: usize,
    ) -> Self {
        let num_cols = relax.num_cols();
        let mut lists = Self {
            in_rows: Vec::with_capacity(capacity),
            out_rows: Vec::with_capacity(capacity),
            col_in: vec![(0, 0); num_cols],
            col_out: vec![(0, 0); num_cols],
        };

        for &col in relax.continuous_cols() {
            if transformed.bound_distance(col) == 0.0 || substitutions[col].is_some() {
                continue;
            }
            let in_begin = lists.in_rows.len();
            let out_begin = lists.out_rows.len();
            let (rows, values) = relax.col(col);
            for (&row, &value) in rows.iter().zip(values) {
                match kinds[row] {
                    RowKind::Unusable => continue,
                    RowKind::LessEqual => {
                        if value < 0.0 {
                            lists.in_rows.push((row, value));
                        } else {
                            lists.out_rows.push((row, value));
                        }
                    }
                    RowKind::GreaterEqual | RowKind::Equal => {
                        if value > 0.0 {
                            lists.in_rows.push((row, value));
                        } else {
                            lists.out_rows.push((row, value));
                        }
                    }
                }
            }
            lists.col_in[col] = (in_begin, lists.in_rows.len());
            lists.col_out[col] = (out_begin, lists.out_rows.len());
        }
        lists
    }

    fn in_arcs(&self, col: usize) -> &[(usize, f64)] {
        &self.in_rows[self.col_in[col].0..self.col_in[col].1]
    }

    fn out_arcs(&self, col: usize) -> &[(usize, f64)] {
        &self.out_rows[self.col_out[col].0..self.col_out[col].1]
    }

    fn has_in_arcs(&self, col: usize) -> bool {
        self.col_in[col].0 != self.col_in[col].1
    }

    fn has_out_arcs(&self, col: usize) -> bool {
        self.col_out[col].0 != self.col_out[col].1
    }
}

/// Best extension candidate seen so far in one direction.
#[derive(Debug, Clone, Copy)]
struct ArcCandidate {
    col: usize,
    coeff: f64,
    bound_distance: f64,
}

/// Counters accumulated across separation calls.
#[derive(Debug, Clone, Default)]
pub struct SeparationStats {
    /// Number of separation calls.
    pub calls: usize,
    /// Usable rows that seeded a path.
    pub rows_seeded: usize,
    /// Rows folded into aggregations beyond the seed rows.
    pub path_extensions: usize,
    /// Forced continuous-column substitutions applied.
    pub substitutions_applied: usize,
    /// Cut-generation attempts (raw and complemented orientations).
    pub generation_attempts: usize,
    /// Cuts accepted into the pool.
    pub cuts_found: usize,
    /// Paths abandoned because no extension row qualified.
    pub dead_ends: usize,
}

/// The aggregation path separator.
#[derive(Debug)]
pub struct PathSeparator {
    settings: SeparatorSettings,
    stats: SeparationStats,
}

impl PathSeparator {
    /// Create a separator with the given settings.
    pub fn new(settings: SeparatorSettings) -> Self {
        Self {
            settings,
            stats: SeparationStats::default(),
        }
    }

    /// The settings in use.
    pub fn settings(&self) -> &SeparatorSettings {
        &self.settings
    }

    /// Accumulated statistics.
    pub fn stats(&self) -> &SeparationStats {
        &self.stats
    }

    /// Reset statistics.
    pub fn reset_stats(&mut self) {
        self.stats = SeparationStats::default();
    }

    /// Run one separation round over the relaxation solution.
    ///
    /// Accepted cuts are forwarded to `pool`; the return value is the
    /// number of cuts accepted during this call. The generator is derived
    /// from the configured seed plus the relaxation's LP iteration count,
    /// so a fixed iteration trajectory reproduces exactly.
    pub fn separate(
        &mut self,
        relax: &LpRelaxation,
        transformed: &TransformedLp,
        aggregator: &mut LpAggregator,
        generator: &mut dyn CutGenerator,
        pool: &mut CutPool,
    ) -> usize {
        let feastol = self.settings.feastol;
        let mut rng = StdRng::seed_from_u64(
            self.settings
                .random_seed
                .wrapping_add(relax.lp_iterations()),
        );

        let mut kinds = classify_rows(relax, feastol);
        let (eligible_counts, arc_capacity) = count_eligible_continuous(relax, transformed);
        let substitutions =
            detect_substitutions(relax, transformed, &mut kinds, &eligible_counts);
        let arcs = ArcLists::build(relax, transformed, &kinds, &substitutions, arc_capacity);

        let num_cols = relax.num_cols();
        let row_dual = &relax.solution().row_dual;
        let mut inds = Vec::new();
        let mut vals = Vec::new();
        let mut cuts_this_call = 0;
        self.stats.calls += 1;

        for seed in 0..relax.num_rows() {
            // normalize every seed row to a >= orientation
            match kinds[seed] {
                RowKind::Unusable => continue,
                RowKind::LessEqual => aggregator.add_row(relax, seed, -1.0),
                _ => aggregator.add_row(relax, seed, 1.0),
            }
            self.stats.rows_seeded += 1;
            let mut path_length = 1;

            'path: while path_length < self.settings.max_path_length {
                aggregator.current_aggregation(false, &mut inds, &mut vals);

                let mut applied_substitution = false;
                let mut best_out: Option<ArcCandidate> = None;
                let mut best_in: Option<ArcCandidate> = None;

                for j in 0..inds.len() {
                    let col = inds[j];
                    if col >= num_cols {
                        continue;
                    }
                    let distance = transformed.bound_distance(col);
                    if distance == 0.0 || relax.is_col_integral(col) {
                        continue;
                    }

                    if let Some((sub_row, pivot)) = substitutions[col] {
                        applied_substitution = true;
                        self.stats.substitutions_applied += 1;
                        aggregator.add_row(relax, sub_row, -vals[j] / pivot);
                        aggregator.cancel(col);
                        continue;
                    }
                    if applied_substitution {
                        continue;
                    }

                    if vals[j] < 0.0 {
                        // projecting out a negative column needs an in-arc row
                        if !arcs.has_in_arcs(col) {
                            continue;
                        }
                        if best_out.is_none_or(|c| distance > c.bound_distance) {
                            best_out = Some(ArcCandidate {
                                col,
                                coeff: vals[j],
                                bound_distance: distance,
                            });
                        }
                    } else {
                        if !arcs.has_out_arcs(col) {
                            continue;
                        }
                        if best_in.is_none_or(|c| distance > c.bound_distance) {
                            best_in = Some(ArcCandidate {
                                col,
                                coeff: vals[j],
                                bound_distance: distance,
                            });
                        }
                    }
                }

                // substitution rounds neither generate nor count toward the
                // path length
                if applied_substitution {
                    continue 'path;
                }

                self.stats.generation_attempts += 1;
                let mut success =
                    self.try_generate(relax, transformed, generator, pool, &inds, &vals, &mut cuts_this_call);
                if !success {
                    aggregator.current_aggregation(true, &mut inds, &mut vals);
                    self.stats.generation_attempts += 1;
                    success = self.try_generate(
                        relax,
                        transformed,
                        generator,
                        pool,
                        &inds,
                        &vals,
                        &mut cuts_this_call,
                    );
                }

                if success || (best_out.is_none() && best_in.is_none()) {
                    break 'path;
                }

                path_length += 1;
                // prefer the out-arc candidate when the bound distances are
                // equal within tolerance; the direction is arbitrary but
                // fixing one diversifies which rows get combined
                let prefer_out = match (&best_out, &best_in) {
                    (Some(_), None) => true,
                    (Some(out), Some(inc)) => {
                        out.bound_distance >= inc.bound_distance - feastol
                    }
                    _ => false,
                };

                let step = if prefer_out {
                    let mut step = None;
                    if let Some(out) = &best_out {
                        step = select_extension(
                            arcs.in_arcs(out.col),
                            out.coeff,
                            row_dual,
                            feastol,
                            &mut rng,
                        );
                        if step.is_none()
                            && let Some(inc) = &best_in
                        {
                            step = select_extension(
                                arcs.out_arcs(inc.col),
                                inc.coeff,
                                row_dual,
                                feastol,
                                &mut rng,
                            );
                        }
                    }
                    step
                } else if let Some(inc) = &best_in {
                    select_extension(arcs.out_arcs(inc.col), inc.coeff, row_dual, feastol, &mut rng)
                } else {
                    None
                };

                match step {
                    Some((row, weight)) => {
                        aggregator.add_row(relax, row, weight);
                        self.stats.path_extensions += 1;
                    }
                    None => {
                        self.stats.dead_ends += 1;
                        break 'path;
                    }
                }
            }

            aggregator.clear();
        }

        self.stats.cuts_found += cuts_this_call;
        debug!(
            rows = relax.num_rows(),
            cols = num_cols,
            cuts = cuts_this_call,
            "path separation round finished"
        );
        cuts_this_call
    }

    #[allow(clippy::too_many_arguments)]
    fn try_generate(
        &mut self,
        relax: &LpRelaxation,
        transformed: &TransformedLp,
        generator: &mut dyn CutGenerator,
        pool: &mut CutPool,
        inds: &[usize],
        vals: &[f64],
        cuts_this_call: &mut usize,
    ) -> bool {
        match generator.generate(relax, transformed, inds, vals, 0.0) {
            Some(cut) => {
                trace!(support = cut.cols.len(), rhs = cut.rhs, "accepted cut");
                if pool.add_cut(cut) {
                    *cuts_this_call += 1;
                }
                true
            }
            None => false,
        }
    }
}

/// Classify every row by which of its bounds is tight.
fn classify_rows(relax: &LpRelaxation, feastol: f64) -> Vec<RowKind> {
    let row_value = &relax.solution().row_value;
    (0..relax.num_rows())
        .map(|row| {
            let lower = relax.row_lower(row);
            let upper = relax.row_upper(row);
            if lower == upper {
                return RowKind::Equal;
            }

            let lower_slack = if lower.is_finite() {
                row_value[row] - lower
            } else {
                f64::INFINITY
            };
            let upper_slack = if upper.is_finite() {
                upper - row_value[row]
            } else {
                f64::INFINITY
            };

            if lower_slack > feastol && upper_slack > feastol {
                RowKind::Unusable
            } else if lower_slack < upper_slack {
                RowKind::GreaterEqual
            } else {
                RowKind::LessEqual
            }
        })
        .collect()
}

/// Count, per row, the eligible continuous columns it touches, and the
/// total nonzero count of those columns for sizing the arc tables.
fn count_eligible_continuous(
    relax: &LpRelaxation,
    transformed: &TransformedLp,
) -> (Vec<usize>, usize) {
    let mut counts = vec![0usize; relax.num_rows()];
    let mut capacity = 0;
    for &col in relax.continuous_cols() {
        if transformed.bound_distance(col) == 0.0 {
            continue;
        }
        capacity += relax.matrix().col_len(col);
        let (rows, _) = relax.col(col);
        for &row in rows {
            counts[row] += 1;
        }
    }
    (counts, capacity)
}

/// Record a substitution for every equality row containing exactly one
/// eligible continuous column, demoting the row so it cannot also seed.
///
/// A column claimed by more than one equality row keeps its first claim;
/// later rows keep their kind.
fn detect_substitutions(
    relax: &LpRelaxation,
    transformed: &TransformedLp,
    kinds: &mut [RowKind],
    eligible_counts: &[usize],
) -> Vec<ColSubstitution> {
    let mut substitutions: Vec<ColSubstitution> = vec![None; relax.num_cols()];
    for row in 0..relax.num_rows() {
        if kinds[row] != RowKind::Equal || eligible_counts[row] != 1 {
            continue;
        }
        let (cols, values) = relax.row(row);
        let entry = cols.iter().zip(values).find(|&(&col, _)| {
            !relax.is_col_integral(col) && transformed.bound_distance(col) > 0.0
        });
        let Some((&col, &pivot)) = entry else {
            debug_assert!(false, "eligible continuous count out of sync with row data");
            continue;
        };

        if substitutions[col].is_some() {
            continue;
        }
        substitutions[col] = Some((row, pivot));
        kinds[row] = RowKind::Unusable;
    }
    substitutions
}

/// Scan one arc list for the row that cancels `col_coeff` with the highest
/// `|weight x dual|` score.
///
/// Weights outside `[feastol, 1/feastol]` in magnitude are rejected as
/// numerically unsafe. Score ties within feastol are broken by an unbiased
/// bit from `rng`.
fn select_extension(
    arcs: &[(usize, f64)],
    col_coeff: f64,
    row_dual: &[f64],
    feastol: f64,
    rng: &mut StdRng,
) -> Option<(usize, f64)> {
    let max_weight = 1.0 / feastol;
    let mut best: Option<(usize, f64)> = None;
    let mut best_score = 0.0;

    for &(row, arc_coeff) in arcs {
        let weight = -col_coeff / arc_coeff;
        let magnitude = weight.abs();
        if magnitude < feastol || magnitude > max_weight {
            continue;
        }
        let score = (weight * row_dual[row]).abs();
        if best.is_none()
            || score > best_score + feastol
            || (score >= best_score - feastol && rng.random::<bool>())
        {
            best = Some((row, weight));
            best_score = score;
        }
    }
    best
}
