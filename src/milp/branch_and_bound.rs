//! Exact depth-first branch and bound for binary linear programs.
//!
//! # Algorithm
//!
//! Each constraint keeps the minimum and maximum activity reachable from the
//! current partial assignment. Fixing a variable updates those bounds
//! incrementally, and bound propagation forces every free variable whose
//! opposite value would make a constraint unreachable. Every fixing is
//! recorded on a trail so that backtracking restores the exact previous
//! state.
//!
//! The search runs in three phases:
//!
//! 1. **Dive**: a depth-first search capped at a node budget. Most
//!    instances are closed here.
//! 2. **Neighborhood search**: starting from the dive's incumbent, a seeded
//!    random variable that could still raise the objective is freed together
//!    with every variable sharing a constraint with it; all other variables
//!    are fixed to the incumbent and the freed part is searched with a small
//!    node budget.
//! 3. **Proof**: an unbounded depth-first search from the root, using the
//!    best incumbent as cutoff. Only this phase decides optimality.
//!
//! ## Bounds
//!
//! The cheap bound is the value of the fixed variables plus every positive
//! coefficient still free. Once an incumbent exists, nodes passing that test
//! are also checked against a cover bound: free improving variables that
//! share a unit row (`Σ x ≤ k`) with room for one more are grouped into
//! cliques worth their best coefficient, and cliques that fit in a unit row
//! with room for `k ≥ 2` only contribute their `k` best values. A node is
//! expanded only while both bounds are strictly better than the incumbent,
//! so the first solution found for an objective value is the one kept.
//!
//! ## Branching
//!
//! Variables are branched in order of decreasing objective coefficient,
//! ties broken by the first covering row (a `≥` or `=` row with a positive
//! coefficient for the variable), then by index. When that covering row no
//! longer depends on any free negative term, the variable is set to 1 only
//! while the row is still below its right-hand side; otherwise the
//! objective-improving value is tried first.
//!
//! # Complexity
//! Exponential in the worst case; each node costs O(n + propagated terms).
//! Rosters whose per-person quotas leave slack solve in a few thousand
//! nodes at month scale. Tightly capacitated rosters, where demand exceeds
//! what the quotas allow and the cover bound stays above the optimum, can
//! still take exponential time; bind an external engine through
//! [`MilpSolver`] for those.
//!
//! # Reference
//! - Danna, Rothberg, Le Pape (2005), "Exploring relaxation induced
//!   neighborhoods to improve MIP solutions"
//! - Atamtürk, Nemhauser, Savelsbergh (2000), "Conflict graphs in solving
//!   integer programming problems"

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::model::{MilpModel, Relation};
use super::{MilpSolution, MilpSolver};

/// Best objective value and assignment found so far.
type Incumbent = (i64, Vec<bool>);

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Nodes visited, over all phases.
    pub nodes: u64,
    /// Alternative branches taken.
    pub backtracks: u64,
    /// Improving solutions found.
    pub solutions: u64,
    /// Variables fixed by propagation or branching.
    pub fixings: u64,
    /// Neighborhoods searched after the dive.
    pub neighborhoods: u64,
}

/// Bundled exact MILP engine for binary models.
///
/// The neighborhood phase is seeded, so a given model and configuration
/// always yield the same solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchAndBoundSolver {
    seed: u64,
    dive_nodes: u64,
    neighborhoods: u32,
    neighborhood_nodes: u64,
}

impl Default for BranchAndBoundSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchAndBoundSolver {
    /// Creates the solver with a 2 000-node dive and 200 neighborhoods of
    /// 500 nodes each.
    pub fn new() -> Self {
        Self {
            seed: 42,
            dive_nodes: 2_000,
            neighborhoods: 200,
            neighborhood_nodes: 500,
        }
    }

    /// Sets the seed of the neighborhood selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the node budget of the first dive.
    pub fn with_dive_nodes(mut self, nodes: u64) -> Self {
        self.dive_nodes = nodes;
        self
    }

    /// Sets how many neighborhoods are searched, and the node budget of
    /// each. Zero neighborhoods skips the phase.
    pub fn with_neighborhoods(mut self, count: u32, nodes: u64) -> Self {
        self.neighborhoods = count;
        self.neighborhood_nodes = nodes;
        self
    }

    /// Solves and also returns the search counters.
    pub fn solve_with_statistics(&self, model: &MilpModel) -> (MilpSolution, SearchStatistics) {
        let mut search = Search::new(model);
        let best = search.run(self);
        let stats = search.stats;
        debug!(
            model = %model.name,
            variables = model.variable_count(),
            constraints = model.constraint_count(),
            nodes = stats.nodes,
            backtracks = stats.backtracks,
            solutions = stats.solutions,
            neighborhoods = stats.neighborhoods,
            "branch and bound finished"
        );
        let solution = match best {
            Some((objective, values)) => {
                debug_assert!(model.is_satisfied(&values));
                MilpSolution::optimal(
                    values.iter().map(|&v| if v { 1.0 } else { 0.0 }).collect(),
                    objective as f64,
                )
            }
            None => MilpSolution::infeasible(),
        };
        (solution, stats)
    }
}

impl MilpSolver for BranchAndBoundSolver {
    fn solve(&self, model: &MilpModel) -> MilpSolution {
        self.solve_with_statistics(model).0
    }
}

/// A constraint normalized to `Σ a·x relation rhs` with merged terms.
struct Row {
    terms: Vec<(usize, i64)>,
    relation: Relation,
    rhs: i64,
    min_activity: i64,
    max_activity: i64,
}

impl Row {
    #[inline]
    fn has_upper(&self) -> bool {
        matches!(self.relation, Relation::LessEqual | Relation::Equal)
    }

    #[inline]
    fn has_lower(&self) -> bool {
        matches!(self.relation, Relation::GreaterEqual | Relation::Equal)
    }

    #[inline]
    fn is_reachable(&self) -> bool {
        (!self.has_upper() || self.min_activity <= self.rhs)
            && (!self.has_lower() || self.max_activity >= self.rhs)
    }

    /// `Σ x ≤ k` (or `= k`) over at least two variables.
    fn is_unit(&self) -> bool {
        self.has_upper() && self.terms.len() >= 2 && self.terms.iter().all(|&(_, a)| a == 1)
    }

    /// A `≥` or `=` row over at least two variables.
    fn is_covering(&self) -> bool {
        self.has_lower() && self.terms.len() >= 2
    }

    /// How many more unit terms can still be set to 1.
    #[inline]
    fn room(&self) -> i64 {
        self.rhs - self.min_activity
    }
}

/// A branching decision on the DFS stack.
struct Frame {
    var: usize,
    trail_mark: usize,
    alternative: Option<bool>,
}

struct Search {
    rows: Vec<Row>,
    occurrences: Vec<Vec<(usize, i64)>>,
    /// Unit rows containing each variable.
    unit_rows: Vec<Vec<usize>>,
    /// First covering row with a positive coefficient for each variable.
    first_cover: Vec<Option<usize>>,
    objective: Vec<i64>,
    constant: i64,
    bound: i64,
    values: Vec<Option<bool>>,
    trail: Vec<usize>,
    queue: Vec<usize>,
    queued: Vec<bool>,
    order: Vec<usize>,
    stats: SearchStatistics,
}

/// Merges duplicate variables and drops zero coefficients.
fn merge_terms(n: usize, terms: impl Iterator<Item = (usize, i64)>) -> Vec<(usize, i64)> {
    let mut dense = vec![0i64; n];
    let mut seen = Vec::new();
    for (var, coef) in terms {
        if dense[var] == 0 {
            seen.push(var);
        }
        dense[var] += coef;
    }
    seen.sort_unstable();
    seen.dedup();
    seen.into_iter()
        .filter(|&v| dense[v] != 0)
        .map(|v| (v, dense[v]))
        .collect()
}

impl Search {
    fn new(model: &MilpModel) -> Self {
        let n = model.variable_count();
        let mut occurrences = vec![Vec::new(); n];
        let rows: Vec<Row> = model
            .constraints()
            .iter()
            .enumerate()
            .map(|(r, c)| {
                let terms = merge_terms(n, c.expr.terms.iter().map(|&(v, a)| (v.index(), a)));
                for &(v, a) in &terms {
                    occurrences[v].push((r, a));
                }
                Row {
                    min_activity: terms.iter().map(|&(_, a)| a.min(0)).sum(),
                    max_activity: terms.iter().map(|&(_, a)| a.max(0)).sum(),
                    terms,
                    relation: c.relation,
                    rhs: c.rhs - c.expr.constant,
                }
            })
            .collect();

        let mut unit_rows = vec![Vec::new(); n];
        let mut first_cover = vec![None; n];
        for (r, row) in rows.iter().enumerate() {
            if row.is_unit() {
                for &(v, _) in &row.terms {
                    unit_rows[v].push(r);
                }
            }
            if row.is_covering() {
                for &(v, a) in &row.terms {
                    if a > 0 && first_cover[v].is_none() {
                        first_cover[v] = Some(r);
                    }
                }
            }
        }

        let mut objective = vec![0i64; n];
        for (v, c) in merge_terms(
            n,
            model.objective().terms.iter().map(|&(v, c)| (v.index(), c)),
        ) {
            objective[v] = c;
        }
        let constant = model.objective().constant;
        let bound = constant + objective.iter().map(|&c| c.max(0)).sum::<i64>();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&v| (Reverse(objective[v]), first_cover[v].unwrap_or(usize::MAX), v));

        let row_count = rows.len();
        Self {
            rows,
            occurrences,
            unit_rows,
            first_cover,
            objective,
            constant,
            bound,
            values: vec![None; n],
            trail: Vec::with_capacity(n),
            queue: (0..row_count).collect(),
            queued: vec![true; row_count],
            order,
            stats: SearchStatistics::default(),
        }
    }

    fn run(&mut self, config: &BranchAndBoundSolver) -> Option<Incumbent> {
        if !self.propagate() {
            return None;
        }
        let mut best = None;
        if self.dfs(&mut best, Some(config.dive_nodes)) {
            return best;
        }
        debug!(nodes = self.stats.nodes, objective = ?best.as_ref().map(|b| b.0), "dive budget spent");
        self.improve(&mut best, config);
        self.dfs(&mut best, None);
        best
    }

    /// Depth-first search below the current state, restored on return.
    /// Returns `true` when the subtree was exhausted within `limit` nodes.
    fn dfs(&mut self, best: &mut Option<Incumbent>, limit: Option<u64>) -> bool {
        let base = self.trail.len();
        let mut stack: Vec<Frame> = Vec::new();
        let mut nodes = 0u64;

        let exhausted = 'search: loop {
            nodes += 1;
            self.stats.nodes += 1;
            if limit.is_some_and(|limit| nodes > limit) {
                break 'search false;
            }
            let promising = match best.as_ref() {
                None => true,
                Some((value, _)) => self.bound > *value && self.cover_bound() > *value,
            };
            if promising {
                match self.next_free() {
                    None => {
                        let values = self.values.iter().map(|v| v.unwrap_or(false)).collect();
                        self.stats.solutions += 1;
                        *best = Some((self.bound, values));
                    }
                    Some(var) => {
                        let first = self.first_value(var);
                        stack.push(Frame {
                            var,
                            trail_mark: self.trail.len(),
                            alternative: Some(!first),
                        });
                        if self.branch(var, first) {
                            continue 'search;
                        }
                    }
                }
            }

            loop {
                let Some(frame) = stack.last_mut() else {
                    break 'search true;
                };
                let var = frame.var;
                let mark = frame.trail_mark;
                let alternative = frame.alternative.take();
                self.undo_to(mark);
                match alternative {
                    Some(value) => {
                        self.stats.backtracks += 1;
                        if self.branch(var, value) {
                            continue 'search;
                        }
                    }
                    None => {
                        stack.pop();
                    }
                }
            }
        };
        self.undo_to(base);
        exhausted
    }

    /// Large neighborhood search around the incumbent.
    fn improve(&mut self, best: &mut Option<Incumbent>, config: &BranchAndBoundSolver) {
        let root_bound = self.cover_bound();
        let mut rng = StdRng::seed_from_u64(config.seed);
        for _ in 0..config.neighborhoods {
            let Some((value, incumbent)) = best.as_ref() else {
                return;
            };
            if *value >= root_bound {
                return;
            }
            let gains: Vec<usize> = (0..self.values.len())
                .filter(|&v| self.objective[v] > 0 && !incumbent[v] && self.values[v].is_none())
                .collect();
            if gains.is_empty() {
                return;
            }
            let center = gains[rng.random_range(0..gains.len())];
            let free = self.neighborhood(center);

            self.stats.neighborhoods += 1;
            let mark = self.trail.len();
            if self.fix_outside(&free, incumbent) {
                self.dfs(best, Some(config.neighborhood_nodes));
            }
            self.undo_to(mark);
        }
        debug!(
            neighborhoods = self.stats.neighborhoods,
            objective = ?best.as_ref().map(|b| b.0),
            "neighborhood search finished"
        );
    }

    /// `center` and every variable sharing a row with it.
    fn neighborhood(&self, center: usize) -> Vec<bool> {
        let mut free = vec![false; self.values.len()];
        free[center] = true;
        for &(row, _) in &self.occurrences[center] {
            for &(var, _) in &self.rows[row].terms {
                free[var] = true;
            }
        }
        free
    }

    /// Fixes every free variable outside `free` to its incumbent value.
    fn fix_outside(&mut self, free: &[bool], incumbent: &[bool]) -> bool {
        for var in 0..free.len() {
            if free[var] || self.values[var].is_some() {
                continue;
            }
            self.fix(var, incumbent[var]);
            if !self.propagate() {
                return false;
            }
        }
        true
    }

    fn next_free(&self) -> Option<usize> {
        self.order.iter().copied().find(|&v| self.values[v].is_none())
    }

    /// Value tried first when branching on `var`.
    fn first_value(&self, var: usize) -> bool {
        if let Some(r) = self.first_cover[var] {
            let row = &self.rows[r];
            let settled = row
                .terms
                .iter()
                .all(|&(u, a)| a > 0 || self.values[u].is_some());
            if settled {
                return row.min_activity < row.rhs;
            }
        }
        self.objective[var] > 0
    }

    /// Objective bound tightened by the unit rows.
    fn cover_bound(&self) -> i64 {
        const UNGROUPED: usize = usize::MAX;
        let n = self.values.len();
        let mut total = self.constant;
        let mut candidate = vec![false; n];
        for v in 0..n {
            match self.values[v] {
                Some(true) => total += self.objective[v],
                None if self.objective[v] > 0 => candidate[v] = true,
                _ => {}
            }
        }

        // Cliques: at most one member of a full-but-one unit row is set.
        let mut group_of = vec![UNGROUPED; n];
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for v in 0..n {
            if !candidate[v] || group_of[v] != UNGROUPED {
                continue;
            }
            let open = |u: usize| candidate[u] && group_of[u] == UNGROUPED;
            let mut widest: Option<(usize, usize)> = None;
            for &r in &self.unit_rows[v] {
                let row = &self.rows[r];
                if row.room() != 1 {
                    continue;
                }
                let size = row.terms.iter().filter(|&&(u, _)| open(u)).count();
                if widest.map_or(true, |(_, best)| size > best) {
                    widest = Some((r, size));
                }
            }
            let members: Vec<usize> = match widest {
                Some((r, _)) => self.rows[r]
                    .terms
                    .iter()
                    .map(|&(u, _)| u)
                    .filter(|&u| open(u))
                    .collect(),
                None => vec![v],
            };
            let g = groups.len();
            for &u in &members {
                group_of[u] = g;
            }
            groups.push(members);
        }

        // Quotas: a unit row with room k takes at most k cliques.
        let mut buckets: BTreeMap<usize, Vec<i64>> = BTreeMap::new();
        for members in &groups {
            let Some((&head, rest)) = members.split_first() else {
                continue;
            };
            let value = members.iter().map(|&u| self.objective[u]).max().unwrap_or(0);
            let mut tightest: Option<(usize, i64)> = None;
            for &r in &self.unit_rows[head] {
                let room = self.rows[r].room();
                if room < 2 || tightest.is_some_and(|(_, best)| room >= best) {
                    continue;
                }
                if rest.iter().all(|u| self.unit_rows[*u].contains(&r)) {
                    tightest = Some((r, room));
                }
            }
            match tightest {
                Some((r, _)) => buckets.entry(r).or_default().push(value),
                None => total += value,
            }
        }
        for (r, mut values) in buckets {
            let room = usize::try_from(self.rows[r].room()).unwrap_or(0);
            values.sort_unstable_by_key(|&v| Reverse(v));
            total += values.iter().take(room).sum::<i64>();
        }
        total
    }

    fn branch(&mut self, var: usize, value: bool) -> bool {
        self.fix(var, value);
        self.propagate()
    }

    fn fix(&mut self, var: usize, value: bool) {
        self.values[var] = Some(value);
        self.trail.push(var);
        self.stats.fixings += 1;
        self.shift_bounds(var, value, 1);
        for k in 0..self.occurrences[var].len() {
            let row = self.occurrences[var][k].0;
            if !self.queued[row] {
                self.queued[row] = true;
                self.queue.push(row);
            }
        }
    }

    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some(var) = self.trail.pop() else {
                break;
            };
            if let Some(value) = self.values[var].take() {
                self.shift_bounds(var, value, -1);
            }
        }
        self.clear_queue();
    }

    /// Applies (`sign = 1`) or reverts (`sign = -1`) the effect of `var = value`.
    fn shift_bounds(&mut self, var: usize, value: bool, sign: i64) {
        let x = i64::from(value);
        for &(row, a) in &self.occurrences[var] {
            let row = &mut self.rows[row];
            row.min_activity += sign * (a * x - a.min(0));
            row.max_activity += sign * (a * x - a.max(0));
        }
        let c = self.objective[var];
        self.bound += sign * (c * x - c.max(0));
    }

    fn clear_queue(&mut self) {
        for row in self.queue.drain(..) {
            self.queued[row] = false;
        }
    }

    fn propagate(&mut self) -> bool {
        while let Some(r) = self.queue.pop() {
            self.queued[r] = false;
            if !self.rows[r].is_reachable() {
                self.clear_queue();
                return false;
            }
            for k in 0..self.rows[r].terms.len() {
                let (var, a) = self.rows[r].terms[k];
                if self.values[var].is_some() {
                    continue;
                }
                let row = &self.rows[r];
                let magnitude = a.abs();
                // Taking the min-raising value would overshoot the upper side.
                let capped = row.has_upper() && magnitude > row.rhs - row.min_activity;
                // Taking the max-lowering value would undershoot the lower side.
                let floored = row.has_lower() && magnitude > row.max_activity - row.rhs;
                match (capped, floored) {
                    (true, true) => {
                        self.clear_queue();
                        return false;
                    }
                    (true, false) => self.fix(var, a < 0),
                    (false, true) => self.fix(var, a > 0),
                    (false, false) => {}
                }
            }
        }
        true
    }
}
