//! The step-wise traversal engine.

use log::{debug, trace};
use mazepath_core::{Grid, Point};

use crate::error::SearchError;
use crate::frontier::{Frontier, NodeRef};
use crate::path::{Path, reconstruct_path};
use crate::strategy::{SearchOptions, Strategy};

/// Sentinel accumulated cost for cells not reached yet.
pub const UNREACHED: u64 = u64::MAX;

/// Where a traversal stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// The frontier still holds cells to expand.
    Running,
    /// The target was dequeued; the path is available.
    Found,
    /// The frontier emptied without reaching the target.
    Exhausted,
}

impl Status {
    #[inline]
    pub fn is_done(self) -> bool {
        self != Self::Running
    }
}

/// Summary of a finished (or abandoned) traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub status: Status,
    /// Cells strictly between start and target. Empty unless found.
    pub path: Path,
    /// Distinct cells expanded.
    pub expanded: usize,
    /// Engine steps taken (frontier pops).
    pub steps: usize,
    /// Moves from start to target along the path, 0 if not found.
    pub moves: usize,
    /// Sum of entry costs along the path, target included.
    pub cost: u64,
}

/// A single traversal over a borrowed [`Grid`].
///
/// Each call to [`step`](Self::step) pops one frontier entry and expands it,
/// so callers can redraw between steps by polling [`grid`](Self::grid).
/// The grid stays borrowed for the lifetime of the search; dropping the
/// search abandons it and leaves the partial traversal flags in place until
/// the next reset.
pub struct Search<'g> {
    grid: &'g mut Grid,
    strategy: Strategy,
    options: SearchOptions,
    start: Point,
    target: Point,
    frontier: Frontier,
    best: Vec<u64>,
    status: Status,
    path: Path,
    expanded: usize,
    steps: usize,
    // DFS dead-end handling.
    restart_pending: bool,
    restarting: bool,
}

impl<'g> Search<'g> {
    /// Start a search with default [`SearchOptions`].
    pub fn new(
        grid: &'g mut Grid,
        strategy: Strategy,
        start: Point,
        target: Point,
    ) -> Result<Self, SearchError> {
        Self::with_options(grid, strategy, start, target, SearchOptions::default())
    }

    /// Start a search between the grid's own start and target cells.
    pub fn from_roles(
        grid: &'g mut Grid,
        strategy: Strategy,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        let (start, target) = grid.endpoints()?;
        Self::with_options(grid, strategy, start, target, options)
    }

    /// Start a search.
    ///
    /// Both endpoints must be open cells inside the grid. The grid's
    /// traversal state is reset before the start cell is seeded. When
    /// `start == target` the search is already [`Status::Found`] with an
    /// empty path and no cell expanded.
    pub fn with_options(
        grid: &'g mut Grid,
        strategy: Strategy,
        start: Point,
        target: Point,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        grid.check_open(start)?;
        grid.check_open(target)?;
        grid.reset_traversal_state();

        let len = grid.len();
        let mut search = Self {
            grid,
            strategy,
            options,
            start,
            target,
            frontier: Frontier::for_strategy(strategy),
            best: vec![UNREACHED; len],
            status: Status::Running,
            path: Path::default(),
            expanded: 0,
            steps: 0,
            restart_pending: false,
            restarting: false,
        };
        debug!("{strategy} search from {start} to {target}");

        if start == target {
            search.status = Status::Found;
            return Ok(search);
        }

        let h = search.estimate(start);
        search.set_best(start, 0);
        let cell = &mut search.grid[start];
        cell.mark_queued();
        if strategy.heuristic().is_some() {
            cell.record_heuristic(h);
        }
        let priority = match strategy {
            Strategy::AStar(_) | Strategy::Greedy(_) => h,
            Strategy::Bfs | Strategy::Dfs | Strategy::Ucs => 0.0,
        };
        search.frontier.push(NodeRef {
            pos: start,
            priority,
            g: 0,
        });
        Ok(search)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Read-only view of the grid for rendering between steps.
    #[inline]
    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// The reconstructed path; empty until [`Status::Found`].
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of distinct cells expanded so far.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of steps taken so far.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of entries currently in the frontier.
    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Best accumulated cost known for `p`, if the strategy tracks costs and
    /// `p` has been reached.
    pub fn cost_to(&self, p: Point) -> Option<u64> {
        let i = self.grid.index(p)?;
        match self.best[i] {
            UNREACHED => None,
            g => Some(g),
        }
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Perform one step: pop a frontier entry and expand it.
    ///
    /// Returns the status after the step. Once the search is done further
    /// calls change nothing.
    pub fn step(&mut self) -> Result<Status, SearchError> {
        if self.status.is_done() {
            return Ok(self.status);
        }
        if self.restart_pending {
            self.restart_pending = false;
            self.restarting = true;
            self.frontier.push(NodeRef {
                pos: self.start,
                priority: 0.0,
                g: 0,
            });
        }
        let Some(node) = self.pop_live() else {
            self.finish(Status::Exhausted);
            return Ok(self.status);
        };
        self.steps += 1;
        let current = node.pos;
        trace!(
            "{} step {}: expand {current}, frontier {}",
            self.strategy,
            self.steps,
            self.frontier.len()
        );

        let cell = &mut self.grid[current];
        if !cell.is_visited() {
            cell.mark_visited();
            self.expanded += 1;
        }

        if current == self.target {
            self.path = reconstruct_path(&*self.grid, self.start, self.target)?;
            self.finish(Status::Found);
            return Ok(self.status);
        }

        match self.strategy {
            Strategy::Bfs => self.expand_bfs(current),
            Strategy::Dfs => self.expand_dfs(current),
            Strategy::Ucs | Strategy::AStar(_) => self.expand_relaxing(current, node.g),
            Strategy::Greedy(_) => self.expand_greedy(current),
        }

        if self.frontier.is_empty() && !self.restart_pending {
            self.finish(Status::Exhausted);
        }
        Ok(self.status)
    }

    /// Step until the search is done.
    pub fn run(self) -> Result<SearchResult, SearchError> {
        self.run_with(|_, _| {})
    }

    /// Step until the search is done, calling `on_step` with the grid and the
    /// status after every step.
    pub fn run_with(
        mut self,
        mut on_step: impl FnMut(&Grid, Status),
    ) -> Result<SearchResult, SearchError> {
        while !self.status.is_done() {
            let status = self.step()?;
            on_step(&*self.grid, status);
        }
        Ok(self.result())
    }

    /// Snapshot of the current outcome.
    pub fn result(&self) -> SearchResult {
        let found = self.status == Status::Found;
        let moves = if found && self.start != self.target {
            self.path.len() + 1
        } else {
            0
        };
        let cost = if moves > 0 {
            self.path
                .iter()
                .chain(std::iter::once(self.target))
                .map(|p| self.options.step_cost(self.grid[p].cost()))
                .sum::<u64>()
        } else {
            0
        };
        SearchResult {
            status: self.status,
            path: self.path.clone(),
            expanded: self.expanded,
            steps: self.steps,
            moves,
            cost,
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn finish(&mut self, status: Status) {
        self.status = status;
        debug!(
            "{} search from {} to {}: {:?} after {} steps, {} cells expanded",
            self.strategy, self.start, self.target, status, self.steps, self.expanded
        );
    }

    /// Pop the next entry, skipping ones superseded since they were pushed.
    fn pop_live(&mut self) -> Option<NodeRef> {
        while let Some(node) = self.frontier.pop() {
            let stale = match self.strategy {
                Strategy::Ucs | Strategy::AStar(_) => node.g > self.best_of(node.pos),
                Strategy::Greedy(_) => self.grid[node.pos].is_visited(),
                Strategy::Bfs | Strategy::Dfs => false,
            };
            if !stale {
                return Some(node);
            }
        }
        None
    }

    fn expand_bfs(&mut self, current: Point) {
        let neighbors = self.grid[current].neighbors().to_vec();
        for n in neighbors {
            let cell = &mut self.grid[n];
            if cell.is_queued() || cell.is_wall() {
                continue;
            }
            cell.mark_queued();
            cell.set_parent(current);
            self.frontier.push(NodeRef {
                pos: n,
                priority: 0.0,
                g: 0,
            });
        }
    }

    /// Push every unvisited open neighbour. A cell with none is a dead end:
    /// the next step re-seeds the stack with the start cell, on top of the
    /// entries still pending. A re-seeded start that is itself a dead end
    /// does not trigger another restart.
    fn expand_dfs(&mut self, current: Point) {
        let reseed = self.restarting && current == self.start;
        self.restarting = false;

        let neighbors = self.grid[current].neighbors().to_vec();
        let mut pushed = false;
        for n in neighbors {
            let cell = &mut self.grid[n];
            if cell.is_visited() || cell.is_wall() {
                continue;
            }
            cell.mark_queued();
            cell.set_parent(current);
            self.frontier.push(NodeRef {
                pos: n,
                priority: 0.0,
                g: 0,
            });
            pushed = true;
        }
        if !pushed && !reseed {
            self.restart_pending = true;
        }
    }

    /// UCS and A*: relax every open neighbour, re-pushing on strict
    /// improvement.
    fn expand_relaxing(&mut self, current: Point, g: u64) {
        let neighbors = self.grid[current].neighbors().to_vec();
        for n in neighbors {
            if self.grid[n].is_wall() {
                continue;
            }
            let tentative = g.saturating_add(self.options.step_cost(self.grid[n].cost()));
            if tentative >= self.best_of(n) {
                continue;
            }
            self.set_best(n, tentative);
            let priority = match self.strategy {
                Strategy::AStar(_) => {
                    let h = self.estimate(n);
                    self.grid[n].record_heuristic(h);
                    tentative as f64 + h
                }
                _ => tentative as f64,
            };
            let cell = &mut self.grid[n];
            cell.set_parent(current);
            cell.mark_queued();
            self.frontier.push(NodeRef {
                pos: n,
                priority,
                g: tentative,
            });
        }
    }

    /// Greedy best-first: first discovery wins, no relaxation.
    fn expand_greedy(&mut self, current: Point) {
        let neighbors = self.grid[current].neighbors().to_vec();
        for n in neighbors {
            let cell = &self.grid[n];
            if cell.is_wall() || cell.is_queued() || cell.is_visited() {
                continue;
            }
            let h = self.estimate(n);
            let cell = &mut self.grid[n];
            cell.record_heuristic(h);
            cell.set_parent(current);
            cell.mark_queued();
            self.frontier.push(NodeRef {
                pos: n,
                priority: h,
                g: 0,
            });
        }
    }

    /// Heuristic for `p` under the current strategy and options; 0 for
    /// uninformed strategies.
    fn estimate(&self, p: Point) -> f64 {
        let Some(h) = self.strategy.heuristic() else {
            return 0.0;
        };
        let mut est = h.estimate(p, self.target);
        if self.options.heuristic_includes_cost {
            est += f64::from(self.grid[p].cost());
        }
        est
    }

    #[inline]
    fn best_of(&self, p: Point) -> u64 {
        self.grid.index(p).map_or(UNREACHED, |i| self.best[i])
    }

    #[inline]
    fn set_best(&mut self, p: Point, g: u64) {
        if let Some(i) = self.grid.index(p) {
            self.best[i] = g;
        }
    }
}

/// Run the strategy called `name` (see [`Strategy::name`]) to completion with
/// default options.
pub fn run_strategy(
    name: &str,
    grid: &mut Grid,
    start: Point,
    target: Point,
) -> Result<SearchResult, SearchError> {
    run_strategy_with(name, grid, start, target, SearchOptions::default())
}

/// Like [`run_strategy`] with explicit options.
pub fn run_strategy_with(
    name: &str,
    grid: &mut Grid,
    start: Point,
    target: Point,
    options: SearchOptions,
) -> Result<SearchResult, SearchError> {
    let strategy: Strategy = name.parse()?;
    Search::with_options(grid, strategy, start, target, options)?.run()
}

#[cfg(test)]
mod tests {
    use std::cmp::Reverse;
    use std::collections::{BinaryHeap, HashSet, VecDeque};

    use mazepath_core::GridError;
    use mazepath_gen::MazeGen;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    use super::*;
    use crate::strategy::Heuristic;

    const MANHATTAN: Strategy = Strategy::AStar(Heuristic::Manhattan);
    const EUCLIDEAN: Strategy = Strategy::AStar(Heuristic::Euclidean);

    fn open_grid(n: i32) -> Grid {
        Grid::new(n, n).unwrap()
    }

    fn walls(grid: &mut Grid, pts: &[(i32, i32)]) {
        for &(x, y) in pts {
            grid.set_wall(Point::new(x, y), true).unwrap();
        }
    }

    /// Random interior walls, keeping `keep` open.
    fn scatter_walls(grid: &mut Grid, rng: &mut StdRng, pct: u32, keep: &[Point]) {
        for p in grid.bounds().shift(1, 1, -1, -1) {
            if !keep.contains(&p) && rng.random_range(0..100) < pct {
                grid.set_wall(p, true).unwrap();
            }
        }
    }

    fn scatter_costs(grid: &mut Grid, rng: &mut StdRng, max: u32) {
        for p in grid.bounds() {
            grid.set_cost(p, rng.random_range(1..=max)).unwrap();
        }
    }

    /// Full start→target sequence of a found result.
    fn full_route(start: Point, target: Point, res: &SearchResult) -> Vec<Point> {
        let mut route = vec![start];
        route.extend(res.path.forward());
        route.push(target);
        route
    }

    fn assert_valid_route(grid: &Grid, start: Point, target: Point, res: &SearchResult) {
        assert_eq!(res.status, Status::Found);
        let route = full_route(start, target, res);
        let unique: HashSet<Point> = route.iter().copied().collect();
        assert_eq!(unique.len(), route.len(), "route revisits a cell: {route:?}");
        for w in route.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} and {} not adjacent", w[0], w[1]);
        }
        for p in &route {
            assert!(grid.is_open(*p), "route crosses wall at {p}");
        }
        assert_eq!(res.moves, route.len() - 1);
    }

    /// Independent shortest move count.
    fn bfs_moves(grid: &Grid, start: Point, target: Point) -> Option<usize> {
        let mut dist = vec![usize::MAX; grid.len()];
        let mut queue = VecDeque::from([start]);
        dist[grid.index(start).unwrap()] = 0;
        while let Some(p) = queue.pop_front() {
            let d = dist[grid.index(p).unwrap()];
            if p == target {
                return Some(d);
            }
            for &n in grid[p].neighbors() {
                let i = grid.index(n).unwrap();
                if grid.is_open(n) && dist[i] == usize::MAX {
                    dist[i] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    /// Independent minimum entry cost.
    fn min_cost(grid: &Grid, start: Point, target: Point) -> Option<u64> {
        let mut dist = vec![u64::MAX; grid.len()];
        let mut heap = BinaryHeap::from([Reverse((0u64, grid.index(start).unwrap()))]);
        dist[grid.index(start).unwrap()] = 0;
        while let Some(Reverse((d, i))) = heap.pop() {
            if d > dist[i] {
                continue;
            }
            let p = grid.point(i);
            if p == target {
                return Some(d);
            }
            for &n in grid[p].neighbors() {
                if !grid.is_open(n) {
                    continue;
                }
                let ni = grid.index(n).unwrap();
                let nd = d + u64::from(grid[n].cost());
                if nd < dist[ni] {
                    dist[ni] = nd;
                    heap.push(Reverse((nd, ni)));
                }
            }
        }
        None
    }

    type Snapshot = Vec<(bool, bool, Option<Point>, u64)>;

    fn snapshot(grid: &Grid) -> Snapshot {
        grid.cells()
            .map(|c| {
                (
                    c.is_queued(),
                    c.is_visited(),
                    c.parent(),
                    c.heuristic().to_bits(),
                )
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Scenarios
    // -----------------------------------------------------------------------

    #[test]
    fn bfs_open_five_by_five() {
        let mut g = open_grid(5);
        let (s, t) = (Point::new(1, 1), Point::new(3, 3));
        let res = Search::new(&mut g, Strategy::Bfs, s, t).unwrap().run().unwrap();
        assert_eq!(res.status, Status::Found);
        assert_eq!(res.moves, 4);
        assert_eq!(res.cost, 4);
        assert_eq!(res.path.len(), 3);
        assert_valid_route(&g, s, t, &res);
    }

    #[test]
    fn walled_in_start_exhausts_every_strategy() {
        for strategy in Strategy::ALL {
            let mut g = open_grid(7);
            walls(&mut g, &[(1, 2), (2, 1)]);
            let res = Search::new(&mut g, strategy, Point::new(1, 1), Point::new(5, 5))
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(res.status, Status::Exhausted, "{strategy}");
            assert!(res.path.is_empty());
            assert_eq!(res.moves, 0);
            assert_eq!(res.cost, 0);
        }
    }

    #[test]
    fn start_equals_target_is_found_immediately() {
        for strategy in Strategy::ALL {
            let mut g = open_grid(5);
            let p = Point::new(2, 2);
            let search = Search::new(&mut g, strategy, p, p).unwrap();
            assert_eq!(search.status(), Status::Found);
            let res = search.run().unwrap();
            assert_eq!(res.status, Status::Found);
            assert!(res.path.is_empty());
            assert_eq!(res.expanded, 0);
            assert_eq!(res.steps, 0);
            assert_eq!(res.moves, 0);
            assert!(g.cells().all(|c| !c.is_queued() && !c.is_visited()));
        }
    }

    #[test]
    fn unreachable_target_exhausts() {
        for strategy in Strategy::ALL {
            let mut g = open_grid(9);
            // Vertical wall splitting the grid.
            for y in 1..8 {
                g.set_wall(Point::new(4, y), true).unwrap();
            }
            let res = Search::new(&mut g, strategy, Point::new(1, 4), Point::new(7, 4))
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(res.status, Status::Exhausted, "{strategy}");
            assert!(res.path.is_empty());
            // Everything on the start side got expanded.
            assert_eq!(res.expanded, 21, "{strategy}");
        }
    }

    // -----------------------------------------------------------------------
    // Configuration errors
    // -----------------------------------------------------------------------

    #[test]
    fn endpoints_on_walls_rejected() {
        let mut g = open_grid(5);
        let err = Search::new(&mut g, Strategy::Bfs, Point::new(0, 0), Point::new(2, 2))
            .err()
            .unwrap();
        assert_eq!(
            err,
            SearchError::InvalidConfiguration(GridError::Wall(Point::new(0, 0)))
        );
        assert!(!err.is_internal());

        let err = Search::new(&mut g, Strategy::Bfs, Point::new(2, 2), Point::new(5, 2))
            .err()
            .unwrap();
        assert_eq!(
            err,
            SearchError::InvalidConfiguration(GridError::OutOfBounds(Point::new(5, 2)))
        );
    }

    #[test]
    fn from_roles_requires_roles() {
        let mut g = open_grid(5);
        let err = Search::from_roles(&mut g, Strategy::Ucs, SearchOptions::default())
            .err()
            .unwrap();
        assert_eq!(err, SearchError::InvalidConfiguration(GridError::MissingStart));

        g.set_start(Point::new(1, 1)).unwrap();
        g.set_target(Point::new(3, 1)).unwrap();
        let res = Search::from_roles(&mut g, Strategy::Ucs, SearchOptions::default())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(res.moves, 2);
    }

    #[test]
    fn run_strategy_by_name() {
        let mut g = open_grid(6);
        let res = run_strategy("greedy-euclidean", &mut g, Point::new(1, 1), Point::new(4, 4))
            .unwrap();
        assert_valid_route(&g, Point::new(1, 1), Point::new(4, 4), &res);

        let err = run_strategy("teleport", &mut g, Point::new(1, 1), Point::new(4, 4)).unwrap_err();
        assert_eq!(err, SearchError::UnknownStrategy("teleport".into()));
    }

    // -----------------------------------------------------------------------
    // Stepping
    // -----------------------------------------------------------------------

    #[test]
    fn step_is_one_pop_at_a_time() {
        let mut g = open_grid(6);
        let mut search = Search::new(&mut g, Strategy::Bfs, Point::new(1, 1), Point::new(4, 4))
            .unwrap();
        assert_eq!(search.frontier_len(), 1);
        assert_eq!(search.step().unwrap(), Status::Running);
        assert_eq!(search.steps(), 1);
        assert_eq!(search.expanded(), 1);
        assert!(search.grid()[Point::new(1, 1)].is_visited());
        assert!(search.grid()[Point::new(2, 1)].is_queued());
        assert!(!search.grid()[Point::new(2, 1)].is_visited());
        assert_eq!(search.frontier_len(), 2);
    }

    #[test]
    fn finished_search_does_not_mutate() {
        let mut g = open_grid(5);
        let mut search = Search::new(&mut g, Strategy::Dfs, Point::new(1, 1), Point::new(3, 1))
            .unwrap();
        while search.step().unwrap() == Status::Running {}
        let before = snapshot(search.grid());
        let steps = search.steps();
        assert_eq!(search.step().unwrap(), Status::Found);
        assert_eq!(search.steps(), steps);
        assert_eq!(snapshot(search.grid()), before);
    }

    #[test]
    fn run_with_reports_every_step() {
        let mut g = open_grid(8);
        let mut seen = Vec::new();
        let res = Search::new(&mut g, MANHATTAN, Point::new(1, 1), Point::new(6, 6))
            .unwrap()
            .run_with(|grid, status| {
                seen.push((status, grid.cells().filter(|c| c.is_visited()).count()))
            })
            .unwrap();
        assert_eq!(seen.len(), res.steps);
        assert_eq!(seen.last().map(|s| s.0), Some(Status::Found));
        assert!(seen.iter().rev().skip(1).all(|s| s.0 == Status::Running));
        assert!(seen.windows(2).all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn abandoned_search_leaves_flags_until_reset() {
        let mut g = open_grid(8);
        {
            let mut search =
                Search::new(&mut g, Strategy::Bfs, Point::new(1, 1), Point::new(6, 6)).unwrap();
            search.step().unwrap();
            search.step().unwrap();
        }
        assert!(g[Point::new(1, 1)].is_visited());
        g.reset_traversal_state();
        assert!(g.cells().all(|c| !c.is_visited() && !c.is_queued()));
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn every_strategy_returns_valid_route() {
        let mut rng = StdRng::seed_from_u64(11);
        for round in 0..20 {
            let (s, t) = (Point::new(1, 1), Point::new(13, 11));
            let mut g = Grid::new(15, 13).unwrap();
            scatter_walls(&mut g, &mut rng, 25, &[s, t]);
            let reachable = bfs_moves(&g, s, t).is_some();
            for strategy in Strategy::ALL {
                let res = Search::new(&mut g, strategy, s, t).unwrap().run().unwrap();
                if reachable {
                    assert_valid_route(&g, s, t, &res);
                } else {
                    assert_eq!(res.status, Status::Exhausted, "{strategy} round {round}");
                }
            }
        }
    }

    #[test]
    fn bfs_finds_fewest_moves() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let (s, t) = (Point::new(2, 1), Point::new(10, 12));
            let mut g = Grid::new(14, 14).unwrap();
            scatter_walls(&mut g, &mut rng, 30, &[s, t]);
            let res = Search::new(&mut g, Strategy::Bfs, s, t).unwrap().run().unwrap();
            match bfs_moves(&g, s, t) {
                Some(d) => assert_eq!(res.moves, d),
                None => assert_eq!(res.status, Status::Exhausted),
            }
        }
    }

    #[test]
    fn cost_aware_strategies_are_optimal() {
        let mut rng = StdRng::seed_from_u64(29);
        for _ in 0..15 {
            let (s, t) = (Point::new(1, 10), Point::new(14, 2));
            let mut g = Grid::new(16, 12).unwrap();
            scatter_walls(&mut g, &mut rng, 20, &[s, t]);
            scatter_costs(&mut g, &mut rng, 9);
            let Some(best) = min_cost(&g, s, t) else {
                continue;
            };
            for strategy in [Strategy::Ucs, MANHATTAN, EUCLIDEAN] {
                let res = Search::new(&mut g, strategy, s, t).unwrap().run().unwrap();
                assert_valid_route(&g, s, t, &res);
                assert_eq!(res.cost, best, "{strategy}");
            }
        }
    }

    #[test]
    fn astar_expands_no_more_than_ucs() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..10 {
            let (s, t) = (Point::new(1, 1), Point::new(12, 9));
            let mut g = Grid::new(14, 11).unwrap();
            scatter_walls(&mut g, &mut rng, 15, &[s, t]);
            scatter_costs(&mut g, &mut rng, 5);
            let ucs = Search::new(&mut g, Strategy::Ucs, s, t).unwrap().run().unwrap();
            let astar = Search::new(&mut g, MANHATTAN, s, t).unwrap().run().unwrap();
            assert!(astar.expanded <= ucs.expanded);
            assert_eq!(astar.cost, ucs.cost);
        }
    }

    #[test]
    fn astar_beelines_on_open_row() {
        let mut g = open_grid(15);
        let (s, t) = (Point::new(1, 7), Point::new(13, 7));
        let ucs = Search::new(&mut g, Strategy::Ucs, s, t).unwrap().run().unwrap();
        let astar = Search::new(&mut g, MANHATTAN, s, t).unwrap().run().unwrap();
        assert_eq!(astar.expanded, 13);
        assert!(astar.expanded < ucs.expanded);
        assert_eq!(astar.moves, 12);
    }

    #[test]
    fn unit_cost_option_ignores_cell_costs() {
        let mut g = open_grid(7);
        // Expensive straight line, cheap detour.
        for x in 2..5 {
            g.set_cost(Point::new(x, 1), 50).unwrap();
        }
        let (s, t) = (Point::new(1, 1), Point::new(5, 1));

        let weighted = Search::new(&mut g, Strategy::Ucs, s, t).unwrap().run().unwrap();
        assert_eq!(weighted.moves, 6);
        assert_eq!(weighted.cost, 6);

        let unit = Search::with_options(&mut g, Strategy::Ucs, s, t, SearchOptions::unit_cost())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(unit.moves, 4);
        assert_eq!(unit.cost, 4);
    }

    #[test]
    fn ucs_relaxes_to_cheaper_parent() {
        let mut g = open_grid(5);
        g.set_cost(Point::new(2, 1), 9).unwrap();
        let (s, t) = (Point::new(1, 1), Point::new(3, 1));
        let res = Search::new(&mut g, Strategy::Ucs, s, t).unwrap().run().unwrap();
        assert_eq!(res.cost, 4);
        assert!(!res.path.contains(Point::new(2, 1)));
        assert_valid_route(&g, s, t, &res);
    }

    #[test]
    fn heuristic_including_cost_still_finds_route() {
        let mut rng = StdRng::seed_from_u64(17);
        let (s, t) = (Point::new(1, 1), Point::new(10, 10));
        let mut g = open_grid(12);
        scatter_costs(&mut g, &mut rng, 20);
        let opts = SearchOptions::default().with_heuristic_cost(true);
        for strategy in [MANHATTAN, Strategy::Greedy(Heuristic::Euclidean)] {
            let res = Search::with_options(&mut g, strategy, s, t, opts)
                .unwrap()
                .run()
                .unwrap();
            assert_valid_route(&g, s, t, &res);
            assert!(g[Point::new(1, 2)].heuristic().is_finite());
        }
    }

    #[test]
    fn greedy_expands_each_cell_once() {
        let mut g = open_grid(10);
        walls(&mut g, &[(5, 2), (5, 3), (5, 4), (5, 5), (5, 6)]);
        let (s, t) = (Point::new(2, 4), Point::new(8, 4));
        let res = Search::new(&mut g, Strategy::Greedy(Heuristic::Manhattan), s, t)
            .unwrap()
            .run()
            .unwrap();
        assert_valid_route(&g, s, t, &res);
        assert_eq!(res.steps, res.expanded);
    }

    #[test]
    fn dfs_reseeds_from_start_after_dead_end() {
        // The upper-right branch is a dead end; the target stays pending
        // below it on the stack.
        //   #######
        //   #S.#..#
        //   ##.#.##
        //   ##...T#
        //   #######
        let mut g = Grid::new(7, 5).unwrap();
        walls(&mut g, &[(3, 1), (1, 2), (3, 2), (5, 2), (1, 3)]);
        let (s, t) = (Point::new(1, 1), Point::new(5, 3));
        let res = Search::new(&mut g, Strategy::Dfs, s, t).unwrap().run().unwrap();
        assert_valid_route(&g, s, t, &res);
        assert_eq!(res.path.len(), 5);
        // One extra pop for the re-seeded start.
        assert_eq!(res.expanded, 10);
        assert_eq!(res.steps, res.expanded + 1);
    }

    #[test]
    fn dfs_reseed_pushes_unvisited_start_neighbors() {
        //   #######
        //   #T.S..#
        //   #######
        let mut g = Grid::new(7, 3).unwrap();
        let (s, t) = (Point::new(3, 1), Point::new(1, 1));
        let mut search = Search::new(&mut g, Strategy::Dfs, s, t).unwrap();

        // Start, then right into the dead end at (5, 1).
        for _ in 0..3 {
            assert_eq!(search.step().unwrap(), Status::Running);
        }
        assert!(search.grid()[Point::new(5, 1)].is_visited());
        assert!(!search.grid()[Point::new(2, 1)].is_visited());
        assert_eq!(search.frontier_len(), 1);

        // The re-seeded start pushes its remaining open neighbour again.
        assert_eq!(search.step().unwrap(), Status::Running);
        assert_eq!(search.steps(), 4);
        assert_eq!(search.expanded(), 3);
        assert_eq!(search.frontier_len(), 2);
        assert_eq!(search.grid()[Point::new(2, 1)].parent(), Some(s));

        while search.step().unwrap() == Status::Running {}
        assert_eq!(search.status(), Status::Found);
        assert_eq!(search.path().as_slice(), &[Point::new(2, 1)]);
        assert_eq!(search.steps(), search.expanded() + 1);
    }

    #[test]
    fn broken_chain_is_not_reported_as_found() {
        //   #####
        //   #S.T#
        //   #####
        let mut g = Grid::new(5, 3).unwrap();
        let (s, t) = (Point::new(1, 1), Point::new(3, 1));
        let mut search = Search::new(&mut g, Strategy::Bfs, s, t).unwrap();
        search.step().unwrap();
        search.step().unwrap();
        // Loop the chain: (2, 1) -> (3, 1) -> (2, 1).
        search.grid[Point::new(2, 1)].set_parent(t);

        let err = search.step().unwrap_err();
        assert!(matches!(err, SearchError::BrokenChain(_)));
        assert!(err.is_internal());
        assert_eq!(search.status(), Status::Running);
        assert!(search.path().is_empty());
    }

    #[test]
    fn dfs_terminates_on_open_grid() {
        let mut g = open_grid(12);
        let (s, t) = (Point::new(10, 10), Point::new(1, 1));
        let res = Search::new(&mut g, Strategy::Dfs, s, t).unwrap().run().unwrap();
        assert_valid_route(&g, s, t, &res);
        assert!(res.expanded <= g.count_open());
    }

    #[test]
    fn start_keeps_no_parent() {
        for strategy in Strategy::ALL {
            let mut g = open_grid(9);
            let s = Point::new(4, 4);
            Search::new(&mut g, strategy, s, Point::new(7, 7))
                .unwrap()
                .run()
                .unwrap();
            assert_eq!(g[s].parent(), None, "{strategy}");
        }
    }

    #[test]
    fn reset_then_rerun_is_identical() {
        let mut rng = StdRng::seed_from_u64(41);
        let (s, t) = (Point::new(1, 1), Point::new(12, 12));
        let mut g = open_grid(14);
        scatter_walls(&mut g, &mut rng, 20, &[s, t]);
        scatter_costs(&mut g, &mut rng, 7);
        for strategy in Strategy::ALL {
            let mut fresh = g.clone();
            let first = Search::new(&mut fresh, strategy, s, t).unwrap().run().unwrap();
            let expected = snapshot(&fresh);

            // Dirty the grid with another strategy, then reset and rerun.
            let mut reused = g.clone();
            Search::new(&mut reused, Strategy::Dfs, t, s).unwrap().run().unwrap();
            reused.reset_traversal_state();
            let second = Search::new(&mut reused, strategy, s, t).unwrap().run().unwrap();

            assert_eq!(first, second, "{strategy}");
            assert_eq!(snapshot(&reused), expected, "{strategy}");
        }
    }

    #[test]
    fn cost_to_tracks_accumulated_cost() {
        let mut g = open_grid(6);
        g.set_cost(Point::new(2, 1), 4).unwrap();
        let mut search = Search::new(&mut g, Strategy::Ucs, Point::new(1, 1), Point::new(4, 4))
            .unwrap();
        assert_eq!(search.cost_to(Point::new(1, 1)), Some(0));
        search.step().unwrap();
        assert_eq!(search.cost_to(Point::new(2, 1)), Some(4));
        assert_eq!(search.cost_to(Point::new(1, 2)), Some(1));
        assert_eq!(search.cost_to(Point::new(4, 4)), None);
    }

    #[test]
    fn every_strategy_agrees_in_a_perfect_maze() {
        let mut g = Grid::new(31, 31).unwrap();
        let mut mg = MazeGen::new(StdRng::seed_from_u64(23));
        mg.generate_maze(&mut g).unwrap();
        mg.assign_random_costs(&mut g, 1, 50).unwrap();
        let (s, t) = (Point::new(1, 1), Point::new(29, 29));
        let expected = bfs_moves(&g, s, t).unwrap();

        let mut routes = Vec::new();
        for strategy in Strategy::ALL {
            let res = Search::new(&mut g, strategy, s, t).unwrap().run().unwrap();
            assert_valid_route(&g, s, t, &res);
            assert_eq!(res.moves, expected, "{strategy}");
            routes.push(res.path);
        }
        assert!(routes.windows(2).all(|w| w[0] == w[1]));
    }
}
