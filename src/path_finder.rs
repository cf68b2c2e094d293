use crate::bfs::SearchContext;
use crate::occupancy::OccupancyGrid;
use crate::{Coord, DistanceMap, PathResult, Result};
use itertools::Itertools;
use log::debug;
use smallvec::SmallVec;

/// Result of a search together with the distance labels it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub result: PathResult,
    /// Every cell discovered before the search stopped, labelled with its distance from the
    /// start.
    pub distances: DistanceMap,
}

/// Breadth-first shortest paths on a 4-connected grid. Stateless: each call allocates its own
/// search context, so a single [PathFinder] can be shared freely.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathFinder;

impl PathFinder {
    pub fn new() -> PathFinder {
        PathFinder
    }

    fn check_input<G: OccupancyGrid>(grid: &G, start: Coord, destination: Coord) -> Result<()> {
        grid.check_shape()?;
        grid.check_bounds(start)?;
        grid.check_bounds(destination)
    }

    /// Successors never leave a blocked cell, so a start placed on an obstacle explores nothing.
    fn successors<G: OccupancyGrid>(grid: &G, node: &Coord) -> SmallVec<[Coord; 4]> {
        if grid.is_obstacle(*node) {
            SmallVec::new()
        } else {
            grid.free_neighbours(node)
        }
    }

    /// Computes a shortest path from `start` to `destination`. The returned path starts with the
    /// first step after `start` and ends with `destination`; it is empty if both are equal.
    pub fn find_path<G: OccupancyGrid>(
        &self,
        grid: &G,
        start: Coord,
        destination: Coord,
    ) -> Result<PathResult> {
        self.find_path_observed(grid, start, destination, |_, _| {})
    }

    /// Like [find_path](Self::find_path), but calls `on_observed` with each cell and its distance
    /// as the cell is dequeued. The start cell is not reported.
    pub fn find_path_observed<G, F>(
        &self,
        grid: &G,
        start: Coord,
        destination: Coord,
        on_observed: F,
    ) -> Result<PathResult>
    where
        G: OccupancyGrid,
        F: FnMut(Coord, u32),
    {
        self.search_observed(grid, start, destination, on_observed)
            .map(|report| report.result)
    }

    /// Computes a path and returns it with the distance labels of the search.
    pub fn search<G: OccupancyGrid>(
        &self,
        grid: &G,
        start: Coord,
        destination: Coord,
    ) -> Result<SearchReport> {
        self.search_observed(grid, start, destination, |_, _| {})
    }

    pub fn search_observed<G, F>(
        &self,
        grid: &G,
        start: Coord,
        destination: Coord,
        mut on_observed: F,
    ) -> Result<SearchReport>
    where
        G: OccupancyGrid,
        F: FnMut(Coord, u32),
    {
        Self::check_input(grid, start, destination)?;
        if start == destination {
            return Ok(SearchReport {
                result: PathResult::Found(Vec::new()),
                distances: DistanceMap::new(start),
            });
        }
        let mut ct = SearchContext::new();
        let found = ct.bfs(
            &start,
            |node| Self::successors(grid, node),
            |node| *node == destination,
            |node, dist| on_observed(*node, dist),
        );
        let distances = DistanceMap::from_context(start, &ct);
        let result = match found {
            Some((path, dist)) => {
                debug!("Path from {} to {} has length {}", start, destination, dist);
                // The context path includes the start, which is not part of the result.
                PathResult::Found(path.into_iter().skip(1).collect())
            }
            None => {
                debug!("{} is not reachable from {}", destination, start);
                PathResult::NotFound
            }
        };
        Ok(SearchReport { result, distances })
    }

    /// Labels every cell reachable from `source` with its distance, without stopping early.
    pub fn distance_field<G: OccupancyGrid>(&self, grid: &G, source: Coord) -> Result<DistanceMap> {
        Self::check_input(grid, source, source)?;
        let mut ct = SearchContext::new();
        ct.bfs(
            &source,
            |node| Self::successors(grid, node),
            |_| false,
            |_, _| {},
        );
        Ok(DistanceMap::from_context(source, &ct))
    }

    /// Walks downhill through `field` from `start` to the field's source, each time stepping to
    /// the labelled neighbour with the smallest distance (ties go to the earlier direction in
    /// [NEIGHBOUR_ORDER](crate::NEIGHBOUR_ORDER)). The path has the same shape as one returned
    /// by [find_path](Self::find_path).
    pub fn descend(&self, field: &DistanceMap, start: Coord) -> PathResult {
        let Some(mut current_dist) = field.get(&start) else {
            return PathResult::NotFound;
        };
        let mut current = start;
        let mut path = Vec::with_capacity(current_dist as usize);
        while current_dist > 0 {
            let next = current
                .neumann_neighborhood()
                .into_iter()
                .filter_map(|n| field.get(&n).map(|d| (n, d)))
                .min_by_key(|&(_, d)| d);
            match next {
                Some((n, d)) if d < current_dist => {
                    path.push(n);
                    current = n;
                    current_dist = d;
                }
                _ => {
                    debug!("Distance field has no descent from {}", current);
                    return PathResult::NotFound;
                }
            }
        }
        PathResult::Found(path)
    }

    /// Floods from `destination` and descends from `start`. The path length matches
    /// [find_path](Self::find_path), though the route may differ among equally short ones.
    pub fn find_path_descending<G: OccupancyGrid>(
        &self,
        grid: &G,
        start: Coord,
        destination: Coord,
    ) -> Result<PathResult> {
        Self::check_input(grid, start, destination)?;
        let field = self.distance_field(grid, destination)?;
        Ok(self.descend(&field, start))
    }
}

/// Checks that `path` walks from `start` in unit steps over free cells only.
pub fn is_valid_path<G: OccupancyGrid>(grid: &G, start: Coord, path: &[Coord]) -> bool {
    path.iter().all(|&c| grid.can_move_to(c))
        && std::iter::once(start)
            .chain(path.iter().copied())
            .tuple_windows()
            .all(|(a, b)| a.is_unit_step(&b))
}
