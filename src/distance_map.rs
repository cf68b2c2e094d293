use crate::bfs::{FxIndexMap, SearchContext};
use crate::Coord;

/// Distances in steps from a source cell, in the order the cells were labelled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceMap {
    source: Option<Coord>,
    distances: FxIndexMap<Coord, u32>,
}

impl DistanceMap {
    /// Empty map rooted at `source`; the source itself is labelled 0.
    pub fn new(source: Coord) -> DistanceMap {
        let mut distances = FxIndexMap::default();
        distances.insert(source, 0);
        DistanceMap {
            source: Some(source),
            distances,
        }
    }

    pub(crate) fn from_context(source: Coord, ct: &SearchContext<Coord>) -> DistanceMap {
        DistanceMap {
            source: Some(source),
            distances: ct.distances().map(|(c, d)| (*c, d)).collect(),
        }
    }

    /// The cell distances are measured from, [None] for an empty map.
    pub fn source(&self) -> Option<Coord> {
        self.source
    }

    pub fn get(&self, coord: &Coord) -> Option<u32> {
        self.distances.get(coord).copied()
    }

    pub fn contains(&self, coord: &Coord) -> bool {
        self.distances.contains_key(coord)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Largest distance in the map.
    pub fn max_distance(&self) -> Option<u32> {
        self.distances.values().copied().max()
    }

    /// Labelled cells in labelling order, which is non-decreasing in distance.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, u32)> + '_ {
        self.distances.iter().map(|(c, d)| (*c, *d))
    }
}

impl<'a> IntoIterator for &'a DistanceMap {
    type Item = (&'a Coord, &'a u32);
    type IntoIter = indexmap::map::Iter<'a, Coord, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.distances.iter()
    }
}
