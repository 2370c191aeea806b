//! Placement-density targeting for the search mode of the automatic player.
//!
//! Weights are saturating integers, so results are exact and reproducible.

use alloc::vec;
use alloc::vec::Vec;

use crate::bitgrid::Grid;
use crate::coord::Coord;
use crate::ship::Orientation;

/// Multiplier applied per unresolved hit a placement covers.
pub const HIT_BIAS: u64 = 10;

/// Weight per cell, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityMap {
    size: usize,
    weights: Vec<u64>,
}

impl DensityMap {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, coord: Coord) -> u64 {
        if coord.in_bounds(self.size) {
            self.weights[coord.y * self.size + coord.x]
        } else {
            0
        }
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().fold(0u64, |acc, w| acc.saturating_add(*w))
    }

    /// Highest-weighted cell not in `shots`. Ties go to the earliest cell in
    /// row-major order. When `parity` is `Some(n)` only cells with
    /// `(x + y) % n == 0` are considered first; if none of those carries
    /// weight every un-shot cell is considered. With no weight anywhere the
    /// first un-shot cell is returned.
    pub fn best(&self, shots: &Grid, parity: Option<usize>) -> Option<Coord> {
        if let Some(n) = parity.filter(|&n| n > 1) {
            if let Some(c) = self.heaviest(shots, |c| (c.x + c.y) % n == 0) {
                return Some(c);
            }
        }
        self.heaviest(shots, |_| true)
            .or_else(|| self.open_cells(shots).next())
    }

    fn open_cells<'a>(&self, shots: &'a Grid) -> impl Iterator<Item = Coord> + 'a {
        let size = self.size;
        (0..size * size)
            .map(move |i| Coord::new(i % size, i / size))
            .filter(move |c| !shots.contains(*c))
    }

    fn heaviest<F>(&self, shots: &Grid, allowed: F) -> Option<Coord>
    where
        F: Fn(&Coord) -> bool,
    {
        let mut best: Option<(Coord, u64)> = None;
        for c in self.open_cells(shots).filter(|c| allowed(c)) {
            let w = self.get(c);
            if w > 0 && best.map_or(true, |(_, bw)| w > bw) {
                best = Some((c, w));
            }
        }
        best.map(|(c, _)| c)
    }
}

/// Count, for every un-shot cell, the placements of the remaining ships that
/// cover it. A placement is legal if it stays on the board and avoids every
/// `blocked` cell (misses and cells of sunk ships). Placements covering `n`
/// cells of `open_hits` weigh `HIT_BIAS^n`; with no open hits every legal
/// placement weighs one.
pub fn placement_density(
    size: usize,
    shots: &Grid,
    blocked: &Grid,
    open_hits: &Grid,
    remaining_lengths: &[usize],
) -> DensityMap {
    let mut weights = vec![0u64; size * size];
    let index = |c: Coord| c.y * size + c.x;
    let shot: Vec<bool> = (0..size * size)
        .map(|i| shots.contains(Coord::new(i % size, i / size)))
        .collect();
    let wall: Vec<bool> = (0..size * size)
        .map(|i| blocked.contains(Coord::new(i % size, i / size)))
        .collect();
    let hit: Vec<bool> = (0..size * size)
        .map(|i| open_hits.contains(Coord::new(i % size, i / size)))
        .collect();

    for &len in remaining_lengths {
        if len == 0 || len > size {
            continue;
        }
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            // a single cell is the same placement either way
            if len == 1 && orient == Orientation::Vertical {
                continue;
            }
            let (max_x, max_y) = match orient {
                Orientation::Horizontal => (size - len, size - 1),
                Orientation::Vertical => (size - 1, size - len),
            };
            for y in 0..=max_y {
                for x in 0..=max_x {
                    let origin = Coord::new(x, y);
                    let mut valid = true;
                    let mut n_hits = 0u32;
                    for k in 0..len {
                        let i = index(orient.step(origin, k));
                        if wall[i] {
                            valid = false;
                            break;
                        }
                        if hit[i] {
                            n_hits += 1;
                        }
                    }
                    if !valid {
                        continue;
                    }
                    let weight = HIT_BIAS.saturating_pow(n_hits);
                    for k in 0..len {
                        let i = index(orient.step(origin, k));
                        if !shot[i] {
                            weights[i] = weights[i].saturating_add(weight);
                        }
                    }
                }
            }
        }
    }

    DensityMap { size, weights }
}
