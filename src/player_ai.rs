use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use log::{debug, warn};
use rand::rngs::SmallRng;

use crate::{
    bitgrid::Grid,
    common::{EngineError, ShotResult},
    coord::Coord,
    fleet::{FleetSpec, ShipSpacing},
    player::{take_pending, Player, TargetView},
    ship::Orientation,
    targeting::{placement_density, DensityMap},
};

/// Which of the two targeting modes the automatic player is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// No hit is waiting for follow-up; fire at the densest cell.
    Search,
    /// Working through cells next to an unresolved hit.
    Target,
}

/// Hunt/target player driven only by the results of its own shots.
pub struct AutomaticPlayer {
    name: String,
    size: usize,
    spacing: ShipSpacing,
    remaining: Vec<usize>,
    shots: Grid,
    // misses, cells of sunk ships and (when ships never touch) their surroundings
    blocked: Grid,
    open_hits: Grid,
    candidates: VecDeque<Coord>,
    line: Option<Orientation>,
    pending: Option<Coord>,
}

impl AutomaticPlayer {
    /// Player facing an opponent board of `size` holding the ships in `fleet`.
    pub fn new(name: impl Into<String>, size: usize, fleet: &FleetSpec) -> Result<Self, EngineError> {
        Ok(Self {
            name: name.into(),
            size,
            spacing: ShipSpacing::Touching,
            remaining: fleet.lengths(),
            shots: Grid::new(size)?,
            blocked: Grid::new(size)?,
            open_hits: Grid::new(size)?,
            candidates: VecDeque::new(),
            line: None,
            pending: None,
        })
    }

    /// Assume the opponent's ships obey `spacing`. With `Separated`, cells
    /// around a sunk ship are never targeted.
    pub fn with_spacing(mut self, spacing: ShipSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn mode(&self) -> TargetMode {
        if self.candidates.is_empty() {
            TargetMode::Search
        } else {
            TargetMode::Target
        }
    }

    /// Lengths of opponent ships not yet reported sunk, longest first.
    pub fn remaining_lengths(&self) -> &[usize] {
        &self.remaining
    }

    /// Queued target-mode cells, next first.
    pub fn candidates(&self) -> impl Iterator<Item = &Coord> {
        self.candidates.iter()
    }

    /// Current search-mode weighting.
    pub fn density(&self) -> DensityMap {
        placement_density(
            self.size,
            &self.shots,
            &self.blocked,
            &self.open_hits,
            &self.remaining,
        )
    }

    fn is_open(&self, c: Coord) -> bool {
        !self.shots.contains(c) && !self.blocked.contains(c)
    }

    fn enqueue_neighbours(&mut self, hit: Coord) {
        for n in hit.neighbours(self.size) {
            if self.is_open(n) && !self.candidates.contains(&n) {
                self.candidates.push_back(n);
            }
        }
    }

    fn along(&self, c: Coord, axis: Orientation, forward: bool) -> Option<Coord> {
        let next = match (axis, forward) {
            (Orientation::Horizontal, true) => Some(Coord::new(c.x + 1, c.y)),
            (Orientation::Horizontal, false) => c.x.checked_sub(1).map(|x| Coord::new(x, c.y)),
            (Orientation::Vertical, true) => Some(Coord::new(c.x, c.y + 1)),
            (Orientation::Vertical, false) => c.y.checked_sub(1).map(|y| Coord::new(c.x, y)),
        };
        next.filter(|n| n.in_bounds(self.size))
    }

    /// Contiguous unresolved hits through `c` along `axis`, in order.
    fn run_through(&self, c: Coord, axis: Orientation) -> Vec<Coord> {
        let mut lo = c;
        while let Some(prev) = self.along(lo, axis, false).filter(|p| self.open_hits.contains(*p)) {
            lo = prev;
        }
        let mut run = alloc::vec![lo];
        let mut cur = lo;
        while let Some(next) = self.along(cur, axis, true).filter(|n| self.open_hits.contains(*n)) {
            run.push(next);
            cur = next;
        }
        run
    }

    fn follow_up(&mut self, hit: Coord) {
        let h = self.run_through(hit, Orientation::Horizontal);
        let v = self.run_through(hit, Orientation::Vertical);
        let line = match (h.len() >= 2, v.len() >= 2) {
            (false, false) => None,
            (true, false) => Some((Orientation::Horizontal, h)),
            (false, true) => Some((Orientation::Vertical, v)),
            (true, true) if v.len() > h.len() => Some((Orientation::Vertical, v)),
            (true, true) => Some((Orientation::Horizontal, h)),
        };

        let Some((axis, run)) = line else {
            self.enqueue_neighbours(hit);
            return;
        };

        // Two hits in a row: only the ends of that row remain candidates,
        // the end next to the newest hit first.
        let (lo, hi) = (run[0], run[run.len() - 1]);
        let before = self.along(lo, axis, false);
        let after = self.along(hi, axis, true);
        let ordered = if hit == lo { [before, after] } else { [after, before] };
        self.candidates.clear();
        self.line = Some(axis);
        for c in ordered.into_iter().flatten() {
            if self.is_open(c) {
                self.candidates.push_back(c);
            }
        }
        debug!("{} follows the {:?} line {}..{}", self.name, axis, lo, hi);
    }

    /// Work out which unresolved hits made up the ship of `len` sunk at `at`.
    fn sunk_cells(&self, at: Coord, len: usize) -> Vec<Coord> {
        let h = self.run_through(at, Orientation::Horizontal);
        let v = self.run_through(at, Orientation::Vertical);
        let fits = |run: &Vec<Coord>| run.len() >= len;
        let run = match (fits(&h), fits(&v)) {
            (true, false) => h,
            (false, true) => v,
            (true, true) => {
                if h.len() == len && v.len() != len {
                    h
                } else if v.len() == len && h.len() != len {
                    v
                } else if self.line == Some(Orientation::Vertical) {
                    v
                } else {
                    h
                }
            }
            (false, false) => {
                warn!("{} cannot account for a sunk ship of length {} at {}", self.name, len, at);
                return alloc::vec![at];
            }
        };
        let p = run.iter().position(|&c| c == at).unwrap_or(0);
        let start = (p + 1).saturating_sub(len).min(run.len() - len);
        run[start..start + len].to_vec()
    }

    fn resolve_sunk(&mut self, at: Coord, len: usize) -> Result<(), EngineError> {
        let cells = self.sunk_cells(at, len);
        for &c in &cells {
            self.open_hits.clear(c)?;
            self.blocked.set(c)?;
            if self.spacing == ShipSpacing::Separated {
                let around = self.surroundings(c);
                for n in around {
                    self.blocked.set(n)?;
                }
            }
        }
        match self.remaining.iter().position(|&l| l == len) {
            Some(i) => {
                self.remaining.remove(i);
            }
            None => warn!("{} was told a ship of length {} sank, none expected", self.name, len),
        }

        self.candidates.clear();
        self.line = None;
        let leftover: Vec<Coord> = self.open_hits.iter().collect();
        for h in leftover {
            self.enqueue_neighbours(h);
        }
        debug!(
            "{} sank a ship of length {}, {} left, mode {:?}",
            self.name,
            len,
            self.remaining.len(),
            self.mode()
        );
        Ok(())
    }

    fn surroundings(&self, c: Coord) -> Vec<Coord> {
        let mut out = Vec::with_capacity(8);
        for dy in [-1isize, 0, 1] {
            for dx in [-1isize, 0, 1] {
                let (Some(x), Some(y)) = (c.x.checked_add_signed(dx), c.y.checked_add_signed(dy)) else {
                    continue;
                };
                let n = Coord::new(x, y);
                if n.in_bounds(self.size) && !self.open_hits.contains(n) {
                    out.push(n);
                }
            }
        }
        out
    }
}

impl Player for AutomaticPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_target(
        &mut self,
        _rng: &mut SmallRng,
        _view: &TargetView<'_>,
    ) -> Result<Coord, EngineError> {
        while let Some(c) = self.candidates.pop_front() {
            if self.is_open(c) {
                self.pending = Some(c);
                return Ok(c);
            }
        }

        self.line = None;
        // Parity only pays off while no hit is waiting to be resolved.
        let parity = if self.open_hits.is_empty() {
            self.remaining.iter().min().copied()
        } else {
            None
        };
        let target = self
            .density()
            .best(&self.shots, parity)
            .ok_or(EngineError::ProtocolViolation("no cells left to target"))?;
        self.pending = Some(target);
        Ok(target)
    }

    fn notify_result(&mut self, coord: Coord, result: ShotResult) -> Result<(), EngineError> {
        take_pending(&mut self.pending, coord)?;
        self.shots.set(coord)?;
        match result {
            ShotResult::Miss => {
                self.blocked.set(coord)?;
            }
            ShotResult::Hit => {
                self.open_hits.set(coord)?;
                self.follow_up(coord);
            }
            ShotResult::HitAndSunk(len) => {
                self.open_hits.set(coord)?;
                self.resolve_sunk(coord, len)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use rand::SeedableRng;

    fn report(player: &mut AutomaticPlayer, c: Coord, result: ShotResult) {
        player.pending = Some(c);
        player.notify_result(c, result).unwrap();
    }

    #[test]
    fn exhausted_line_is_forgotten() {
        let fleet = FleetSpec::new().with(3, 1).with(2, 1);
        let mut player = AutomaticPlayer::new("auto", 10, &fleet).unwrap();
        report(&mut player, Coord::new(4, 4), ShotResult::Hit);
        report(&mut player, Coord::new(4, 5), ShotResult::Hit);
        assert_eq!(player.line, Some(Orientation::Vertical));

        // both ends of the column miss
        report(&mut player, Coord::new(4, 6), ShotResult::Miss);
        report(&mut player, Coord::new(4, 3), ShotResult::Miss);

        let board = Board::new(10).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        player.choose_target(&mut rng, &TargetView::new(&board)).unwrap();
        assert_eq!(player.mode(), TargetMode::Search);
        assert_eq!(player.line, None);
    }
}
