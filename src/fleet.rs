//! Fleet specifications and the factory that lays fleets out on a board.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use log::{debug, trace};
use rand::Rng;

use crate::common::EngineError;
use crate::config::{MAX_PLACEMENT_ATTEMPTS, SHIP_DRAWS_PER_ATTEMPT};
use crate::coord::Coord;
use crate::ship::{Orientation, Ship};

/// Required ships, keyed by length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSpec {
    counts: BTreeMap<usize, usize>,
}

impl FleetSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carrier, battleship, two cruisers and a destroyer.
    pub fn classic() -> Self {
        Self::new().with(5, 1).with(4, 1).with(3, 2).with(2, 1)
    }

    /// Add `count` ships of `length`. Zero lengths and counts are ignored.
    pub fn with(mut self, length: usize, count: usize) -> Self {
        if length > 0 && count > 0 {
            *self.counts.entry(length).or_insert(0) += count;
        }
        self
    }

    pub fn count(&self, length: usize) -> usize {
        self.counts.get(&length).copied().unwrap_or(0)
    }

    pub fn total_ships(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn total_cells(&self) -> usize {
        self.counts.iter().map(|(len, n)| len * n).sum()
    }

    pub fn longest(&self) -> Option<usize> {
        self.counts.keys().next_back().copied()
    }

    /// One entry per ship, longest first.
    pub fn lengths(&self) -> Vec<usize> {
        self.counts
            .iter()
            .rev()
            .flat_map(|(&len, &n)| core::iter::repeat(len).take(n))
            .collect()
    }

    /// True if `ships` has exactly the requested number of each length.
    pub fn matches(&self, ships: &[Ship]) -> bool {
        let mut actual = BTreeMap::new();
        for ship in ships {
            *actual.entry(ship.len()).or_insert(0usize) += 1;
        }
        actual == self.counts
    }
}

impl FromIterator<(usize, usize)> for FleetSpec {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FleetSpec::new(), |spec, (len, n)| spec.with(len, n))
    }
}

/// Whether ships may touch each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShipSpacing {
    /// Only overlap is forbidden.
    #[default]
    Touching,
    /// Ships may not be adjacent, diagonals included.
    Separated,
}

impl ShipSpacing {
    /// True if `candidate` may join `placed` under this rule on a board of `size`.
    pub fn admits(&self, placed: &[Ship], candidate: &Ship, size: usize) -> bool {
        if !candidate.cells().iter().all(|c| c.in_bounds(size)) {
            return false;
        }
        placed.iter().all(|ship| match self {
            ShipSpacing::Touching => !candidate.cells().iter().any(|c| ship.occupies(*c)),
            ShipSpacing::Separated => !ship.is_near_ship(candidate),
        })
    }
}

/// A way of laying out a whole fleet.
pub trait PlacementStrategy {
    /// Produce one ship per entry of `spec.lengths()`, all admitted by `spacing`.
    fn place(
        &mut self,
        size: usize,
        spec: &FleetSpec,
        spacing: ShipSpacing,
    ) -> Result<Vec<Ship>, EngineError>;
}

/// Deterministic layout: each ship, longest first, goes to the first
/// row-major origin where it fits, trying horizontal before vertical.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPlacement;

impl PlacementStrategy for FixedPlacement {
    fn place(
        &mut self,
        size: usize,
        spec: &FleetSpec,
        spacing: ShipSpacing,
    ) -> Result<Vec<Ship>, EngineError> {
        let mut ships: Vec<Ship> = Vec::with_capacity(spec.total_ships());
        'ships: for len in spec.lengths() {
            for y in 0..size {
                for x in 0..size {
                    for orient in [Orientation::Horizontal, Orientation::Vertical] {
                        let ship = Ship::new(Coord::new(x, y), orient, len)?;
                        if spacing.admits(&ships, &ship, size) {
                            ships.push(ship);
                            continue 'ships;
                        }
                    }
                }
            }
            debug!("fixed placement found no slot for a ship of length {}", len);
            return Err(EngineError::UnplaceableFleet { attempts: 1 });
        }
        Ok(ships)
    }
}

/// Random layout: random orientation and origin per ship, redrawn on
/// collision; the whole fleet is restarted when a ship cannot be fitted.
pub struct RandomPlacement<R: Rng> {
    rng: R,
    max_attempts: usize,
}

impl<R: Rng> RandomPlacement<R> {
    pub fn new(rng: R) -> Self {
        Self::with_attempts(rng, MAX_PLACEMENT_ATTEMPTS)
    }

    pub fn with_attempts(rng: R, max_attempts: usize) -> Self {
        Self { rng, max_attempts }
    }

    pub fn into_rng(self) -> R {
        self.rng
    }

    fn draw(&mut self, size: usize, len: usize) -> Result<Ship, EngineError> {
        let orient = if self.rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_x, max_y) = match orient {
            Orientation::Horizontal => (size - len, size - 1),
            Orientation::Vertical => (size - 1, size - len),
        };
        let x = self.rng.random_range(0..=max_x);
        let y = self.rng.random_range(0..=max_y);
        Ship::new(Coord::new(x, y), orient, len)
    }

    fn try_fleet(
        &mut self,
        size: usize,
        lengths: &[usize],
        spacing: ShipSpacing,
    ) -> Result<Option<Vec<Ship>>, EngineError> {
        let mut ships: Vec<Ship> = Vec::with_capacity(lengths.len());
        for &len in lengths {
            let mut placed = false;
            for _ in 0..SHIP_DRAWS_PER_ATTEMPT {
                let ship = self.draw(size, len)?;
                if spacing.admits(&ships, &ship, size) {
                    ships.push(ship);
                    placed = true;
                    break;
                }
            }
            if !placed {
                return Ok(None);
            }
        }
        Ok(Some(ships))
    }
}

impl<R: Rng> PlacementStrategy for RandomPlacement<R> {
    fn place(
        &mut self,
        size: usize,
        spec: &FleetSpec,
        spacing: ShipSpacing,
    ) -> Result<Vec<Ship>, EngineError> {
        let lengths = spec.lengths();
        if lengths.iter().any(|&len| len > size) {
            return Err(EngineError::UnplaceableFleet { attempts: 0 });
        }
        for attempt in 1..=self.max_attempts {
            if let Some(ships) = self.try_fleet(size, &lengths, spacing)? {
                trace!("random fleet placed on attempt {}", attempt);
                return Ok(ships);
            }
        }
        debug!("random placement gave up after {} attempts", self.max_attempts);
        Err(EngineError::UnplaceableFleet {
            attempts: self.max_attempts,
        })
    }
}

/// Builds fleets for one board size and fleet specification.
#[derive(Debug, Clone)]
pub struct ShipFactory {
    size: usize,
    spec: FleetSpec,
    spacing: ShipSpacing,
}

impl ShipFactory {
    pub fn new(size: usize, spec: FleetSpec) -> Self {
        Self {
            size,
            spec,
            spacing: ShipSpacing::Touching,
        }
    }

    pub fn with_spacing(mut self, spacing: ShipSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn spec(&self) -> &FleetSpec {
        &self.spec
    }

    pub fn spacing(&self) -> ShipSpacing {
        self.spacing
    }

    /// Build a ship from two labels such as `"A3"` and `"C3"`.
    pub fn ship_from_labels(&self, start: &str, end: &str) -> Result<Ship, EngineError> {
        Ship::from_ends(Coord::parse(start, self.size)?, Coord::parse(end, self.size)?)
    }

    /// Lay out the fleet with `strategy` and verify the result.
    pub fn generate_fleet<S>(&self, strategy: &mut S) -> Result<Vec<Ship>, EngineError>
    where
        S: PlacementStrategy + ?Sized,
    {
        let fits = self.spec.total_cells() <= self.size * self.size
            && self.spec.longest().map_or(true, |len| len <= self.size);
        if !fits {
            return Err(EngineError::UnplaceableFleet { attempts: 0 });
        }

        let ships = strategy.place(self.size, &self.spec, self.spacing)?;
        self.verify(&ships)?;
        Ok(ships)
    }

    fn verify(&self, ships: &[Ship]) -> Result<(), EngineError> {
        for (i, ship) in ships.iter().enumerate() {
            if let Some(c) = ship.cells().iter().find(|c| !c.in_bounds(self.size)) {
                return Err(EngineError::OutOfBounds {
                    coord: *c,
                    size: self.size,
                });
            }
            if !self.spacing.admits(&ships[..i], ship, self.size) {
                return Err(EngineError::Overlap(ship.cells()[0]));
            }
        }
        if !self.spec.matches(ships) {
            return Err(EngineError::ProtocolViolation(
                "placement strategy returned the wrong ships",
            ));
        }
        Ok(())
    }
}
