#![cfg(feature = "std")]

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::string::String;
use std::vec::Vec;

use rand::rngs::SmallRng;

use crate::{
    bitgrid::Grid,
    common::{CellState, EngineError, ShotResult},
    coord::Coord,
    fleet::FleetSpec,
    player::{take_pending, Player, TargetView},
    targeting::{placement_density, DensityMap},
    ui,
};

/// A human entering targets such as `B7` on a text stream.
pub struct ManualPlayer<R, W> {
    name: String,
    input: R,
    output: W,
    pending: Option<Coord>,
    // remaining opponent ship lengths, tracked only when hints are on
    hints: Option<Vec<usize>>,
}

impl ManualPlayer<BufReader<Stdin>, Stdout> {
    /// Player reading from standard input and writing to standard output.
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ManualPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            pending: None,
            hints: None,
        }
    }

    /// Show a density map and suggest a target each turn; an empty line
    /// accepts the suggestion.
    pub fn with_hints(mut self, fleet: &FleetSpec) -> Self {
        self.hints = Some(fleet.lengths());
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn suggestion(&self, view: &TargetView<'_>) -> Result<Option<(DensityMap, Coord)>, EngineError> {
        let Some(remaining) = &self.hints else {
            return Ok(None);
        };
        let size = view.size();
        let mut shots = Grid::new(size)?;
        let mut blocked = Grid::new(size)?;
        let mut open_hits = Grid::new(size)?;
        for i in 0..size * size {
            let c = Coord::new(i % size, i / size);
            match view.cell_state(c)? {
                CellState::Unknown => continue,
                CellState::Miss | CellState::Sunk => {
                    blocked.set(c)?;
                }
                CellState::Hit => {
                    open_hits.set(c)?;
                }
            }
            shots.set(c)?;
        }
        let parity = if open_hits.is_empty() {
            remaining.iter().min().copied()
        } else {
            None
        };
        let map = placement_density(size, &shots, &blocked, &open_hits, remaining);
        Ok(map.best(&shots, parity).map(|c| (map, c)))
    }
}

impl<R: BufRead, W: Write> Player for ManualPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn choose_target(
        &mut self,
        _rng: &mut SmallRng,
        view: &TargetView<'_>,
    ) -> Result<Coord, EngineError> {
        let _ = writeln!(self.output, "\nIt is now {}'s turn. Opponent waters:", self.name);
        let _ = write!(self.output, "{}", ui::render_view(view));
        let _ = writeln!(self.output, "{}", ui::legend(false));

        let hint = self.suggestion(view)?;
        if let Some((map, _)) = &hint {
            let _ = writeln!(self.output, "\nLikely positions (9 = most likely):");
            let _ = write!(self.output, "{}", ui::render_density(map));
        }
        let hint = hint.map(|(_, c)| c);

        loop {
            match hint {
                Some(c) => {
                    let _ = write!(self.output, "Enter target [{}]: ", c);
                }
                None => {
                    let _ = write!(self.output, "Enter target: ");
                }
            }
            let _ = self.output.flush();

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|_| EngineError::InputClosed)?;
            if read == 0 {
                return Err(EngineError::InputClosed);
            }
            let line = line.trim();
            let parsed = match (line.is_empty(), hint) {
                (true, Some(c)) => Ok(c),
                (true, None) => continue,
                (false, _) => Coord::parse(line, view.size()),
            };
            match parsed {
                Ok(c) => {
                    self.pending = Some(c);
                    return Ok(c);
                }
                Err(e) => {
                    let _ = writeln!(self.output, "{}. Try again (e.g. B7).", e);
                }
            }
        }
    }

    fn notify_result(&mut self, coord: Coord, result: ShotResult) -> Result<(), EngineError> {
        take_pending(&mut self.pending, coord)?;
        if let (ShotResult::HitAndSunk(len), Some(remaining)) = (result, self.hints.as_mut()) {
            if let Some(i) = remaining.iter().position(|&l| l == len) {
                remaining.remove(i);
            }
        }
        let _ = writeln!(self.output, "{} fired at {}: {}", self.name, coord, describe(result));
        Ok(())
    }

    fn notify_rejected(&mut self, coord: Coord, err: &EngineError) {
        self.pending = None;
        let _ = writeln!(self.output, "Cannot fire at {}: {}. Choose again.", coord, err);
    }

    fn observe_opponent_shot(&mut self, coord: Coord, result: ShotResult) {
        let _ = writeln!(self.output, "Opponent fired at {}: {}", coord, describe(result));
    }
}

fn describe(result: ShotResult) -> String {
    match result {
        ShotResult::Miss => String::from("miss"),
        ShotResult::Hit => String::from("hit"),
        ShotResult::HitAndSunk(len) => std::format!("hit and sunk a ship of length {}", len),
    }
}
