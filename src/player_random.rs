use alloc::string::String;
use log::trace;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::{EngineError, ShotResult};
use crate::coord::Coord;
use crate::player::{take_pending, Player, TargetView};

/// Fires uniformly at random among the cells it has not fired at yet.
pub struct RandomPlayer {
    name: String,
    pending: Option<Coord>,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pending: None,
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_target(
        &mut self,
        rng: &mut SmallRng,
        view: &TargetView<'_>,
    ) -> Result<Coord, EngineError> {
        let open = view.unshot_cells();
        if open.is_empty() {
            return Err(EngineError::ProtocolViolation("no cells left to target"));
        }
        let target = open[rng.random_range(0..open.len())];
        trace!("{} picks {}", self.name, target);
        self.pending = Some(target);
        Ok(target)
    }

    fn notify_result(&mut self, coord: Coord, _result: ShotResult) -> Result<(), EngineError> {
        take_pending(&mut self.pending, coord)
    }
}
