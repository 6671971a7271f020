//! Human-readable breakdown of a board and the decision taken on it.

use std::fmt;

use skirmish_board::Board;
use skirmish_core::{CellCoord, Entity, BOARD_SIZE};
use skirmish_system_pathfinding::shortest_path;
use skirmish_system_policy::{Config, DecisionPolicy};
use skirmish_system_threat::{is_facing, predict};

/// Text report covering the ship, enemy forecasts, the route and the grid.
pub(crate) struct Report<'a> {
    board: &'a Board,
    config: &'a Config,
}

impl<'a> Report<'a> {
    pub(crate) const fn new(board: &'a Board, config: &'a Config) -> Self {
        Self { board, config }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ship = self.board.find_ship();
        let rally = self.config.rally_point();
        writeln!(f, "ship {} facing {}", ship.cell, ship.heading)?;

        let enemies = self.board.enemies();
        if enemies.is_empty() {
            writeln!(f, "no enemies")?;
        }
        for enemy in &enemies {
            let facing = if is_facing(*enemy, ship.cell) {
                " (facing ship)"
            } else {
                ""
            };
            write!(f, "enemy {} facing {}{facing}:", enemy.cell, enemy.heading)?;
            for position in predict(self.board, *enemy, self.config.prediction_horizon()) {
                write!(f, " t{}={}", position.turns_ahead, position.cell)?;
            }
            writeln!(f)?;
        }

        let route = shortest_path(self.board, ship.cell, rally);
        match &route {
            Some(route) => writeln!(f, "route to {rally}: {} steps", route.len())?,
            None => writeln!(f, "route to {rally}: unreachable")?,
        }

        let decision = DecisionPolicy::new(*self.config).decide(self.board);
        writeln!(f, "state {:?}, command {}", decision.state, decision.command)?;
        if let Some(engagement) = decision.engagement {
            writeln!(
                f,
                "target {} via {} at t{}, aim {} (score {})",
                engagement.enemy.cell,
                engagement.predicted.cell,
                engagement.predicted.turns_ahead,
                engagement.heading,
                engagement.score
            )?;
        }

        let route = route.unwrap_or_default();
        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                let cell = CellCoord::new(row, column);
                let glyph = match self.board.cell_at(cell) {
                    Some(Entity::PlayerShip(heading)) => format!("P{heading}"),
                    Some(Entity::EnemyShip(heading)) => format!("E{heading}"),
                    Some(Entity::Asteroid) => "A ".to_owned(),
                    Some(Entity::Coin) => "C ".to_owned(),
                    Some(Entity::Empty) if cell == rally => "+ ".to_owned(),
                    Some(Entity::Empty) if route.contains(&cell) => "* ".to_owned(),
                    Some(Entity::Empty) | None => ". ".to_owned(),
                };
                f.write_str(&glyph)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
