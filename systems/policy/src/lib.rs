#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure decision policy that turns one board snapshot into one command.
//!
//! The policy keeps no memory between calls. Its state is derived fresh on
//! every call: away from the rally point the ship is [`PolicyState::Navigating`]
//! and follows the breadth-first route there; on the rally point it is
//! [`PolicyState::Engaging`] and turns toward the enemy it can line up with
//! most cheaply, firing once aligned and in range.

mod config;

pub use config::{Config, ConfigError};

use skirmish_board::{spatial, Board, BoardError};
use skirmish_core::{CellCoord, Command, Heading, PredictedPosition, Ship, Snapshot};
use skirmish_system_pathfinding::next_step;
use skirmish_system_threat::{is_facing, predict};
use tracing::debug;

/// Phase the policy is in for the current call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyState {
    /// The ship is away from the rally point and travels toward it.
    Navigating,
    /// The ship holds the rally point and engages enemies.
    Engaging,
}

/// Enemy position the policy chose to line up with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Engagement {
    /// Enemy being targeted, at its current cell.
    pub enemy: Ship,
    /// Forecast position that produced the aiming heading.
    pub predicted: PredictedPosition,
    /// Heading that points the ship at the forecast position.
    pub heading: Heading,
    /// Rotation cost plus any threat penalty. Lower is better.
    pub score: u32,
}

/// Outcome of a single policy call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Command to send back for this turn.
    pub command: Command,
    /// Derived phase of the policy.
    pub state: PolicyState,
    /// Route step taken while navigating, if one exists.
    pub next_step: Option<CellCoord>,
    /// Target selected while engaging, if any.
    pub engagement: Option<Engagement>,
}

impl Decision {
    fn navigating(command: Command, next_step: Option<CellCoord>) -> Self {
        Self {
            command,
            state: PolicyState::Navigating,
            next_step,
            engagement: None,
        }
    }

    fn engaging(command: Command, engagement: Option<Engagement>) -> Self {
        Self {
            command,
            state: PolicyState::Engaging,
            next_step: None,
            engagement,
        }
    }
}

/// Stateless decision policy parameterised by a [`Config`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DecisionPolicy {
    config: Config,
}

impl DecisionPolicy {
    /// Creates a new policy using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the policy was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Parses `snapshot` and decides the command for it.
    ///
    /// Board validation failures propagate unchanged; no command is produced
    /// without a located ship.
    pub fn decide_snapshot(&self, snapshot: &Snapshot) -> Result<Decision, BoardError> {
        let board = Board::parse(snapshot)?;
        Ok(self.decide(&board))
    }

    /// Decides the command for an already parsed board.
    #[must_use]
    pub fn decide(&self, board: &Board) -> Decision {
        let ship = board.find_ship();
        let decision = if ship.cell == self.config.rally_point() {
            self.engage(board, ship)
        } else {
            self.navigate(board, ship)
        };

        debug!(
            ship = %ship.cell,
            heading = %ship.heading,
            state = ?decision.state,
            command = %decision.command,
            "decided command"
        );
        decision
    }

    fn navigate(&self, board: &Board, ship: Ship) -> Decision {
        let rally_point = self.config.rally_point();
        let step = next_step(board, ship.cell, rally_point);
        let Some(desired) = step.and_then(|step| Heading::toward(ship.cell, step)) else {
            debug!(rally = %rally_point, "no route to rally point");
            return Decision::navigating(Command::RotateLeft, None);
        };

        let command = match ship.heading.rotation_toward(desired) {
            None => Command::Move,
            Some(rotation) => rotation.into(),
        };
        Decision::navigating(command, step)
    }

    fn engage(&self, board: &Board, ship: Ship) -> Decision {
        let enemies = board.enemies();
        if enemies.is_empty() {
            return Decision::engaging(Command::Pass, None);
        }

        let mut best: Option<Candidate> = None;
        for (scan_index, enemy) in enemies.into_iter().enumerate() {
            let penalty = self.threat_penalty(enemy, ship.cell);
            for predicted in predict(board, enemy, self.config.prediction_horizon()) {
                let Some(heading) = Heading::toward(ship.cell, predicted.cell) else {
                    continue;
                };

                let current = Candidate {
                    engagement: Engagement {
                        enemy,
                        predicted,
                        heading,
                        score: u32::from(ship.heading.rotation_cost(heading)) + penalty,
                    },
                    scan_index,
                };

                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }
        }

        let Some(Candidate { engagement, .. }) = best else {
            return Decision::engaging(Command::Pass, None);
        };

        debug!(
            enemy = %engagement.enemy.cell,
            predicted = %engagement.predicted.cell,
            turns_ahead = engagement.predicted.turns_ahead,
            heading = %engagement.heading,
            score = engagement.score,
            "selected engagement"
        );

        let command = match ship.heading.rotation_toward(engagement.heading) {
            Some(rotation) => rotation.into(),
            None => {
                let line_of_fire = spatial::trace_line(
                    board,
                    ship.cell,
                    ship.heading,
                    self.config.firing_range(),
                );
                if line_of_fire.contains(&engagement.enemy.cell) {
                    Command::Fire
                } else {
                    Command::Pass
                }
            }
        };
        Decision::engaging(command, Some(engagement))
    }

    fn threat_penalty(&self, enemy: Ship, ship_cell: CellCoord) -> u32 {
        if self.config.prioritise_facing_enemies() && !is_facing(enemy, ship_cell) {
            1
        } else {
            0
        }
    }
}

/// Decides the command for `snapshot` using the default configuration.
pub fn decide(snapshot: &Snapshot) -> Result<Command, BoardError> {
    DecisionPolicy::default()
        .decide_snapshot(snapshot)
        .map(|decision| decision.command)
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    engagement: Engagement,
    scan_index: usize,
}

impl Candidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.engagement.score != other.engagement.score {
            return self.engagement.score < other.engagement.score;
        }

        let own_turns = self.engagement.predicted.turns_ahead;
        let other_turns = other.engagement.predicted.turns_ahead;
        if own_turns != other_turns {
            return own_turns < other_turns;
        }

        self.scan_index < other.scan_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::BOARD_SIZE;

    fn board_with(tokens: &[(u32, u32, &str)]) -> Board {
        let side = BOARD_SIZE as usize;
        let mut field = vec![vec![Some("_".to_owned()); side]; side];
        for &(row, column, token) in tokens {
            field[row as usize][column as usize] = Some(token.to_owned());
        }
        Board::from_field(&field).expect("test board parses")
    }

    fn ship(row: u32, column: u32, heading: Heading) -> Ship {
        Ship {
            cell: CellCoord::new(row, column),
            heading,
        }
    }

    #[test]
    fn candidate_prefers_lower_score_then_earlier_turn_then_scan_order() {
        let base = Candidate {
            engagement: Engagement {
                enemy: ship(1, 1, Heading::North),
                predicted: PredictedPosition {
                    cell: CellCoord::new(1, 1),
                    turns_ahead: 2,
                },
                heading: Heading::North,
                score: 1,
            },
            scan_index: 1,
        };

        let mut cheaper = base;
        cheaper.engagement.score = 0;
        cheaper.engagement.predicted.turns_ahead = 5;
        cheaper.scan_index = 9;
        assert!(cheaper.precedes(&base));

        let mut sooner = base;
        sooner.engagement.predicted.turns_ahead = 1;
        sooner.scan_index = 4;
        assert!(sooner.precedes(&base));

        let mut earlier_scan = base;
        earlier_scan.scan_index = 0;
        assert!(earlier_scan.precedes(&base));
        assert!(!base.precedes(&base));
    }

    #[test]
    fn navigating_decision_reports_route_step() {
        let board = board_with(&[(8, 6, "PN")]);
        let decision = DecisionPolicy::default().decide(&board);
        assert_eq!(decision.state, PolicyState::Navigating);
        assert_eq!(decision.command, Command::Move);
        assert_eq!(decision.next_step, Some(CellCoord::new(7, 6)));
        assert_eq!(decision.engagement, None);
    }

    #[test]
    fn engaging_decision_reports_target() {
        let board = board_with(&[(6, 6, "PN"), (6, 10, "ES")]);
        let decision = DecisionPolicy::default().decide(&board);
        assert_eq!(decision.state, PolicyState::Engaging);
        assert_eq!(decision.command, Command::RotateRight);
        let engagement = decision.engagement.expect("enemy selected");
        assert_eq!(engagement.enemy.cell, CellCoord::new(6, 10));
        assert_eq!(engagement.heading, Heading::East);
        assert_eq!(engagement.predicted.turns_ahead, 0);
    }

    #[test]
    fn threat_penalty_applies_only_when_enabled() {
        let enemy = ship(2, 6, Heading::East);
        let facing = ship(2, 6, Heading::South);
        let plain = DecisionPolicy::default();
        let wary = DecisionPolicy::new(Config::default().with_prioritised_facing(true));

        assert_eq!(plain.threat_penalty(enemy, CellCoord::new(6, 6)), 0);
        assert_eq!(wary.threat_penalty(enemy, CellCoord::new(6, 6)), 1);
        assert_eq!(wary.threat_penalty(facing, CellCoord::new(6, 6)), 0);
    }
}
