//! Game-state engine: the falling piece, the arena it locks into, the drop
//! timer and the reset rules. Nothing in here touches the DOM; the canvas host
//! and the `Game` binding both drive it through [`Engine::tick`] and
//! [`Engine::apply`].
//!
//! Piece lifecycle:
//! - falling: timer expiry or a manual drop tries to move the piece one row down
//! - locking: the descent is blocked, so the piece is merged, full rows are swept
//!   and the next piece spawns centered on row 0
//! - top-out: the fresh piece collides at spawn, so the arena is emptied and the
//!   score zeroed; the piece that just spawned stays where it is
pub mod arena;
pub mod matrix;
pub mod shapes;

pub use arena::Arena;
pub use matrix::{Cell, EMPTY, Matrix, Position, Turn};
pub use shapes::{RandomShapes, Shape, ShapeCycle, ShapeSource, random_piece};

use crate::config::GameConfig;

/// Player input, already decoded from whatever the host listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
}

/// What a command or forced descent did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Game not started, or a zero direction.
    Ignored,
    /// The piece moved, turned or fell one row.
    Moved,
    /// The move or turn collided and was reverted.
    Blocked,
    /// The piece locked and the next one spawned.
    Locked { rows_cleared: u32 },
    /// The piece locked, the next one collided at spawn and the arena reset.
    ToppedOut { rows_cleared: u32 },
}

/// The falling piece and the running score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Player {
    pub pos: Position,
    pub matrix: Matrix,
    pub score: u32,
}

/// Read-only copy of what a renderer needs, flattened row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Cell>,
    pub piece: PieceView,
    pub score: u32,
    pub running: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PieceView {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

#[derive(Clone, Copy, Debug)]
struct DropTimer {
    counter_ms: f64,
    interval_ms: f64,
}

impl DropTimer {
    fn new(interval_ms: f64) -> Self {
        Self {
            counter_ms: 0.0,
            interval_ms,
        }
    }

    /// Accumulate and report whether a forced descent is due.
    fn advance(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.counter_ms += elapsed_ms;
        }
        self.counter_ms > self.interval_ms
    }

    fn reset(&mut self) {
        self.counter_ms = 0.0;
    }
}

pub struct Engine<S = RandomShapes> {
    config: GameConfig,
    arena: Arena,
    player: Player,
    drop: DropTimer,
    shapes: S,
    running: bool,
}

impl Engine {
    /// Engine drawing uniformly random shapes from an entropy-seeded RNG.
    pub fn new(config: GameConfig) -> Self {
        Self::with_source(config, RandomShapes::from_entropy())
    }
}

impl<S: ShapeSource> Engine<S> {
    pub fn with_source(config: GameConfig, shapes: S) -> Self {
        Self {
            arena: Arena::new(config.width, config.height),
            player: Player::default(),
            drop: DropTimer::new(config.drop_interval_ms),
            shapes,
            running: false,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn score(&self) -> u32 {
        self.player.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> Snapshot {
        let matrix = &self.player.matrix;
        Snapshot {
            width: self.arena.width(),
            height: self.arena.height(),
            grid: self.arena.to_flat(),
            piece: PieceView {
                x: self.player.pos.x,
                y: self.player.pos.y,
                width: matrix.width(),
                height: matrix.height(),
                cells: matrix.to_flat(),
            },
            score: self.player.score,
            running: self.running,
        }
    }

    /// Empty the arena, zero the score and spawn the first piece. Calling it
    /// again restarts the game.
    pub fn start(&mut self) {
        self.arena.clear();
        self.player.score = 0;
        self.drop.reset();
        self.running = true;
        if self.spawn() {
            self.top_out();
        }
    }

    /// Advance the drop timer by `elapsed_ms`; once it passes the interval the
    /// piece is forced down one row. Returns the descent outcome when one
    /// happened.
    pub fn tick(&mut self, elapsed_ms: f64) -> Option<Outcome> {
        if !self.running {
            return None;
        }
        self.drop
            .advance(elapsed_ms)
            .then(|| self.descend())
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        if !self.running {
            return Outcome::Ignored;
        }
        match command {
            Command::MoveLeft => self.shift(-1),
            Command::MoveRight => self.shift(1),
            Command::SoftDrop => self.descend(),
            Command::RotateCw => self.turn(Turn::Clockwise),
            Command::RotateCcw => self.turn(Turn::CounterClockwise),
        }
    }

    /// Move one column; the sign of `direction` picks the side.
    pub fn move_horizontal(&mut self, direction: i32) -> Outcome {
        match direction.signum() {
            -1 => self.apply(Command::MoveLeft),
            1 => self.apply(Command::MoveRight),
            _ => Outcome::Ignored,
        }
    }

    /// One descent attempt outside the timer cadence.
    pub fn drop_once(&mut self) -> Outcome {
        self.apply(Command::SoftDrop)
    }

    pub fn rotate(&mut self, direction: i32) -> Outcome {
        match Turn::from_direction(direction) {
            Some(Turn::Clockwise) => self.apply(Command::RotateCw),
            Some(Turn::CounterClockwise) => self.apply(Command::RotateCcw),
            None => Outcome::Ignored,
        }
    }

    fn shift(&mut self, dx: i32) -> Outcome {
        let next = self.player.pos.offset(dx, 0);
        if self.arena.collides(&self.player.matrix, next) {
            return Outcome::Blocked;
        }
        self.player.pos = next;
        Outcome::Moved
    }

    fn turn(&mut self, turn: Turn) -> Outcome {
        self.player.matrix = self.player.matrix.rotated(turn);
        if self.arena.collides(&self.player.matrix, self.player.pos) {
            self.player.matrix = self.player.matrix.rotated(turn.inverse());
            return Outcome::Blocked;
        }
        Outcome::Moved
    }

    fn descend(&mut self) -> Outcome {
        self.drop.reset();
        let next = self.player.pos.offset(0, 1);
        if !self.arena.collides(&self.player.matrix, next) {
            self.player.pos = next;
            return Outcome::Moved;
        }
        self.lock()
    }

    fn lock(&mut self) -> Outcome {
        self.arena.merge(&self.player.matrix, self.player.pos);
        let rows_cleared = self.arena.sweep();
        self.player.score = self
            .player
            .score
            .saturating_add(rows_cleared.saturating_mul(self.config.line_bonus));
        if self.spawn() {
            self.top_out();
            Outcome::ToppedOut { rows_cleared }
        } else {
            Outcome::Locked { rows_cleared }
        }
    }

    /// Draw the next piece centered on row 0. Returns true if it collides.
    fn spawn(&mut self) -> bool {
        self.player.matrix = self.shapes.next_shape().matrix();
        let spare = self.arena.width() as i32 - self.player.matrix.width() as i32;
        self.player.pos = Position::new(spare.div_euclid(2), 0);
        self.arena.collides(&self.player.matrix, self.player.pos)
    }

    fn top_out(&mut self) {
        self.arena.clear();
        self.player.score = 0;
    }
}
