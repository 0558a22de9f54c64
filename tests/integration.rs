// Integration tests (native) for the `canvas-tetris` crate.
// These drive the engine through its public API only, with scripted shape
// sequences so every scenario is reproducible on the host.

use canvas_tetris::engine::{Engine, Outcome, Position, Shape, ShapeCycle};
use canvas_tetris::{Command, Game, GameConfig};

fn engine(shapes: &[Shape]) -> Engine<ShapeCycle> {
    let mut e = Engine::with_source(GameConfig::default(), ShapeCycle::new(shapes.to_vec()));
    e.start();
    e
}

fn drop_until_locked<S: canvas_tetris::engine::ShapeSource>(e: &mut Engine<S>) -> Outcome {
    loop {
        match e.apply(Command::SoftDrop) {
            Outcome::Moved => continue,
            other => return other,
        }
    }
}

// O piece falls on the timer alone and locks on the floor.
#[test]
fn o_piece_falls_and_locks_on_the_floor() {
    let mut e = engine(&[Shape::O]);
    assert_eq!(e.player().pos, Position::new(4, 0));
    for step in 1..=18 {
        assert_eq!(e.tick(1001.0), Some(Outcome::Moved), "tick {}", step);
    }
    assert_eq!(e.player().pos.y, 18);
    assert_eq!(e.tick(1001.0), Some(Outcome::Locked { rows_cleared: 0 }));

    let rows = e.arena().rows();
    for y in 18..20 {
        assert_eq!(rows[y], vec![0, 0, 0, 0, 4, 4, 0, 0, 0, 0], "row {}", y);
    }
    assert_eq!(e.score(), 0);
    assert_eq!(e.player().pos, Position::new(4, 0));
    assert_eq!(e.player().matrix, Shape::O.matrix());
}

// Bar left, square in the middle, bar right: the bottom row clears.
#[test]
fn completing_the_bottom_row_clears_it_and_scores() {
    let mut e = engine(&[Shape::I, Shape::O, Shape::I]);

    for _ in 0..3 {
        assert_eq!(e.move_horizontal(-1), Outcome::Moved);
    }
    assert_eq!(e.move_horizontal(-1), Outcome::Blocked);
    assert_eq!(drop_until_locked(&mut e), Outcome::Locked { rows_cleared: 0 });

    assert_eq!(drop_until_locked(&mut e), Outcome::Locked { rows_cleared: 0 });

    for _ in 0..3 {
        assert_eq!(e.move_horizontal(1), Outcome::Moved);
    }
    assert_eq!(drop_until_locked(&mut e), Outcome::Locked { rows_cleared: 1 });

    assert_eq!(e.score(), 10);
    let rows = e.arena().rows();
    // the upper half of the square shifted down into the cleared row
    assert_eq!(rows[19], vec![0, 0, 0, 0, 4, 4, 0, 0, 0, 0]);
    assert!(rows[..19].iter().all(|row| row.iter().all(|&c| c == 0)));
    assert_eq!(e.player().matrix, Shape::I.matrix());
}

#[test]
fn stacking_to_the_top_resets_the_game() {
    let mut e = engine(&[Shape::O]);
    let mut locks = 0;
    let outcome = loop {
        match drop_until_locked(&mut e) {
            Outcome::Locked { rows_cleared: 0 } => locks += 1,
            other => break other,
        }
    };
    // ten squares fill the middle columns; the eleventh cannot spawn
    assert_eq!(locks, 9);
    assert_eq!(outcome, Outcome::ToppedOut { rows_cleared: 0 });
    assert!(e.arena().is_clear());
    assert_eq!(e.score(), 0);
    assert!(e.is_running());
    assert_eq!(e.player().pos, Position::new(4, 0));
}

#[test]
fn nothing_happens_before_start() {
    let mut e = Engine::with_source(GameConfig::default(), ShapeCycle::new(vec![Shape::T]));
    assert_eq!(e.tick(10_000.0), None);
    assert_eq!(e.apply(Command::RotateCw), Outcome::Ignored);
    assert!(e.arena().is_clear());
    assert!(e.player().matrix.is_empty());
}

#[test]
fn custom_config_changes_arena_and_cadence() {
    let config = GameConfig {
        width: 6,
        height: 8,
        drop_interval_ms: 100.0,
        line_bonus: 25,
    };
    assert!(config.validate().is_ok());
    let mut e = Engine::with_source(config, ShapeCycle::new(vec![Shape::I, Shape::O]));
    e.start();
    assert_eq!(e.player().pos, Position::new(1, 0));
    assert_eq!(e.tick(101.0), Some(Outcome::Moved));

    // bar covers columns 0..4 on the floor, square fills 4..6
    e.move_horizontal(-1);
    assert_eq!(drop_until_locked(&mut e), Outcome::Locked { rows_cleared: 0 });
    for _ in 0..2 {
        e.move_horizontal(1);
    }
    assert_eq!(drop_until_locked(&mut e), Outcome::Locked { rows_cleared: 1 });
    assert_eq!(e.score(), 25);
}

#[test]
fn game_class_exposes_a_consistent_view() {
    let mut game = Game::new();
    game.on_start();
    assert_eq!(game.grid().len(), game.grid_width() * game.grid_height());
    let spare = game.grid_width() as i32 - game.piece_width() as i32;
    assert_eq!(game.piece_x(), spare.div_euclid(2));
    assert_eq!(
        game.piece_matrix().len(),
        game.piece_width() * game.piece_height()
    );
    game.on_move_horizontal(-1);
    game.on_rotate(1);
    game.on_rotate(-1);
    while game.on_hard_drop().is_none() {}
    assert_eq!(game.grid().iter().filter(|&&c| c != 0).count(), 4);
    assert_eq!(game.score(), 0);
}
