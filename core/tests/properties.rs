use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sweeper_core::*;

const CONFIGS: [GameConfig; 6] = [
    GameConfig::new_unchecked((3, 3), 1),
    GameConfig::new_unchecked((3, 3), 8),
    GameConfig::new_unchecked((8, 1), 3),
    GameConfig::beginner(),
    GameConfig::intermediate(),
    GameConfig::expert(),
];

fn engine(config: GameConfig, seed: u64, policy: FirstMovePolicy) -> Minesweeper {
    Minesweeper::new(config, RandomLayoutGenerator::new(seed, policy))
}

fn random_coords(rng: &mut SmallRng, size: Coord2) -> Coord2 {
    (rng.random_range(0..size.0), rng.random_range(0..size.1))
}

fn mine_neighbors(engine: &Minesweeper, coords: Coord2) -> u8 {
    NeighborIter::new(coords, engine.size())
        .filter(|&pos| engine.cell_at(pos).unwrap().is_mine)
        .count() as u8
}

fn assert_counters_consistent(engine: &Minesweeper) {
    let revealed_safe = engine
        .cells()
        .filter(|(_, cell)| cell.is_revealed && !cell.is_mine)
        .count() as CellCount;
    let triggered = engine.triggered_mine().map_or(0, |coords| {
        assert!(engine.cell_at(coords).unwrap().is_revealed);
        1
    });
    let flagged = engine.cells().filter(|(_, cell)| cell.is_flagged).count() as CellCount;

    assert!(engine.flagged_count() <= engine.mine_count());
    assert_eq!(engine.flagged_count(), flagged);
    assert_eq!(
        engine.remaining_flags(),
        engine.mine_count() - engine.flagged_count()
    );
    assert_eq!(engine.revealed_count(), revealed_safe + triggered);
    assert_eq!(
        engine.phase() == GamePhase::Won,
        revealed_safe == engine.safe_cell_count()
    );
}

#[test]
fn first_click_is_never_a_mine() {
    for config in CONFIGS {
        for seed in 0..25 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let start = random_coords(&mut rng, config.size);
            let mut game = engine(config, seed, FirstMovePolicy::SafeCell);

            assert_ne!(game.reveal(start), RevealOutcome::HitMine);
            assert!(!game.cell_at(start).unwrap().is_mine);
            assert_eq!(game.mine_count(), config.mines);
        }
    }
}

#[test]
fn first_click_neighborhood_floods_when_room_allows() {
    for seed in 0..25 {
        let mut game = engine(GameConfig::expert(), seed, FirstMovePolicy::SafeNeighborhood);
        game.reveal((15, 8));

        let start = game.cell_at((15, 8)).unwrap();
        assert_eq!(start.adjacent_mines, 0);
        assert!(NeighborIter::new((15, 8), game.size()).all(|pos| game.cell_at(pos).unwrap().is_revealed));
    }
}

#[test]
fn neighbor_counts_match_final_layout() {
    for config in CONFIGS {
        for seed in 0..10 {
            let mut game = engine(config, seed, FirstMovePolicy::SafeCell);
            game.reveal((0, 0));

            let mines = game.cells().filter(|(_, cell)| cell.is_mine).count() as CellCount;
            assert_eq!(mines, game.mine_count());
            for (coords, cell) in game.cells().filter(|(_, cell)| !cell.is_mine) {
                assert_eq!(cell.adjacent_mines, mine_neighbors(&game, coords), "at {:?}", coords);
            }
        }
    }
}

#[test]
fn flood_reveals_exactly_the_zero_region_and_its_border() {
    for seed in 0..40 {
        let mut game = engine(GameConfig::intermediate(), seed, FirstMovePolicy::SafeNeighborhood);
        game.reveal((8, 8));
        if game.phase() == GamePhase::Won {
            continue;
        }

        let revealed: Vec<_> = game.cells().filter(|(_, cell)| cell.is_revealed).collect();
        assert_eq!(game.revealed_count() as usize, revealed.len());

        for &(coords, cell) in &revealed {
            assert!(!cell.is_mine);
            // every revealed zero opens all of its neighbors
            if cell.adjacent_mines == 0 {
                for pos in NeighborIter::new(coords, game.size()) {
                    assert!(game.cell_at(pos).unwrap().is_revealed, "{:?} next to {:?}", pos, coords);
                }
            }
            // every revealed cell is the origin or touches a revealed zero
            let touches_zero = NeighborIter::new(coords, game.size()).any(|pos| {
                let neighbor = game.cell_at(pos).unwrap();
                neighbor.is_revealed && neighbor.adjacent_mines == 0
            });
            assert!(coords == (8, 8) || touches_zero, "stray reveal at {:?}", coords);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Move {
    Flag,
    Chord,
    Tick,
    Reveal,
}

fn full_state(engine: &Minesweeper) -> (BoardSnapshot, Vec<(Coord2, Cell)>) {
    (engine.snapshot(), engine.cells().collect())
}

#[test]
fn random_play_keeps_invariants() {
    for config in CONFIGS {
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed ^ 0x5eed);
            let mut game = engine(config, seed, FirstMovePolicy::SafeCell);

            for _ in 0..400 {
                let coords = random_coords(&mut rng, config.size);
                let action = match rng.random_range(0..10) {
                    0..=2 => Move::Flag,
                    3 => Move::Chord,
                    4 => Move::Tick,
                    _ => Move::Reveal,
                };
                let before = game.clone();
                let updated = match action {
                    Move::Flag => game.toggle_flag(coords).has_update(),
                    Move::Chord => game.chord_reveal(coords).has_update(),
                    Move::Tick => game.tick(),
                    Move::Reveal => game.reveal(coords).has_update(),
                };

                if before.is_finished() {
                    assert!(!updated, "{:?} changed a finished game", action);
                    assert_eq!(full_state(&game), full_state(&before));
                }
                if game.phase() == GamePhase::Lost && !before.is_finished() {
                    check_loss_transition(&before, &game, action);
                }
                assert_counters_consistent(&game);
            }
        }
    }
}

fn check_loss_transition(before: &Minesweeper, after: &Minesweeper, action: Move) {
    let triggered = after.triggered_mine().unwrap();
    assert!(after.cell_at(triggered).unwrap().is_mine);
    if matches!(action, Move::Reveal) {
        assert_eq!(after.revealed_count(), before.revealed_count() + 1);
    }
    assert!(!after.timer().is_running());

    for (coords, cell) in after.cells() {
        let prior = before.cell_at(coords).unwrap();
        if cell.is_mine {
            assert!(cell.is_revealed);
            assert_eq!(cell.is_flagged, prior.is_flagged);
        } else if matches!(action, Move::Reveal) {
            assert_eq!(cell, prior, "loss changed safe cell {:?}", coords);
        } else {
            // a chord may open safe cells before it reaches the mine
            assert_eq!(cell.is_flagged, prior.is_flagged);
        }
    }
}

#[test]
fn win_flags_every_mine() {
    for config in CONFIGS {
        for seed in 0..10 {
            let mut game = engine(config, seed, FirstMovePolicy::SafeCell);
            game.reveal((0, 0));

            let safe: Vec<Coord2> = game
                .cells()
                .filter(|(_, cell)| !cell.is_mine)
                .map(|(coords, _)| coords)
                .collect();
            for coords in safe {
                game.reveal(coords);
            }

            assert_eq!(game.phase(), GamePhase::Won);
            assert_eq!(game.revealed_count(), config.safe_cell_count());
            assert_eq!(game.remaining_flags(), 0);
            assert_eq!(game.flagged_count(), config.mines);
            assert!(game.cells().filter(|(_, cell)| cell.is_mine).all(|(_, cell)| cell.is_flagged));
        }
    }
}

#[test]
fn reset_draws_a_new_layout_from_the_same_generator() {
    let mut game = engine(GameConfig::intermediate(), 9, FirstMovePolicy::SafeCell);
    game.reveal((0, 0));
    let first: Vec<bool> = game.cells().map(|(_, cell)| cell.is_mine).collect();

    game.reset();
    game.reveal((0, 0));
    let second: Vec<bool> = game.cells().map(|(_, cell)| cell.is_mine).collect();

    assert_ne!(first, second);
}
