mod common;

use common::*;
use plum_core::move_generation::perft::{perft, perft_divide, PerftCounts};
use plum_core::GameState;

fn nodes(fen: &str, depth: u8) -> u64 {
    let mut game_state = game(fen);
    let before = game_state.clone();
    let counts = perft(&PseudoLegalGenerator, &mut game_state, depth).expect("perft should run");
    assert_eq!(game_state, before, "perft must leave the position untouched");
    counts.nodes
}

#[test]
fn perft_starting_position() {
    let expected = [20, 400, 8_902];
    for (depth, nodes_expected) in expected.into_iter().enumerate() {
        assert_eq!(nodes(STARTPOS_FEN, depth as u8 + 1), nodes_expected);
    }
}

#[test]
fn perft_starting_position_move_classes() {
    let mut game_state = GameState::new_game();
    let counts = perft(&PseudoLegalGenerator, &mut game_state, 3).expect("perft should run");
    assert_eq!(
        counts,
        PerftCounts {
            nodes: 8_902,
            captures: 34,
            en_passant: 0,
            castles: 0,
            promotions: 0,
            checks: 12,
            checkmates: 0,
        }
    );
}

#[test]
fn perft_kiwipete() {
    assert_eq!(nodes(KIWIPETE_FEN, 1), 48);
    assert_eq!(nodes(KIWIPETE_FEN, 2), 2_039);
    assert_eq!(nodes(KIWIPETE_FEN, 3), 97_862);

    let mut game_state = game(KIWIPETE_FEN);
    let counts = perft(&PseudoLegalGenerator, &mut game_state, 2).expect("perft should run");
    assert_eq!(counts.captures, 351);
    assert_eq!(counts.en_passant, 1);
    assert_eq!(counts.castles, 91);
    assert_eq!(counts.promotions, 0);
    assert_eq!(counts.checks, 3);
}

#[test]
fn perft_position_3_en_passant_pins() {
    let expected = [14, 191, 2_812, 43_238];
    for (depth, nodes_expected) in expected.into_iter().enumerate() {
        assert_eq!(nodes(POSITION_3_FEN, depth as u8 + 1), nodes_expected);
    }
}

#[test]
fn perft_position_4_promotions_and_castling() {
    let expected = [6, 264, 9_467];
    for (depth, nodes_expected) in expected.into_iter().enumerate() {
        assert_eq!(nodes(POSITION_4_FEN, depth as u8 + 1), nodes_expected);
    }
}

#[test]
fn perft_position_5() {
    assert_eq!(nodes(POSITION_5_FEN, 1), 44);
    assert_eq!(nodes(POSITION_5_FEN, 2), 1_486);
    assert_eq!(nodes(POSITION_5_FEN, 3), 62_379);
}

#[test]
fn divide_sums_to_perft() {
    let mut game_state = game(KIWIPETE_FEN);
    let divided =
        perft_divide(&PseudoLegalGenerator, &mut game_state, 2).expect("divide should run");
    assert_eq!(divided.len(), 48);
    assert_eq!(divided.iter().map(|(_, n)| n).sum::<u64>(), 2_039);
}

#[test]
fn depth_zero_counts_the_root() {
    assert_eq!(nodes(STARTPOS_FEN, 0), 1);
}
