//! 搜索与开局库的整体性质

use std::collections::HashSet;

use isolation::{Board, Move, Symmetry};
use isolation_ai::{
    AiConfig, AiEngine, Agent, Canonicalizer, Deadline, MobilityDifference, OpenMoves, OpeningBook,
    PhaseWeighted, RandomAgent, SearchStrategy, Searcher, LOSS, WIN,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn plenty() -> f64 {
    1_000.0
}

/// 用随机选手从空棋盘走 `plies` 步
fn random_position(side: u8, plies: usize, seed: u64) -> Board {
    let mut board = Board::new(side, side).unwrap();
    let mut agent = RandomAgent::new(seed);
    for _ in 0..plies {
        match agent.choose_move(&board, &plenty).unwrap() {
            Some(mv) => board.apply_move(mv).unwrap(),
            None => break,
        }
    }
    board
}

fn positions() -> Vec<Board> {
    let mut boards = vec![Board::replay(7, 7, &[Move::new(2, 3), Move::new(0, 5)]).unwrap()];
    for seed in 0..6 {
        boards.push(random_position(5, 4 + seed as usize, seed));
        boards.push(random_position(7, 6 + seed as usize, seed + 100));
    }
    boards
}

#[test]
fn minimax_and_alphabeta_agree() {
    init_tracing();
    for board in positions() {
        for depth in 1..=3 {
            let mut mm = Searcher::new(&MobilityDifference, &plenty, board.active_player(), 10.0);
            let mut ab = Searcher::new(&MobilityDifference, &plenty, board.active_player(), 10.0);

            assert_eq!(
                mm.search(SearchStrategy::Minimax, &board, depth).unwrap(),
                ab.search(SearchStrategy::AlphaBeta, &board, depth).unwrap(),
                "depth {depth}\n{board}"
            );
            assert_eq!(
                mm.minimax_max(&board, depth).unwrap(),
                ab.max_value(&board, depth, LOSS, WIN).unwrap(),
                "depth {depth}\n{board}"
            );
            assert!(ab.stats().nodes <= mm.stats().nodes);
        }
    }
}

#[test]
fn proven_win_stays_won() {
    // 3x3 中心没有马步，后手困在中心，先手任意一步即胜
    let board = Board::replay(3, 3, &[Move::new(0, 0), Move::new(1, 1)]).unwrap();
    for depth in 1..=5 {
        let mut searcher = Searcher::new(&OpenMoves, &plenty, board.active_player(), 10.0);
        assert_eq!(searcher.minimax_max(&board, depth).unwrap(), WIN);
        assert_eq!(searcher.max_value(&board, depth, LOSS, WIN).unwrap(), WIN);
    }
}

/// 加深搜索的合理性约束：每个深度的分数都落在 [LOSS, WIN] 内且不是 NaN；
/// 一旦在某深度得出必胜或必败，更深的搜索不会推翻。
/// 有限分数随深度的涨落不做约束（启发式分数本身不单调）。
#[test]
fn decided_scores_are_stable_with_depth() {
    for board in positions() {
        let mut searcher =
            Searcher::new(&MobilityDifference, &plenty, board.active_player(), 10.0);
        let mut previous = None;
        for depth in 1..=4 {
            let score = searcher.max_value(&board, depth, LOSS, WIN).unwrap();
            assert!(!score.is_nan(), "depth {depth}\n{board}");
            assert!((LOSS..=WIN).contains(&score), "depth {depth}\n{board}");
            if score.is_finite() {
                // 有限分数不超过棋盘上可能的最大步数差
                let cells = board.height() as f64 * board.width() as f64;
                assert!(score.abs() <= cells, "depth {depth}\n{board}");
            }
            if let Some(prev) = previous {
                if prev == WIN || prev == LOSS {
                    assert_eq!(score, prev, "depth {depth}\n{board}");
                }
            }
            previous = Some(score);
        }
    }
}

#[test]
fn scenario_scores() {
    let board = Board::replay(7, 7, &[Move::new(2, 3), Move::new(0, 5)]).unwrap();
    let mut searcher = Searcher::new(&OpenMoves, &plenty, board.active_player(), 10.0);
    assert_eq!(searcher.max_value(&board, 0, LOSS, WIN).unwrap(), 8.0);
    assert_eq!(searcher.max_value(&board, 1, LOSS, WIN).unwrap(), 7.0);
    assert_eq!(
        searcher.alphabeta(&board, 1, LOSS, WIN).unwrap(),
        Some(Move::new(4, 2))
    );
}

#[test]
fn book_answers_every_orientation() {
    for seed in 0..4 {
        let board = random_position(7, 3, seed);
        let Some(&reply) = board.active_legal_moves().first() else {
            continue;
        };
        // 自身对称的局面中不同方向可能给出等价但不同的走法
        let hashes = Canonicalizer::new(7).hashes(&board).unwrap();
        let distinct: HashSet<u64> = hashes.iter().map(|(_, h)| *h).collect();
        if distinct.len() < 8 {
            continue;
        }

        let mut book = OpeningBook::new(7);
        book.record(&board, reply);

        for tag in Symmetry::ALL {
            let physical = board.transformed(tag).unwrap();
            let found = book.lookup(&physical).unwrap();
            assert_eq!(found, tag.apply(reply, 7), "seed {seed} {tag}");
            assert!(physical.move_is_legal(found));
        }
    }
}

#[test]
fn engine_always_returns_legal_move() {
    init_tracing();
    let mut engine = AiEngine::new(AiConfig {
        evaluator: isolation_ai::EvaluatorKind::PhaseWeighted,
        ..AiConfig::default()
    });
    for board in positions() {
        if board.active_legal_moves().is_empty() {
            continue;
        }
        let clock = Deadline::after_ms(40);
        let mv = engine.choose_move(&board, &clock).unwrap().unwrap();
        assert!(board.move_is_legal(mv), "{mv}\n{board}");
    }
}

#[test]
fn phase_weighted_search_from_second_player() {
    let board = random_position(7, 5, 42);
    if board.active_legal_moves().is_empty() {
        return;
    }
    let mut searcher = Searcher::new(&PhaseWeighted, &plenty, board.active_player(), 10.0);
    let mv = searcher.alphabeta(&board, 2, LOSS, WIN).unwrap().unwrap();
    assert!(board.move_is_legal(mv));
}
