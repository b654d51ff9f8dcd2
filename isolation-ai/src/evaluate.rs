//! 局面评估函数
//!
//! 所有评估器都从给定玩家的视角打分，且不修改棋盘。

use isolation::{Board, GameError, Player, MIDGAME_FILL_RATIO};
use serde::{Deserialize, Serialize};

/// 评估分数
pub type Score = f64;

/// 必败
pub const LOSS: Score = f64::NEG_INFINITY;

/// 必胜
pub const WIN: Score = f64::INFINITY;

/// 评估器
pub trait Evaluator {
    /// 从 `player` 视角评估局面
    fn evaluate(&self, board: &Board, player: Player) -> Result<Score, GameError>;

    /// 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 已分胜负时返回哨兵分数
fn decided(board: &Board, player: Player) -> Option<Score> {
    if board.is_loser(player) {
        Some(LOSS)
    } else if board.is_winner(player) {
        Some(WIN)
    } else {
        None
    }
}

/// 只计己方可走步数
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoves;

impl Evaluator for OpenMoves {
    fn evaluate(&self, board: &Board, player: Player) -> Result<Score, GameError> {
        if let Some(score) = decided(board, player) {
            return Ok(score);
        }
        Ok(board.legal_moves(player).len() as Score)
    }

    fn name(&self) -> &'static str {
        "open_moves"
    }
}

/// 机动性差：己方步数 − 对方步数
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityDifference;

impl Evaluator for MobilityDifference {
    fn evaluate(&self, board: &Board, player: Player) -> Result<Score, GameError> {
        if let Some(score) = decided(board, player) {
            return Ok(score);
        }
        let own = board.legal_moves(player).len() as Score;
        let opp = board.legal_moves(player.opponent()).len() as Score;
        Ok(own - opp)
    }

    fn name(&self) -> &'static str {
        "mobility_difference"
    }
}

/// 按阶段加权并除以双方曼哈顿距离
///
/// 落子比例超过 [`MIDGAME_FILL_RATIO`] 后对方步数加倍计入。
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseWeighted;

impl Evaluator for PhaseWeighted {
    fn evaluate(&self, board: &Board, player: Player) -> Result<Score, GameError> {
        if let Some(score) = decided(board, player) {
            return Ok(score);
        }
        let own = board.legal_moves(player).len() as Score;
        let opp = board.legal_moves(player.opponent()).len() as Score;

        let fill_ratio = board.ply() as f64 / (board.height() as f64 * board.width() as f64);
        let diff = if fill_ratio > MIDGAME_FILL_RATIO {
            own - 2.0 * opp
        } else {
            own - opp
        };

        let own_pos = board
            .location(player)
            .ok_or(GameError::PlayerNotPlaced(player))?;
        let opp_pos = board
            .location(player.opponent())
            .ok_or(GameError::PlayerNotPlaced(player.opponent()))?;

        let distance = own_pos.manhattan(&opp_pos);
        if distance == 0 {
            return Err(GameError::CoincidentPlayers {
                row: own_pos.row,
                col: own_pos.col,
            });
        }
        Ok(diff / distance as Score)
    }

    fn name(&self) -> &'static str {
        "phase_weighted"
    }
}

/// 可配置的评估器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    OpenMoves,
    MobilityDifference,
    PhaseWeighted,
}

impl EvaluatorKind {
    pub fn build(self) -> Box<dyn Evaluator> {
        match self {
            EvaluatorKind::OpenMoves => Box::new(OpenMoves),
            EvaluatorKind::MobilityDifference => Box::new(MobilityDifference),
            EvaluatorKind::PhaseWeighted => Box::new(PhaseWeighted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation::Move;

    fn scenario() -> Board {
        Board::replay(7, 7, &[Move::new(2, 3), Move::new(0, 5)]).unwrap()
    }

    #[test]
    fn test_open_moves() {
        let board = scenario();
        assert_eq!(OpenMoves.evaluate(&board, Player::First).unwrap(), 8.0);
        assert_eq!(OpenMoves.evaluate(&board, Player::Second).unwrap(), 3.0);
    }

    #[test]
    fn test_mobility_difference() {
        let board = scenario();
        assert_eq!(MobilityDifference.evaluate(&board, Player::First).unwrap(), 5.0);
        assert_eq!(MobilityDifference.evaluate(&board, Player::Second).unwrap(), -5.0);
    }

    #[test]
    fn test_phase_weighted_opening() {
        // 2/49 < 0.33，不加权；距离 |2-0| + |3-5| = 4
        let board = scenario();
        assert_eq!(PhaseWeighted.evaluate(&board, Player::First).unwrap(), 5.0 / 4.0);
    }

    #[test]
    fn test_phase_weighted_late_game() {
        // 4x4 上走 6 步，6/16 > 0.33，对方步数加倍
        let board = Board::replay(
            4,
            4,
            &[
                Move::new(0, 0),
                Move::new(3, 3),
                Move::new(1, 2),
                Move::new(2, 1),
                Move::new(3, 1),
                Move::new(0, 2),
            ],
        )
        .unwrap();
        assert_eq!(board.legal_moves(Player::First).len(), 2);
        assert_eq!(board.legal_moves(Player::Second).len(), 2);
        // (2 - 2*2) / 4
        assert_eq!(PhaseWeighted.evaluate(&board, Player::First).unwrap(), -0.5);
    }

    #[test]
    fn test_phase_weighted_requires_placement() {
        let board = Board::replay(7, 7, &[Move::new(3, 3)]).unwrap();
        assert_eq!(
            PhaseWeighted.evaluate(&board, Player::Second),
            Err(GameError::PlayerNotPlaced(Player::Second))
        );
    }

    #[test]
    fn test_phase_weighted_rejects_zero_distance() {
        // 规则下不可能出现，只能通过反序列化构造
        let mut value = serde_json::to_value(scenario()).unwrap();
        value["locations"][1] = value["locations"][0].clone();
        // 后手原位置 (0,5) 改为封锁格，否则棋盘校验会拒绝
        value["cells"][5] = serde_json::json!("Blocked");
        let board: Board = serde_json::from_value(value).unwrap();

        assert_eq!(
            PhaseWeighted.evaluate(&board, Player::First),
            Err(GameError::CoincidentPlayers { row: 2, col: 3 })
        );
    }

    #[test]
    fn test_decided_positions() {
        let board = Board::replay(3, 3, &[Move::new(1, 1), Move::new(0, 0)]).unwrap();
        for kind in [
            EvaluatorKind::OpenMoves,
            EvaluatorKind::MobilityDifference,
            EvaluatorKind::PhaseWeighted,
        ] {
            let eval = kind.build();
            assert_eq!(eval.evaluate(&board, Player::First).unwrap(), LOSS);
            assert_eq!(eval.evaluate(&board, Player::Second).unwrap(), WIN);
        }
    }

    #[test]
    fn test_sentinels_bound_finite_scores() {
        assert!(LOSS < -1e300);
        assert!(WIN > 1e300);
    }
}
