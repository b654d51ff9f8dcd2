//! 对弈代理
//!
//! 对局循环只通过 [`Agent`] 与各类选手交互。

use isolation::{Board, GameError, Move};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::engine::AiEngine;
use crate::evaluate::Evaluator;
use crate::timer::TimeLeft;

/// 选手
pub trait Agent {
    /// 名称（写入对局记录）
    fn name(&self) -> &str;

    /// 为当前走子方选择走法；无合法走法时返回 None
    fn choose_move(
        &mut self,
        board: &Board,
        clock: &dyn TimeLeft,
    ) -> Result<Option<Move>, GameError>;
}

/// 搜索型选手
pub struct EngineAgent {
    name: String,
    engine: AiEngine,
}

impl EngineAgent {
    pub fn new(name: impl Into<String>, engine: AiEngine) -> Self {
        Self {
            name: name.into(),
            engine,
        }
    }

    pub fn engine(&self) -> &AiEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AiEngine {
        &mut self.engine
    }
}

impl Agent for EngineAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(
        &mut self,
        board: &Board,
        clock: &dyn TimeLeft,
    ) -> Result<Option<Move>, GameError> {
        self.engine.choose_move(board, clock)
    }
}

/// 随机选手（固定种子可复现）
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, board: &Board, _: &dyn TimeLeft) -> Result<Option<Move>, GameError> {
        Ok(board.active_legal_moves().choose(&mut self.rng).copied())
    }
}

/// 一步贪心：选评估分最高的后继局面，同分取第一个
pub struct GreedyAgent {
    evaluator: Box<dyn Evaluator>,
}

impl GreedyAgent {
    pub fn new(evaluator: Box<dyn Evaluator>) -> Self {
        Self { evaluator }
    }
}

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, board: &Board, _: &dyn TimeLeft) -> Result<Option<Move>, GameError> {
        let player = board.active_player();
        let mut best: Option<(Move, f64)> = None;
        for mv in board.active_legal_moves() {
            let score = self.evaluator.evaluate(&board.forecast_move(mv)?, player)?;
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        Ok(best.map(|(mv, _)| mv))
    }
}
