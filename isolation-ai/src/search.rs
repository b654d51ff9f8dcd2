//! 搜索引擎
//!
//! 深度受限的 Minimax 与 Alpha-Beta 剪枝。每个递归入口先检查剩余时间，
//! 不足阈值时返回 [`SearchError::Timeout`]，沿调用链一路返回，本次搜索结果作废。
//!
//! 评估始终从根节点走子方（搜索方）的视角进行，包括对手的极小层。

use isolation::{Board, GameError, Move, Player};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::evaluate::{Evaluator, Score, LOSS, WIN};
use crate::timer::TimeLeft;

/// 搜索中止原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// 剩余时间不足，本次搜索中止
    #[error("search timed out")]
    Timeout,

    /// 领域错误
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// 搜索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    Minimax,
    AlphaBeta,
}

/// 搜索统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// 访问的节点数（含根节点）
    pub nodes: u64,
    /// Alpha-Beta 剪枝次数
    pub cutoffs: u64,
}

/// 一次搜索的上下文
pub struct Searcher<'a> {
    evaluator: &'a dyn Evaluator,
    clock: &'a dyn TimeLeft,
    /// 搜索方，所有评估都从该视角进行
    player: Player,
    threshold_ms: f64,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(
        evaluator: &'a dyn Evaluator,
        clock: &'a dyn TimeLeft,
        player: Player,
        threshold_ms: f64,
    ) -> Self {
        Self {
            evaluator,
            clock,
            player,
            threshold_ms,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 每个递归入口都必须先调用
    #[inline]
    fn check_time(&mut self) -> SearchResult<()> {
        self.stats.nodes += 1;
        if self.clock.remaining_ms() < self.threshold_ms {
            return Err(SearchError::Timeout);
        }
        Ok(())
    }

    #[inline]
    fn evaluate(&self, board: &Board) -> SearchResult<Score> {
        Ok(self.evaluator.evaluate(board, self.player)?)
    }

    /// 按策略搜索固定深度
    pub fn search(
        &mut self,
        strategy: SearchStrategy,
        board: &Board,
        depth: u8,
    ) -> SearchResult<Option<Move>> {
        match strategy {
            SearchStrategy::Minimax => self.minimax(board, depth),
            SearchStrategy::AlphaBeta => self.alphabeta(board, depth, LOSS, WIN),
        }
    }

    // ------------------------------------------------------------------
    // Minimax
    // ------------------------------------------------------------------

    /// Minimax 根节点：返回得分最高的走法，同分取枚举顺序中的第一个
    pub fn minimax(&mut self, board: &Board, depth: u8) -> SearchResult<Option<Move>> {
        self.check_time()?;

        let moves = board.active_legal_moves();
        let Some(&first) = moves.first() else {
            return Ok(None);
        };
        if depth < 1 {
            return Ok(Some(first));
        }

        let mut best_move = first;
        let mut best_score = LOSS;
        for mv in moves {
            let next = board.forecast_move(mv)?;
            let score = self.minimax_min(&next, depth - 1)?;
            if score > best_score {
                best_move = mv;
                best_score = score;
            }
        }
        Ok(Some(best_move))
    }

    /// Minimax 极大层
    pub fn minimax_max(&mut self, board: &Board, depth: u8) -> SearchResult<Score> {
        self.check_time()?;

        let moves = board.active_legal_moves();
        if depth == 0 || moves.is_empty() {
            return self.evaluate(board);
        }
        let utility = board.utility(self.player);
        if utility != 0.0 {
            return Ok(utility);
        }

        let mut best = LOSS;
        for mv in moves {
            let next = board.forecast_move(mv)?;
            best = best.max(self.minimax_min(&next, depth - 1)?);
        }
        Ok(best)
    }

    /// Minimax 极小层
    pub fn minimax_min(&mut self, board: &Board, depth: u8) -> SearchResult<Score> {
        self.check_time()?;

        let moves = board.active_legal_moves();
        if depth == 0 || moves.is_empty() {
            return self.evaluate(board);
        }
        let utility = board.utility(self.player);
        if utility != 0.0 {
            return Ok(utility);
        }

        let mut best = WIN;
        for mv in moves {
            let next = board.forecast_move(mv)?;
            best = best.min(self.minimax_max(&next, depth - 1)?);
        }
        Ok(best)
    }

    // ------------------------------------------------------------------
    // Alpha-Beta
    // ------------------------------------------------------------------

    /// Alpha-Beta 根节点：返回得分最高的走法，同分取枚举顺序中的第一个
    pub fn alphabeta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: Score,
        beta: Score,
    ) -> SearchResult<Option<Move>> {
        self.check_time()?;

        let moves = board.active_legal_moves();
        let Some(&first) = moves.first() else {
            return Ok(None);
        };
        if depth < 1 {
            return Ok(Some(first));
        }

        let mut best_move = first;
        let mut best_score = LOSS;
        for mv in moves {
            let next = board.forecast_move(mv)?;
            let score = self.min_value(&next, depth - 1, alpha, beta)?;
            if score > best_score {
                best_move = mv;
                best_score = score;
            }
            if best_score >= beta {
                self.stats.cutoffs += 1;
                break;
            }
            alpha = alpha.max(best_score);
        }
        Ok(Some(best_move))
    }

    /// Alpha-Beta 极大层
    pub fn max_value(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: Score,
        beta: Score,
    ) -> SearchResult<Score> {
        self.check_time()?;

        let moves = board.active_legal_moves();
        if depth == 0 || moves.is_empty() {
            return self.evaluate(board);
        }
        let utility = board.utility(self.player);
        if utility != 0.0 {
            return Ok(utility);
        }

        let mut best = LOSS;
        for mv in moves {
            let next = board.forecast_move(mv)?;
            let score = self.min_value(&next, depth - 1, alpha, beta)?;
            if score > best {
                best = score;
            }
            if best >= beta {
                self.stats.cutoffs += 1;
                return Ok(best);
            }
            alpha = alpha.max(best);
        }
        Ok(best)
    }

    /// Alpha-Beta 极小层
    pub fn min_value(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: Score,
        mut beta: Score,
    ) -> SearchResult<Score> {
        self.check_time()?;

        let moves = board.active_legal_moves();
        if depth == 0 || moves.is_empty() {
            return self.evaluate(board);
        }
        let utility = board.utility(self.player);
        if utility != 0.0 {
            return Ok(utility);
        }

        let mut best = WIN;
        for mv in moves {
            let next = board.forecast_move(mv)?;
            let score = self.max_value(&next, depth - 1, alpha, beta)?;
            if score < best {
                best = score;
            }
            if best <= alpha {
                self.stats.cutoffs += 1;
                return Ok(best);
            }
            beta = beta.min(best);
        }
        Ok(best)
    }
}
