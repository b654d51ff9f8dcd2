//! AI 引擎
//!
//! 固定开局 → 开局库 → 迭代加深搜索。迭代加深只采信完整跑完的深度，
//! 超时时退回上一个完成深度的走法。

use isolation::{
    Board, GameError, Move, BOOK_PLY_CUTOFF, DEFAULT_TIMER_THRESHOLD_MS, MAX_SEARCH_DEPTH,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::book::OpeningBook;
use crate::evaluate::{Evaluator, EvaluatorKind};
use crate::search::{SearchError, SearchStrategy, Searcher};
use crate::timer::TimeLeft;

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub strategy: SearchStrategy,
    pub evaluator: EvaluatorKind,
    /// 迭代加深的最大深度
    pub max_depth: u8,
    /// 剩余时间低于此值（毫秒）即中止搜索
    pub timer_threshold_ms: f64,
    pub use_opening_book: bool,
    /// 只记录不超过此步数的局面
    pub book_ply_cutoff: u32,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                strategy: SearchStrategy::Minimax,
                evaluator: EvaluatorKind::OpenMoves,
                max_depth: 3,
                timer_threshold_ms: DEFAULT_TIMER_THRESHOLD_MS,
                use_opening_book: false,
                book_ply_cutoff: BOOK_PLY_CUTOFF,
            },
            Difficulty::Medium => Self {
                strategy: SearchStrategy::AlphaBeta,
                evaluator: EvaluatorKind::MobilityDifference,
                max_depth: MAX_SEARCH_DEPTH,
                timer_threshold_ms: DEFAULT_TIMER_THRESHOLD_MS,
                use_opening_book: false,
                book_ply_cutoff: BOOK_PLY_CUTOFF,
            },
            Difficulty::Hard => Self {
                strategy: SearchStrategy::AlphaBeta,
                evaluator: EvaluatorKind::PhaseWeighted,
                max_depth: MAX_SEARCH_DEPTH,
                timer_threshold_ms: 1.0,
                use_opening_book: true,
                book_ply_cutoff: BOOK_PLY_CUTOFF,
            },
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Medium)
    }
}

/// 走法来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveSource {
    /// 没有合法走法
    #[default]
    NoMove,
    /// 固定开局（中心格）
    Opening,
    /// 开局库
    Book,
    /// 搜索
    Search,
}

/// 最近一次选步的报告
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchReport {
    pub source: MoveSource,
    /// 最后完整完成的深度，0 表示一层也没完成
    pub completed_depth: u8,
    pub nodes: u64,
    pub cutoffs: u64,
    pub timed_out: bool,
    /// 本次写入开局库的条目数
    pub book_entries_added: usize,
}

/// AI 引擎
pub struct AiEngine {
    config: AiConfig,
    evaluator: Box<dyn Evaluator>,
    book: Option<OpeningBook>,
    last_report: SearchReport,
}

impl AiEngine {
    pub fn new(config: AiConfig) -> Self {
        Self {
            evaluator: config.evaluator.build(),
            config,
            book: None,
            last_report: SearchReport::default(),
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 使用自定义评估器
    pub fn with_evaluator(config: AiConfig, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            evaluator,
            ..Self::new(config)
        }
    }

    /// 装入开局库
    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = Some(book);
        self
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 评估器名称
    pub fn evaluator_name(&self) -> &'static str {
        self.evaluator.name()
    }

    pub fn book(&self) -> Option<&OpeningBook> {
        self.book.as_ref()
    }

    /// 取出开局库（用于保存）
    pub fn take_book(&mut self) -> Option<OpeningBook> {
        self.book.take()
    }

    pub fn last_report(&self) -> SearchReport {
        self.last_report
    }

    /// 为当前走子方选择走法；无合法走法时返回 None
    pub fn choose_move(
        &mut self,
        board: &Board,
        clock: &dyn TimeLeft,
    ) -> Result<Option<Move>, GameError> {
        self.last_report = SearchReport::default();

        let moves = board.active_legal_moves();
        let Some(&first) = moves.first() else {
            return Ok(None);
        };

        if let Some(mv) = opening_move(board) {
            self.last_report.source = MoveSource::Opening;
            return Ok(Some(mv));
        }

        if self.config.use_opening_book {
            if let Some(mv) = self.consult_book(board) {
                self.last_report.source = MoveSource::Book;
                return Ok(Some(mv));
            }
        }

        let mut searcher = Searcher::new(
            self.evaluator.as_ref(),
            clock,
            board.active_player(),
            self.config.timer_threshold_ms,
        );

        let mut best = first;
        let mut completed_depth = 0;
        let mut timed_out = false;
        for depth in 1..=self.config.max_depth {
            match searcher.search(self.config.strategy, board, depth) {
                Ok(Some(mv)) => {
                    best = mv;
                    completed_depth = depth;
                    debug!(
                        depth,
                        best = %mv,
                        nodes = searcher.stats().nodes,
                        "search depth completed"
                    );
                }
                Ok(None) => break,
                Err(SearchError::Timeout) => {
                    timed_out = true;
                    break;
                }
                Err(SearchError::Game(e)) => return Err(e),
            }
        }

        let stats = searcher.stats();
        self.last_report = SearchReport {
            source: MoveSource::Search,
            completed_depth,
            nodes: stats.nodes,
            cutoffs: stats.cutoffs,
            timed_out,
            book_entries_added: 0,
        };

        if self.config.use_opening_book
            && completed_depth > 0
            && board.ply() <= self.config.book_ply_cutoff
        {
            let book = self
                .book
                .get_or_insert_with(|| OpeningBook::new(board.height()));
            self.last_report.book_entries_added = book.record(board, best);
        }

        debug!(
            ply = board.ply(),
            evaluator = self.evaluator_name(),
            completed_depth,
            timed_out,
            best = %best,
            "move chosen by search"
        );
        Ok(Some(best))
    }

    /// 查询开局库；命中但不合法时视为未命中
    fn consult_book(&self, board: &Board) -> Option<Move> {
        let book = self.book.as_ref()?;
        let mv = book.lookup(board)?;
        if board.move_is_legal(mv) {
            info!(ply = board.ply(), mv = %mv, "opening book hit");
            Some(mv)
        } else {
            warn!(ply = board.ply(), mv = %mv, "rejecting illegal opening book move");
            None
        }
    }
}

/// 固定开局：第一步走中心，第二步中心被占时走中心左上斜邻格
fn opening_move(board: &Board) -> Option<Move> {
    let center = Move::new(board.height() / 2, board.width() / 2);
    match board.ply() {
        0 => Some(center),
        1 if board.move_is_legal(center) => Some(center),
        1 if center.row > 0 && center.col > 0 => {
            let fallback = Move::new(center.row - 1, center.col - 1);
            board.move_is_legal(fallback).then_some(fallback)
        }
        _ => None,
    }
}
