//! Isolation AI 引擎
//!
//! 包含:
//! - 局面评估函数
//! - Minimax + Alpha-Beta 搜索
//! - 迭代加深与超时回退
//! - Zobrist 哈希与对称规范化
//! - 开局库

mod agents;
mod book;
mod canonical;
mod engine;
mod evaluate;
mod search;
mod timer;
mod zobrist;

pub use agents::{Agent, EngineAgent, GreedyAgent, RandomAgent};
pub use book::{BookEntry, BookError, BookStats, OpeningBook};
pub use canonical::Canonicalizer;
pub use engine::{AiConfig, AiEngine, Difficulty, MoveSource, SearchReport};
pub use evaluate::{
    Evaluator, EvaluatorKind, MobilityDifference, OpenMoves, PhaseWeighted, Score, LOSS, WIN,
};
pub use search::{SearchError, SearchResult, SearchStats, SearchStrategy, Searcher};
pub use timer::{Deadline, TimeLeft};
pub use zobrist::ZobristTable;
