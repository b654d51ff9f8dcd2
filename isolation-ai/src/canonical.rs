//! 对称规范化
//!
//! 计算局面在 8 种对称变换下的编码哈希，物理上等价的局面共享同一组哈希。
//! 哈希混入走法规则的键，不同规则下的相同格子布局不会共享条目。

use isolation::{Board, GameError, Symmetry};

use crate::zobrist::ZobristTable;

/// 对称规范化器（固定边长的方形棋盘）
pub struct Canonicalizer {
    side: u8,
    zobrist: ZobristTable,
}

impl Canonicalizer {
    pub fn new(side: u8) -> Self {
        Self {
            side,
            zobrist: ZobristTable::new(side as usize * side as usize),
        }
    }

    /// 棋盘边长
    pub fn side(&self) -> u8 {
        self.side
    }

    /// 棋盘尺寸是否匹配
    pub fn supports(&self, board: &Board) -> bool {
        board.height() == self.side && board.width() == self.side
    }

    /// 按 [`Symmetry::ALL`] 顺序返回每种变换下的哈希
    pub fn hashes(&self, board: &Board) -> Result<[(Symmetry, u64); 8], GameError> {
        if !self.supports(board) {
            return Err(GameError::InvalidDimensions {
                height: board.height(),
                width: board.width(),
            });
        }
        let configs = board.symmetric_configurations()?;
        let rule_key = ZobristTable::rule_key(board.rule().offsets());
        Ok(configs.map(|(tag, codes)| (tag, self.zobrist.hash(&codes) ^ rule_key)))
    }
}
