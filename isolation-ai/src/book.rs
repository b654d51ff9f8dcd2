//! 开局库
//!
//! 以对称编码的 Zobrist 哈希为键，值为该方向下的走法及产生该方向的对称标记。
//! 每个哈希只写入一次（先写者胜），不淘汰，只能整体清空。

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use isolation::{Board, Move, Symmetry};
use thiserror::Error;

use crate::canonical::Canonicalizer;

/// 开局库错误
#[derive(Error, Debug)]
pub enum BookError {
    /// JSON 解析错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 条目格式错误
    #[error("Malformed book entry {key:?}: {reason}")]
    Format { key: String, reason: String },
}

/// 开局库条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    /// 在该对称方向下的走法
    pub mv: Move,
    /// 产生该方向所用的对称标记
    pub tag: Symmetry,
}

/// 持久化格式：十进制哈希 -> [[row, col], tag]
type StoredBook = BTreeMap<String, ([u8; 2], u8)>;

/// 开局库
pub struct OpeningBook {
    canonicalizer: Canonicalizer,
    entries: HashMap<u64, BookEntry>,
    /// 查询次数
    lookups: Cell<u64>,
    /// 命中次数
    hits: Cell<u64>,
}

impl OpeningBook {
    /// 为边长 `side` 的方形棋盘创建空开局库
    pub fn new(side: u8) -> Self {
        Self {
            canonicalizer: Canonicalizer::new(side),
            entries: HashMap::new(),
            lookups: Cell::new(0),
            hits: Cell::new(0),
        }
    }

    pub fn side(&self) -> u8 {
        self.canonicalizer.side()
    }

    /// 该局面能否使用开局库：尺寸匹配且走法规则对称
    pub fn applicable(&self, board: &Board) -> bool {
        self.canonicalizer.supports(board) && board.rule().is_symmetric()
    }

    /// 查询局面，命中时返回当前方向下的走法
    pub fn lookup(&self, board: &Board) -> Option<Move> {
        if !self.applicable(board) {
            return None;
        }
        self.lookups.set(self.lookups.get() + 1);

        let hashes = self.canonicalizer.hashes(board).ok()?;
        let side = self.side();
        hashes.iter().find_map(|(tag, hash)| {
            self.entries.get(hash).map(|entry| {
                self.hits.set(self.hits.get() + 1);
                tag.backrotate(entry.mv, side)
            })
        })
    }

    /// 记录局面的走法，返回新写入的条目数
    pub fn record(&mut self, board: &Board, mv: Move) -> usize {
        if !self.applicable(board) {
            return 0;
        }
        let Ok(hashes) = self.canonicalizer.hashes(board) else {
            return 0;
        };
        let side = self.side();

        let mut inserted = 0;
        for (tag, hash) in hashes {
            if let std::collections::hash_map::Entry::Vacant(slot) = self.entries.entry(hash) {
                slot.insert(BookEntry {
                    mv: tag.apply(mv, side),
                    tag,
                });
                inserted += 1;
            }
        }
        inserted
    }

    /// 按哈希读取条目
    pub fn get(&self, hash: u64) -> Option<&BookEntry> {
        self.entries.get(&hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 清空开局库
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lookups.set(0);
        self.hits.set(0);
    }

    /// 获取统计信息
    pub fn stats(&self) -> BookStats {
        BookStats {
            entries: self.entries.len(),
            lookups: self.lookups.get(),
            hits: self.hits.get(),
        }
    }

    /// 转换为 JSON 字符串（键按数值字典序排列，输出稳定）
    pub fn to_json(&self) -> Result<String, BookError> {
        let stored: StoredBook = self
            .entries
            .iter()
            .map(|(hash, entry)| {
                (
                    hash.to_string(),
                    ([entry.mv.row, entry.mv.col], entry.tag.index()),
                )
            })
            .collect();
        Ok(serde_json::to_string_pretty(&stored)?)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(side: u8, json: &str) -> Result<Self, BookError> {
        let stored: StoredBook = serde_json::from_str(json)?;
        let mut book = Self::new(side);

        for (key, ([row, col], tag)) in stored {
            let hash: u64 = key.parse().map_err(|_| BookError::Format {
                key: key.clone(),
                reason: "key is not a decimal u64".to_string(),
            })?;
            let tag = Symmetry::from_index(tag).map_err(|e| BookError::Format {
                key: key.clone(),
                reason: e.to_string(),
            })?;
            if row >= side || col >= side {
                return Err(BookError::Format {
                    key,
                    reason: format!("move ({row}, {col}) is outside the {side}x{side} board"),
                });
            }
            book.entries.insert(
                hash,
                BookEntry {
                    mv: Move::new(row, col),
                    tag,
                },
            );
        }

        Ok(book)
    }
}

/// 开局库统计信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookStats {
    pub entries: usize,
    pub lookups: u64,
    pub hits: u64,
}

impl BookStats {
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation::MoveRule;

    fn opening() -> (Vec<Move>, Move) {
        (vec![Move::new(2, 3), Move::new(0, 5)], Move::new(4, 4))
    }

    #[test]
    fn test_record_and_lookup_identity() {
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);

        // 该局面无对称性，8 个方向各写一条
        assert_eq!(book.record(&board, reply), 8);
        assert_eq!(book.lookup(&board), Some(reply));
        assert_eq!(book.stats().hits, 1);
    }

    #[test]
    fn test_lookup_in_every_orientation() {
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);
        book.record(&board, reply);

        for tag in Symmetry::ALL {
            let moved: Vec<Move> = history.iter().map(|m| tag.apply(*m, 7)).collect();
            let physical = Board::replay(7, 7, &moved).unwrap();
            let found = book.lookup(&physical);
            assert_eq!(found, Some(tag.apply(reply, 7)), "{tag}");
            assert!(physical.move_is_legal(found.unwrap()));
        }
    }

    #[test]
    fn test_first_writer_wins() {
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);
        book.record(&board, reply);

        assert_eq!(book.record(&board, Move::new(4, 2)), 0);
        assert_eq!(book.lookup(&board), Some(reply));
        assert_eq!(book.len(), 8);
    }

    #[test]
    fn test_symmetric_position_collapses() {
        // 空棋盘在所有变换下不变，只写入一条
        let board = Board::new(7, 7).unwrap();
        let mut book = OpeningBook::new(7);
        assert_eq!(book.record(&board, Move::new(3, 3)), 1);
        assert_eq!(book.lookup(&board), Some(Move::new(3, 3)));
    }

    #[test]
    fn test_stored_entry_carries_tag() {
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);
        book.record(&board, reply);

        let canon = Canonicalizer::new(7);
        for (tag, hash) in canon.hashes(&board).unwrap() {
            let entry = book.get(hash).unwrap();
            assert_eq!(entry.tag, tag);
            assert_eq!(entry.mv, tag.apply(reply, 7));
        }
    }

    #[test]
    fn test_not_applicable() {
        let mut book = OpeningBook::new(7);

        let other_size = Board::replay(5, 5, &[Move::new(2, 2)]).unwrap();
        assert_eq!(book.record(&other_size, Move::new(0, 0)), 0);
        assert_eq!(book.lookup(&other_size), None);

        let lopsided = MoveRule::custom(vec![(1, 0), (0, 1)]).unwrap();
        let board = Board::with_rule(7, 7, lopsided).unwrap();
        assert!(!book.applicable(&board));
        assert_eq!(book.record(&board, Move::new(0, 0)), 0);
        assert_eq!(book.stats().lookups, 0);
    }

    #[test]
    fn test_other_rule_misses() {
        // 相同格子布局、不同的对称规则：不能复用马步规则下的条目
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);
        book.record(&board, reply);

        let king = MoveRule::custom(vec![
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ])
        .unwrap();
        let mut other = Board::with_rule(7, 7, king).unwrap();
        for mv in &history {
            other.apply_move(*mv).unwrap();
        }
        assert!(book.applicable(&other));
        assert_eq!(book.lookup(&other), None);
    }

    #[test]
    fn test_miss_and_clear() {
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);
        assert_eq!(book.lookup(&board), None);

        book.record(&board, reply);
        book.clear();
        assert!(book.is_empty());
        assert_eq!(book.lookup(&board), None);
        assert_eq!(book.stats().hit_rate(), 0.0);
    }

    #[test]
    fn test_json_format() {
        let (history, reply) = opening();
        let board = Board::replay(7, 7, &history).unwrap();
        let mut book = OpeningBook::new(7);
        book.record(&board, reply);

        let json = book.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 8);
        for (key, record) in object {
            assert!(key.parse::<u64>().is_ok());
            let tag = record[1].as_u64().unwrap();
            assert!(tag < 8);
            assert!(record[0].as_array().unwrap().len() == 2);
        }

        let loaded = OpeningBook::from_json(7, &json).unwrap();
        assert_eq!(loaded.len(), 8);
        assert_eq!(loaded.lookup(&board), Some(reply));
    }

    #[test]
    fn test_json_format_errors() {
        assert!(matches!(
            OpeningBook::from_json(7, r#"{"abc": [[1, 2], 0]}"#),
            Err(BookError::Format { .. })
        ));
        assert!(matches!(
            OpeningBook::from_json(7, r#"{"12": [[1, 2], 9]}"#),
            Err(BookError::Format { .. })
        ));
        assert!(matches!(
            OpeningBook::from_json(7, r#"{"12": [[7, 2], 0]}"#),
            Err(BookError::Format { .. })
        ));
        assert!(matches!(
            OpeningBook::from_json(7, r#"{"12": [1, 2]}"#),
            Err(BookError::Json(_))
        ));
        assert!(OpeningBook::from_json(7, "{}").unwrap().is_empty());
    }
}
