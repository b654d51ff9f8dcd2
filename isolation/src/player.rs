//! 玩家与格子定义

use serde::{Deserialize, Serialize};

/// 玩家（先手 / 后手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 先手
    First,
    /// 后手
    Second,
}

impl Player {
    /// 获取对手
    pub fn opponent(&self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// 数组下标（First=0, Second=1）
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// 棋盘显示字符
    pub fn display_char(&self) -> char {
        match self {
            Player::First => '1',
            Player::Second => '2',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::First => write!(f, "first"),
            Player::Second => write!(f, "second"),
        }
    }
}

/// 格子状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// 空格
    Empty,
    /// 已封锁（曾经站过）
    Blocked,
    /// 玩家当前所在
    Occupied(Player),
}

impl Cell {
    /// 定宽编码，用于对称编码与哈希
    #[inline]
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Blocked => 1,
            Cell::Occupied(Player::First) => 2,
            Cell::Occupied(Player::Second) => 3,
        }
    }

    /// 显示字符
    pub fn display_char(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Blocked => '#',
            Cell::Occupied(p) => p.display_char(),
        }
    }
}
