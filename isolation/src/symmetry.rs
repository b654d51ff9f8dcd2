//! 方形棋盘的 8 种对称变换（二面体群 D4）
//!
//! 标记顺序固定，下标即持久化时使用的整数值：
//!
//! | 下标 | 标记 | (row, col) ↦ |
//! |---|---|---|
//! | 0 | Identity | (row, col) |
//! | 1 | MirrorVertical | (row, N−1−col) |
//! | 2 | MirrorHorizontal | (N−1−row, col) |
//! | 3 | Rotate90 | (N−1−col, row) |
//! | 4 | Rotate180 | (N−1−row, N−1−col) |
//! | 5 | Rotate270 | (col, N−1−row) |
//! | 6 | Diagonal1 | (N−1−col, N−1−row) |
//! | 7 | Diagonal2 | (col, row) |

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::moves::Move;

/// 对称标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symmetry {
    Identity,
    MirrorVertical,
    MirrorHorizontal,
    Rotate90,
    Rotate180,
    Rotate270,
    Diagonal1,
    Diagonal2,
}

impl Symmetry {
    /// 全部标记，按固定顺序
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::MirrorVertical,
        Symmetry::MirrorHorizontal,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::Diagonal1,
        Symmetry::Diagonal2,
    ];

    /// 标记下标 (0-7)
    pub fn index(&self) -> u8 {
        match self {
            Symmetry::Identity => 0,
            Symmetry::MirrorVertical => 1,
            Symmetry::MirrorHorizontal => 2,
            Symmetry::Rotate90 => 3,
            Symmetry::Rotate180 => 4,
            Symmetry::Rotate270 => 5,
            Symmetry::Diagonal1 => 6,
            Symmetry::Diagonal2 => 7,
        }
    }

    /// 从下标解析
    pub fn from_index(index: u8) -> Result<Symmetry> {
        Self::ALL
            .get(index as usize)
            .copied()
            .ok_or(GameError::InvalidSymmetry(index))
    }

    /// 逆变换：Rotate90 与 Rotate270 互逆，其余均为自逆
    pub fn inverse(&self) -> Symmetry {
        match self {
            Symmetry::Rotate90 => Symmetry::Rotate270,
            Symmetry::Rotate270 => Symmetry::Rotate90,
            other => *other,
        }
    }

    /// 对 N×N 棋盘上的坐标做变换
    pub fn apply(&self, mv: Move, n: u8) -> Move {
        let last = n - 1;
        let (r, c) = (mv.row, mv.col);
        let (row, col) = match self {
            Symmetry::Identity => (r, c),
            Symmetry::MirrorVertical => (r, last - c),
            Symmetry::MirrorHorizontal => (last - r, c),
            Symmetry::Rotate90 => (last - c, r),
            Symmetry::Rotate180 => (last - r, last - c),
            Symmetry::Rotate270 => (c, last - r),
            Symmetry::Diagonal1 => (last - c, last - r),
            Symmetry::Diagonal2 => (c, r),
        };
        Move::new(row, col)
    }

    /// 把变换后方向上的走法还原到原始方向
    pub fn backrotate(&self, mv: Move, n: u8) -> Move {
        self.inverse().apply(mv, n)
    }

    /// 对位移向量做变换（变换的线性部分）
    pub fn apply_offset(&self, dr: i8, dc: i8) -> (i8, i8) {
        match self {
            Symmetry::Identity => (dr, dc),
            Symmetry::MirrorVertical => (dr, -dc),
            Symmetry::MirrorHorizontal => (-dr, dc),
            Symmetry::Rotate90 => (-dc, dr),
            Symmetry::Rotate180 => (-dr, -dc),
            Symmetry::Rotate270 => (dc, -dr),
            Symmetry::Diagonal1 => (-dc, -dr),
            Symmetry::Diagonal2 => (dc, dr),
        }
    }

    /// 变换按行优先存储的 N×N 格子序列
    pub fn transform_cells<T: Copy>(&self, cells: &[T], n: u8) -> Vec<T> {
        debug_assert_eq!(cells.len(), n as usize * n as usize);
        let mut out = cells.to_vec();
        for r in 0..n {
            for c in 0..n {
                let from = r as usize * n as usize + c as usize;
                let to = self.apply(Move::new(r, c), n);
                out[to.row as usize * n as usize + to.col as usize] = cells[from];
            }
        }
        out
    }
}

impl std::fmt::Display for Symmetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
