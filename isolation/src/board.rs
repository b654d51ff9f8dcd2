//! 棋盘状态
//!
//! 每名玩家每回合移动到一个新格子，离开的格子被永久封锁；
//! 轮到走子却无路可走的一方判负。

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::moves::{Move, MoveRule};
use crate::player::{Cell, Player};
use crate::symmetry::Symmetry;

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    height: u8,
    width: u8,
    rule: MoveRule,
    /// 行优先存储，索引为 row * width + col
    cells: Vec<Cell>,
    /// 两名玩家当前位置，尚未落子时为 None
    locations: [Option<Move>; 2],
    /// 已走步数
    ply: u32,
    /// 当前走子方
    active: Player,
}

/// 反序列化的原始形式，经 [`Board::try_from`] 校验后才成为棋盘
#[derive(Deserialize)]
struct BoardRepr {
    height: u8,
    width: u8,
    rule: MoveRule,
    cells: Vec<Cell>,
    locations: [Option<Move>; 2],
    ply: u32,
    active: Player,
}

fn invalid(reason: String) -> GameError {
    GameError::InvalidBoard { reason }
}

impl TryFrom<BoardRepr> for Board {
    type Error = GameError;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let BoardRepr {
            height,
            width,
            rule,
            cells,
            locations,
            ply,
            active,
        } = repr;

        if height == 0 || width == 0 {
            return Err(GameError::InvalidDimensions { height, width });
        }
        let rule = MoveRule::custom(rule.offsets().to_vec())?;

        let expected = height as usize * width as usize;
        if cells.len() != expected {
            return Err(invalid(format!(
                "{} cells for a {height}x{width} board, expected {expected}",
                cells.len()
            )));
        }

        let to_move = if ply % 2 == 0 { Player::First } else { Player::Second };
        if active != to_move {
            return Err(invalid(format!("{active} to move at ply {ply}")));
        }

        let board = Self {
            height,
            width,
            rule,
            cells,
            locations,
            ply,
            active,
        };

        for player in [Player::First, Player::Second] {
            let Some(loc) = board.location(player) else {
                continue;
            };
            match board.cell(loc) {
                None => {
                    return Err(GameError::OutOfBounds {
                        row: loc.row as i32,
                        col: loc.col as i32,
                        height,
                        width,
                    })
                }
                // 允许两名玩家坐标重合，由评估函数报告
                Some(Cell::Occupied(_)) => {}
                Some(cell) => {
                    return Err(invalid(format!(
                        "{player} is at {loc} but the cell is {cell:?}"
                    )))
                }
            }
        }

        for (idx, cell) in board.cells.iter().enumerate() {
            if let Cell::Occupied(player) = *cell {
                let at = Move::new((idx / width as usize) as u8, (idx % width as usize) as u8);
                if board.location(player) != Some(at) {
                    return Err(invalid(format!("stray {player} piece at {at}")));
                }
            }
        }

        Ok(board)
    }
}

impl Board {
    /// 创建使用马步规则的空棋盘
    pub fn new(height: u8, width: u8) -> Result<Self> {
        Self::with_rule(height, width, MoveRule::knight())
    }

    /// 创建使用指定规则的空棋盘
    pub fn with_rule(height: u8, width: u8, rule: MoveRule) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidDimensions { height, width });
        }
        Ok(Self {
            height,
            width,
            rule,
            cells: vec![Cell::Empty; height as usize * width as usize],
            locations: [None, None],
            ply: 0,
            active: Player::First,
        })
    }

    /// 从空棋盘依次执行走法
    pub fn replay(height: u8, width: u8, moves: &[Move]) -> Result<Self> {
        let mut board = Self::new(height, width)?;
        for mv in moves {
            board.apply_move(*mv)?;
        }
        Ok(board)
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn rule(&self) -> &MoveRule {
        &self.rule
    }

    /// 已走步数
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// 当前走子方
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// 非走子方
    pub fn inactive_player(&self) -> Player {
        self.active.opponent()
    }

    /// 玩家当前位置
    pub fn location(&self, player: Player) -> Option<Move> {
        self.locations[player.index()]
    }

    #[inline]
    fn index(&self, mv: Move) -> usize {
        mv.row as usize * self.width as usize + mv.col as usize
    }

    #[inline]
    fn in_bounds(&self, mv: Move) -> bool {
        mv.row < self.height && mv.col < self.width
    }

    /// 获取格子状态，越界时返回 None
    pub fn cell(&self, mv: Move) -> Option<Cell> {
        if self.in_bounds(mv) {
            Some(self.cells[self.index(mv)])
        } else {
            None
        }
    }

    /// 行优先的定宽格子编码
    pub fn cell_codes(&self) -> Vec<u8> {
        self.cells.iter().map(Cell::code).collect()
    }

    /// 所有空格（行优先）
    pub fn blank_cells(&self) -> Vec<Move> {
        let mut result = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                let mv = Move::new(row, col);
                if self.cells[self.index(mv)] == Cell::Empty {
                    result.push(mv);
                }
            }
        }
        result
    }

    /// 指定玩家的合法走法
    ///
    /// 尚未落子的玩家可以走到任意空格；否则按规则偏移顺序枚举。
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let Some(from) = self.location(player) else {
            return self.blank_cells();
        };
        self.rule
            .offsets()
            .iter()
            .filter_map(|&(dr, dc)| from.offset(dr, dc, self.height, self.width))
            .filter(|to| self.cells[self.index(*to)] == Cell::Empty)
            .collect()
    }

    /// 当前走子方的合法走法
    pub fn active_legal_moves(&self) -> Vec<Move> {
        self.legal_moves(self.active)
    }

    /// 当前走子方能否走到指定格
    pub fn move_is_legal(&self, mv: Move) -> bool {
        if !self.in_bounds(mv) || self.cells[self.index(mv)] != Cell::Empty {
            return false;
        }
        match self.location(self.active) {
            None => true,
            Some(from) => self.rule.offsets().iter().any(|&(dr, dc)| {
                from.offset(dr, dc, self.height, self.width) == Some(mv)
            }),
        }
    }

    /// 执行走法（当前走子方）
    pub fn apply_move(&mut self, mv: Move) -> Result<()> {
        if !self.in_bounds(mv) {
            return Err(GameError::OutOfBounds {
                row: mv.row as i32,
                col: mv.col as i32,
                height: self.height,
                width: self.width,
            });
        }
        if !self.move_is_legal(mv) {
            return Err(GameError::IllegalMove {
                row: mv.row,
                col: mv.col,
            });
        }

        if let Some(from) = self.location(self.active) {
            let idx = self.index(from);
            self.cells[idx] = Cell::Blocked;
        }
        let idx = self.index(mv);
        self.cells[idx] = Cell::Occupied(self.active);
        self.locations[self.active.index()] = Some(mv);
        self.ply += 1;
        self.active = self.active.opponent();
        Ok(())
    }

    /// 预演走法，返回新棋盘，原棋盘不变
    pub fn forecast_move(&self, mv: Move) -> Result<Board> {
        let mut next = self.clone();
        next.apply_move(mv)?;
        Ok(next)
    }

    /// 轮到该玩家走子且无路可走
    pub fn is_loser(&self, player: Player) -> bool {
        player == self.active && self.active_legal_moves().is_empty()
    }

    /// 对手轮到走子且无路可走
    pub fn is_winner(&self, player: Player) -> bool {
        player == self.inactive_player() && self.active_legal_moves().is_empty()
    }

    /// 终局效用：未结束为 0，胜者为 +inf，负者为 -inf
    pub fn utility(&self, player: Player) -> f64 {
        if !self.active_legal_moves().is_empty() {
            return 0.0;
        }
        if player == self.active {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    fn require_square(&self) -> Result<u8> {
        if self.height != self.width {
            return Err(GameError::NotSquare {
                height: self.height,
                width: self.width,
            });
        }
        Ok(self.height)
    }

    /// 8 种对称变换下的格子编码，按 [`Symmetry::ALL`] 顺序
    pub fn symmetric_configurations(&self) -> Result<[(Symmetry, Vec<u8>); 8]> {
        let n = self.require_square()?;
        let codes = self.cell_codes();
        Ok(Symmetry::ALL.map(|tag| (tag, tag.transform_cells(&codes, n))))
    }

    /// 对整个棋盘（格子与玩家位置）做对称变换
    pub fn transformed(&self, tag: Symmetry) -> Result<Board> {
        let n = self.require_square()?;
        let mut board = self.clone();
        board.cells = tag.transform_cells(&self.cells, n);
        board.locations = self.locations.map(|loc| loc.map(|mv| tag.apply(mv, n)));
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            let line: Vec<String> = (0..self.width)
                .map(|col| self.cells[self.index(Move::new(row, col))].display_char().to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
