//! 规则常量定义

/// 默认棋盘边长
pub const DEFAULT_BOARD_SIZE: u8 = 7;

/// 马步偏移量 (drow, dcol)，顺序即走法枚举顺序
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 每步默认思考时间（毫秒）
pub const DEFAULT_TIME_LIMIT_MS: u64 = 150;

/// 默认超时阈值（毫秒）：剩余时间低于此值即中止搜索
pub const DEFAULT_TIMER_THRESHOLD_MS: f64 = 10.0;

/// 迭代加深的最大深度（棋盘大小限制了对局长度）
pub const MAX_SEARCH_DEPTH: u8 = 25;

/// 开局库只记录不超过此步数的局面
pub const BOOK_PLY_CUTOFF: u32 = 5;

/// 中盘判定阈值：已落子格数 / 总格数
pub const MIDGAME_FILL_RATIO: f64 = 0.33;
