//! Isolation 对战平台
//!
//! 包含:
//! - 对局控制与每步计时
//! - 自对弈锦标赛
//! - 开局库存储
//! - 对战配置与命令行参数

pub mod cli;
pub mod config;
pub mod game;
pub mod storage;
pub mod tournament;

pub use cli::Args;
pub use config::ArenaConfig;
pub use game::{play_match, MatchOutcome, MoveTimer};
pub use storage::{default_path, BookStorage};
pub use tournament::{run_tournament, Standing};
