//! 对局控制
//!
//! 回合循环与每步计时。选手无路可走、走非法格子或超时即判负。

use anyhow::{Context, Result};
use isolation::{Board, GameRecord, GameResult, LossReason, Move, MoveRecord, Player};
use isolation_ai::{Agent, Deadline, TimeLeft};
use tracing::{debug, info, warn};

/// 对局结果
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub winner: Player,
    pub reason: LossReason,
    /// 终局局面
    pub board: Board,
    pub record: GameRecord,
}

impl MatchOutcome {
    pub fn loser(&self) -> Player {
        self.winner.opponent()
    }
}

/// 单步计时器
///
/// 从创建时刻开始倒计时，剩余时间可以为负，表示已超时。
#[derive(Debug, Clone, Copy)]
pub struct MoveTimer {
    limit_ms: u64,
    deadline: Deadline,
}

impl MoveTimer {
    /// 开始计时
    pub fn start(limit_ms: u64) -> Self {
        Self {
            limit_ms,
            deadline: Deadline::after_ms(limit_ms),
        }
    }

    pub fn limit_ms(&self) -> u64 {
        self.limit_ms
    }

    /// 剩余时间（毫秒）
    pub fn time_left_ms(&self) -> f64 {
        self.deadline.remaining_ms()
    }

    /// 是否超时
    pub fn is_timeout(&self) -> bool {
        self.deadline.expired()
    }
}

impl TimeLeft for MoveTimer {
    fn remaining_ms(&self) -> f64 {
        self.time_left_ms()
    }
}

/// 判定一步的结果
///
/// 无路可走优先于超时判定。
fn judge(board: &Board, choice: Option<Move>, timer: &MoveTimer) -> Result<Move, LossReason> {
    if board.active_legal_moves().is_empty() {
        return Err(LossReason::NoMoves);
    }
    if timer.is_timeout() {
        return Err(LossReason::Timeout);
    }
    match choice {
        Some(mv) if board.move_is_legal(mv) => Ok(mv),
        // 有路可走却放弃同样按非法走子处理
        _ => Err(LossReason::IllegalMove),
    }
}

/// 在给定局面上对弈至终局
///
/// `agents[0]` 执先手，`agents[1]` 执后手。
pub fn play_match(
    mut board: Board,
    agents: [&mut dyn Agent; 2],
    time_limit_ms: u64,
) -> Result<MatchOutcome> {
    let mut agents = agents;
    let mut record = GameRecord::new(
        agents[0].name().to_string(),
        agents[1].name().to_string(),
        board.height(),
        board.width(),
        time_limit_ms,
    );

    loop {
        let player = board.active_player();
        let agent = &mut agents[player.index()];

        let timer = MoveTimer::start(time_limit_ms);
        let choice = agent
            .choose_move(&board, &timer)
            .with_context(|| format!("{} failed to choose a move", agent.name()))?;

        match judge(&board, choice, &timer) {
            Ok(mv) => {
                let time_left = timer.time_left_ms();
                board
                    .apply_move(mv)
                    .with_context(|| format!("applying {mv} for {player}"))?;
                record.add_move(MoveRecord::with_time_left(player, mv, time_left));
                debug!(ply = board.ply(), %player, %mv, time_left, "move played");
            }
            Err(reason) => {
                let winner = player.opponent();
                if reason == LossReason::NoMoves {
                    info!(%winner, ply = board.ply(), "game over");
                } else {
                    warn!(
                        loser = %player,
                        agent = agent.name(),
                        ?reason,
                        ?choice,
                        "forfeit"
                    );
                }
                record.set_result(GameResult { winner, reason });
                return Ok(MatchOutcome {
                    winner,
                    reason,
                    board,
                    record,
                });
            }
        }
    }
}
