//! 自对弈锦标赛
//!
//! 被测引擎依次与各基准选手对局，先后手交替，统计胜负。

use anyhow::Result;
use isolation::{Board, LossReason, Player};
use isolation_ai::{
    Agent, AiConfig, AiEngine, Difficulty, EngineAgent, GreedyAgent, MobilityDifference,
    RandomAgent,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;

use crate::config::ArenaConfig;
use crate::game::play_match;

/// 对某一基准选手的战绩
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standing {
    pub opponent: String,
    pub wins: u32,
    pub losses: u32,
    /// 被测引擎因超时或非法走子判负的局数
    pub forfeits: u32,
}

impl Standing {
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            self.wins as f64 / self.games() as f64
        }
    }
}

/// 基准选手
fn baselines(seed: u64) -> Vec<Box<dyn Agent>> {
    let easy = AiEngine::new(AiConfig::from_difficulty(Difficulty::Easy));
    vec![
        Box::new(RandomAgent::new(seed)),
        Box::new(GreedyAgent::new(Box::new(MobilityDifference))),
        Box::new(EngineAgent::new("minimax_easy", easy)),
    ]
}

/// 运行锦标赛，返回对各基准选手的战绩
pub fn run_tournament(config: &ArenaConfig, engine: &mut EngineAgent) -> Result<Vec<Standing>> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut standings = Vec::new();

    for mut opponent in baselines(rng.gen()) {
        let mut standing = Standing {
            opponent: opponent.name().to_string(),
            ..Standing::default()
        };

        for round in 0..config.rounds {
            let board = Board::new(config.board_size, config.board_size)?;
            let engine_side = if round % 2 == 0 {
                Player::First
            } else {
                Player::Second
            };
            let subject: &mut dyn Agent = &mut *engine;
            let agents: [&mut dyn Agent; 2] = match engine_side {
                Player::First => [subject, opponent.as_mut()],
                Player::Second => [opponent.as_mut(), subject],
            };

            let outcome = play_match(board, agents, config.time_limit_ms)?;
            if outcome.winner == engine_side {
                standing.wins += 1;
            } else {
                standing.losses += 1;
                if outcome.reason != LossReason::NoMoves {
                    standing.forfeits += 1;
                }
            }
        }

        info!(
            opponent = %standing.opponent,
            wins = standing.wins,
            losses = standing.losses,
            forfeits = standing.forfeits,
            "standing"
        );
        standings.push(standing);
    }

    Ok(standings)
}
