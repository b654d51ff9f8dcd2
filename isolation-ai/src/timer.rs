//! 时间来源
//!
//! 搜索只在每个递归入口查询剩余时间，由外部提供。

use std::time::{Duration, Instant};

/// 当前回合剩余时间（毫秒）
pub trait TimeLeft {
    fn remaining_ms(&self) -> f64;
}

impl<F> TimeLeft for F
where
    F: Fn() -> f64,
{
    fn remaining_ms(&self) -> f64 {
        self()
    }
}

/// 基于截止时刻的计时
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    deadline: Instant,
}

impl Deadline {
    /// 从现在起 `limit_ms` 毫秒后截止
    pub fn after_ms(limit_ms: u64) -> Self {
        Self {
            deadline: Instant::now() + Duration::from_millis(limit_ms),
        }
    }

    pub fn at(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// 是否已过截止时刻
    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

impl TimeLeft for Deadline {
    fn remaining_ms(&self) -> f64 {
        let now = Instant::now();
        if now >= self.deadline {
            -((now - self.deadline).as_secs_f64() * 1000.0)
        } else {
            (self.deadline - now).as_secs_f64() * 1000.0
        }
    }
}
