//! Zobrist 哈希
//!
//! 对定宽格子编码序列计算确定性的结构哈希，作为开局库的键。

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// 非空格子状态数（封锁、先手、后手）
const CELL_STATES: usize = 3;

/// 固定种子，哈希值可以跨进程持久化
const SEED: u64 = 0x15_0A7E_D5EE_D;

/// Zobrist 哈希表
///
/// 使用固定种子，保证不同进程、不同运行之间哈希一致，可以持久化。
pub struct ZobristTable {
    /// [cell][state - 1]，空格不参与哈希
    keys: Vec<[u64; CELL_STATES]>,
}

impl ZobristTable {
    /// 为 `cells` 个格子创建哈希表
    pub fn new(cells: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(SEED);

        let keys = (0..cells)
            .map(|_| [rng.gen(), rng.gen(), rng.gen()])
            .collect();

        Self { keys }
    }

    /// 格子数
    pub fn cells(&self) -> usize {
        self.keys.len()
    }

    /// 计算格子编码序列的哈希值
    ///
    /// 序列长度必须与表的格子数一致。
    pub fn hash(&self, codes: &[u8]) -> u64 {
        debug_assert_eq!(codes.len(), self.keys.len());
        codes
            .iter()
            .zip(&self.keys)
            .filter(|(code, _)| **code != 0)
            .fold(0u64, |hash, (code, keys)| hash ^ keys[*code as usize - 1])
    }

    /// 走法规则的哈希键，只取决于偏移集合（与顺序、重复无关）
    pub fn rule_key(offsets: &[(i8, i8)]) -> u64 {
        let mut set = offsets.to_vec();
        set.sort_unstable();
        set.dedup();
        set.into_iter().fold(0u64, |key, (dr, dc)| {
            let tag = ((dr as u8 as u64) << 8) | dc as u8 as u64;
            key ^ ChaCha8Rng::seed_from_u64(SEED ^ (tag << 32)).gen::<u64>()
        })
    }
}
