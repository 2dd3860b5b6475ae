//! 路径选择
//!
//! 在按长度排序的路径中选出使总轮数最少的前缀

use super::path_extract::Path;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 前缀候选的评估结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// 使用的路径数
    pub k: usize,
    /// 该前缀所需轮数
    pub turns: usize,
    /// 是否可行
    pub feasible: bool,
}

/// 选中的路径集合
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    paths: Vec<Path>,
    turns: usize,
    ants: usize,
}

impl Selection {
    pub(crate) fn new(paths: Vec<Path>, turns: usize, ants: usize) -> Self {
        Self { paths, turns, ants }
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// 各路径长度（房间数）
    pub fn lengths(&self) -> Vec<usize> {
        self.paths.iter().map(Path::length).collect()
    }

    /// 轮数上界
    ///
    /// 公式值比实际最优轮数 `max(Lᵢ + nᵢ - 2)` 多 1（单只蚂蚁走长度 L 的路径只需 L - 1 轮），
    /// 调度器只保证实际轮数不超过它。
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn ants(&self) -> usize {
        self.ants
    }
}

/// 前 k 条路径（长度 L₁..Lₖ，总长 S）运送 N 只蚂蚁的轮数：ceil((N + S - k) / k)
///
/// 没有路径或分子溢出时返回 `None`
pub fn turns_for(lengths: &[usize], ants: usize) -> Option<usize> {
    let k = lengths.len();
    if k == 0 {
        return None;
    }
    let total = lengths
        .iter()
        .try_fold(0usize, |acc, &len| acc.checked_add(len))?;
    ants.checked_add(total.saturating_sub(k))
        .map(|numerator| numerator.div_ceil(k))
}

/// 评估每个前缀 k = 1..=n
pub fn evaluate(paths: &[Path], ants: usize) -> Result<Vec<Candidate>> {
    let lengths: Vec<usize> = paths.iter().map(Path::length).collect();

    (1..=lengths.len())
        .map(|k| {
            let prefix = &lengths[..k];
            let turns = turns_for(prefix, ants).ok_or_else(|| {
                Error::InvalidAntCount(format!("{} 只蚂蚁的轮数超出可表示范围", ants))
            })?;
            // 蚂蚁走完自己的路径至少需要 L - 1 轮
            let feasible = prefix.iter().all(|&len| turns >= len.saturating_sub(1));
            Ok(Candidate { k, turns, feasible })
        })
        .collect()
}

/// 选出轮数最少的可行前缀，轮数相同取较小的 k
pub fn select_paths(paths: &[Path], ants: usize) -> Result<Selection> {
    let candidates = evaluate(paths, ants)?;

    let best = candidates
        .iter()
        .filter(|c| c.feasible)
        .min_by_key(|c| (c.turns, c.k))
        .ok_or(Error::InfeasibleSelection {
            ants,
            paths: paths.len(),
        })?;

    tracing::debug!(k = best.k, turns = best.turns, ants, "路径选择完成");

    Ok(Selection::new(paths[..best.k].to_vec(), best.turns, ants))
}
