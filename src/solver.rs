//! 求解流水线
//!
//! 图 → 流网络 → 最大流 → 路径提取 → 路径选择 → 移动调度。
//! 每个阶段显式接收输入、返回输出，阶段之间不共享可变状态。

use crate::algorithm::{extract_paths, select_paths, EdmondsKarp, FlowNetwork, Path, Selection};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::simulation::{Schedule, Scheduler};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// 求解配置
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// 蚂蚁数量
    pub ants: usize,
    /// 流量达到蚂蚁数量后停止增广（多出的路径不可能被选中）
    pub cap_flow_at_ants: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            ants: 1,
            cap_flow_at_ants: false,
        }
    }
}

impl SolverConfig {
    pub fn new(ants: usize) -> Self {
        Self {
            ants,
            ..Self::default()
        }
    }
}

/// 各阶段耗时（微秒）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveStats {
    pub build_us: u64,
    pub max_flow_us: u64,
    pub extract_us: u64,
    pub select_us: u64,
    pub schedule_us: u64,
}

impl SolveStats {
    pub fn total_us(&self) -> u64 {
        self.build_us + self.max_flow_us + self.extract_us + self.select_us + self.schedule_us
    }
}

/// 阶段计时器
struct StageTimer {
    start: Instant,
}

impl StageTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// 返回经过的微秒数并重新计时
    fn lap(&mut self) -> u64 {
        let us = self.elapsed().as_micros() as u64;
        self.start = Instant::now();
        us
    }
}

/// 求解结果
#[derive(Debug, Clone)]
pub struct Solution {
    /// 最大流值
    pub max_flow: usize,
    /// 提取出的全部路径（按长度升序）
    pub paths: Vec<Path>,
    /// 选中的路径前缀
    pub selection: Selection,
    /// 逐轮移动
    pub schedule: Schedule,
    /// 最大流结束后的残余网络
    pub network: FlowNetwork,
    pub stats: SolveStats,
}

impl Solution {
    /// 每轮一行的移动输出
    pub fn render_rounds(&self, graph: &Graph) -> Vec<String> {
        self.schedule.render(graph)
    }
}

/// 提取出的路径数必须等于最大流值
fn check_extraction(flow: usize, paths: &[Path]) -> Result<()> {
    if paths.len() != flow {
        tracing::error!(flow, paths = paths.len(), "提取路径数与流值不一致");
        return Err(Error::PathExtractionMismatch {
            flow,
            paths: paths.len(),
        });
    }
    Ok(())
}

/// 求解器
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// 运行完整流水线
    pub fn solve(&self, graph: &Graph) -> Result<Solution> {
        let ants = self.config.ants;
        if ants == 0 {
            return Err(Error::InvalidAntCount("蚂蚁数量必须为正数".to_string()));
        }

        let mut stats = SolveStats::default();
        let mut timer = StageTimer::new();

        let mut network = FlowNetwork::build(graph, ants)?;
        stats.build_us = timer.lap();
        tracing::trace!("残余网络（初始）:\n{}", network.dump(graph));

        let (source, sink) = (network.source(), network.sink());
        let mut algo = EdmondsKarp::new(&mut network);
        if self.config.cap_flow_at_ants {
            algo = algo.with_limit(ants);
        }
        let flow = algo.max_flow(source, sink);
        stats.max_flow_us = timer.lap();
        tracing::trace!("残余网络（最大流）:\n{}", network.dump(graph));

        if flow.value == 0 {
            return Err(Error::NoPathFound);
        }

        let paths = extract_paths(&network);
        stats.extract_us = timer.lap();
        check_extraction(flow.value, &paths)?;

        let selection = select_paths(&paths, ants)?;
        stats.select_us = timer.lap();

        let schedule = Scheduler::new(&selection).run()?;
        stats.schedule_us = timer.lap();

        tracing::info!(
            ants,
            max_flow = flow.value,
            paths = selection.path_count(),
            turns = selection.turns(),
            rounds = schedule.round_count(),
            total_us = stats.total_us(),
            "求解完成"
        );

        Ok(Solution {
            max_flow: flow.value,
            paths,
            selection,
            schedule,
            network,
            stats,
        })
    }
}
