//! 移动调度
//!
//! 按轮模拟蚂蚁沿选中路径前进，保证任一中间房间同时最多一只蚂蚁

use super::ant::{Ant, AntId, AntState, Move};
use crate::algorithm::Selection;
use crate::error::{Error, Result};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// 一轮的全部移动（先推进在途蚂蚁，再按路径顺序出发新蚂蚁）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 轮次（从 1 开始）
    pub number: usize,
    pub moves: Vec<Move>,
}

impl Round {
    /// 渲染为空格分隔的一行
    pub fn render(&self, graph: &Graph) -> String {
        self.moves
            .iter()
            .map(|mv| mv.render(graph))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 调度结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    rounds: Vec<Round>,
    /// 每条路径分配的蚂蚁数
    assignments: Vec<usize>,
}

impl Schedule {
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    /// 每轮一行
    pub fn render(&self, graph: &Graph) -> Vec<String> {
        self.rounds.iter().map(|round| round.render(graph)).collect()
    }
}

/// 贪心分配：每只蚂蚁交给 (路径长度 + 已分配数) 最小的路径，相同时取靠前的路径
pub fn assign_ants(lengths: &[usize], ants: usize) -> Vec<usize> {
    let mut assigned = vec![0; lengths.len()];
    if lengths.is_empty() {
        return assigned;
    }

    for _ in 0..ants {
        let best = (0..lengths.len())
            .min_by_key(|&i| (lengths[i] + assigned[i], i))
            .unwrap_or(0);
        assigned[best] += 1;
    }
    assigned
}

/// 移动调度器
pub struct Scheduler<'a> {
    selection: &'a Selection,
}

impl<'a> Scheduler<'a> {
    pub fn new(selection: &'a Selection) -> Self {
        Self { selection }
    }

    /// 运行模拟直到所有蚂蚁到达终点
    ///
    /// 每轮只遍历在途蚂蚁，到达终点的蚂蚁立即移出队列
    pub fn run(&self) -> Result<Schedule> {
        let paths = self.selection.paths();
        let total = self.selection.ants();
        let turns = self.selection.turns();

        let quotas = assign_ants(&self.selection.lengths(), total);
        let mut sent = vec![0; paths.len()];
        // 在途蚂蚁按出发顺序排列
        let mut traveling: VecDeque<Ant> = VecDeque::new();
        let mut spawned = 0;
        let mut arrived = 0;
        let mut rounds = Vec::new();

        while arrived < total {
            let number = rounds.len() + 1;
            if number > turns {
                return Err(Error::ScheduleOverrun {
                    rounds: number,
                    turns,
                });
            }

            let mut moves = Vec::new();
            // 本轮推进后仍停在各路径第一个房间的蚂蚁
            let mut entrance_taken = vec![false; paths.len()];

            // 推进在途蚂蚁
            for ant in traveling.iter_mut() {
                let path = &paths[ant.path];
                ant.position += 1;
                if let Some(room) = path.room(ant.position) {
                    moves.push(Move { ant: ant.id, room });
                }
                if ant.position + 1 >= path.length() {
                    ant.state = AntState::Arrived;
                    arrived += 1;
                } else if ant.position == 1 {
                    entrance_taken[ant.path] = true;
                }
            }
            traveling.retain(Ant::is_traveling);

            // 每条路径最多出发一只
            for (index, path) in paths.iter().enumerate() {
                if sent[index] >= quotas[index] || entrance_taken[index] {
                    continue;
                }
                let Some(first) = path.first_step() else {
                    continue;
                };

                spawned += 1;
                let id = AntId(spawned);
                sent[index] += 1;
                moves.push(Move { ant: id, room: first });

                if path.length() <= 2 {
                    arrived += 1;
                } else {
                    traveling.push_back(Ant {
                        id,
                        path: index,
                        position: 1,
                        state: AntState::Traveling,
                    });
                }
            }

            if moves.is_empty() {
                return Err(Error::SchedulerStall {
                    round: number,
                    remaining: total - arrived,
                });
            }

            tracing::trace!(round = number, moves = moves.len(), arrived, "完成一轮");
            rounds.push(Round { number, moves });
        }

        tracing::debug!(rounds = rounds.len(), turns, ants = total, "调度完成");

        Ok(Schedule {
            rounds,
            assignments: quotas,
        })
    }
}
