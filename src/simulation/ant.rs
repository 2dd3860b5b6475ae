//! 蚂蚁与移动记录

use crate::graph::{Graph, RoomId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 蚂蚁 ID（从 1 开始，按出发顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AntId(pub usize);

impl fmt::Display for AntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// 蚂蚁状态
///
/// 尚未出发的蚂蚁不占用任何状态，只体现为路径的剩余配额。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AntState {
    /// 行进中
    Traveling,
    /// 已到达终点
    Arrived,
}

/// 蚂蚁
#[derive(Debug, Clone)]
pub struct Ant {
    pub id: AntId,
    /// 所走路径在选中集合中的下标
    pub path: usize,
    /// 在路径上的位置（0 为起点）
    pub position: usize,
    pub state: AntState,
}

impl Ant {
    pub fn is_traveling(&self) -> bool {
        self.state == AntState::Traveling
    }
}

/// 一次移动：蚂蚁进入某个房间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub ant: AntId,
    pub room: RoomId,
}

impl Move {
    /// 渲染为 `L<id>-<房间名>`
    pub fn render(&self, graph: &Graph) -> String {
        format!("{}-{}", self.ant, graph.room_name(self.room))
    }
}
