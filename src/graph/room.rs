//! 房间定义
//!
//! 房间是图中的节点，也是"单蚂蚁占用"约束的基本单位

use serde::{Deserialize, Serialize};
use std::fmt;

/// 房间 ID（房间表中的下标，按插入顺序分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub usize);

impl RoomId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for RoomId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 二维坐标（算法不使用，仅随输入保留）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

/// 房间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// 房间 ID
    id: RoomId,
    /// 房间名（全图唯一）
    name: String,
    /// 坐标
    coord: Option<Coord>,
    /// 相邻房间（对称关系，无重复）
    neighbors: Vec<RoomId>,
}

impl Room {
    /// 创建新房间
    pub fn new(id: RoomId, name: String, coord: Option<Coord>) -> Self {
        Self {
            id,
            name,
            coord,
            neighbors: Vec::new(),
        }
    }

    /// 获取房间 ID
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// 获取房间名
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coord(&self) -> Option<Coord> {
        self.coord
    }

    /// 获取相邻房间
    pub fn neighbors(&self) -> &[RoomId] {
        &self.neighbors
    }

    /// 获取度数
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// 添加相邻房间，已存在时返回 false
    pub(crate) fn add_neighbor(&mut self, other: RoomId) -> bool {
        if self.neighbors.contains(&other) {
            return false;
        }
        self.neighbors.push(other);
        true
    }
}
