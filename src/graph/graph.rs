//! 房间图
//!
//! 拥有全部房间的房间表，邻接关系与路径都通过 `RoomId` 引用房间

use super::room::{Coord, Room, RoomId};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 房间图
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    /// 房间表（按插入顺序，下标即 RoomId）
    rooms: IndexMap<String, Room>,
    /// 起点
    start: Option<RoomId>,
    /// 终点
    end: Option<RoomId>,
    /// 通道数量
    link_count: usize,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 房间操作 ====================

    /// 添加房间
    pub fn add_room(&mut self, name: impl Into<String>, coord: Option<Coord>) -> Result<RoomId> {
        let name = name.into();
        if self.rooms.contains_key(&name) {
            return Err(Error::DuplicateRoom(name));
        }

        let id = RoomId::new(self.rooms.len());
        self.rooms.insert(name.clone(), Room::new(id, name, coord));
        Ok(id)
    }

    /// 获取房间
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get_index(id.index()).map(|(_, room)| room)
    }

    /// 按名称获取房间
    pub fn room_by_name(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    /// 按名称获取房间 ID
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.rooms.get_index_of(name).map(RoomId::new)
    }

    /// 获取房间名，ID 越界时返回空串
    pub fn room_name(&self, id: RoomId) -> &str {
        self.room(id).map(Room::name).unwrap_or("")
    }

    /// 按 ID 顺序遍历所有房间
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// 获取房间数量
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    // ==================== 通道操作 ====================

    /// 按名称连接两个房间
    pub fn add_link(&mut self, a: &str, b: &str) -> Result<()> {
        let a = self
            .room_id(a)
            .ok_or_else(|| Error::UnknownRoom(a.to_string()))?;
        let b = self
            .room_id(b)
            .ok_or_else(|| Error::UnknownRoom(b.to_string()))?;
        self.connect(a, b)
    }

    /// 连接两个房间（双向）
    ///
    /// 自环被忽略，重复通道只记录一次。
    pub fn connect(&mut self, a: RoomId, b: RoomId) -> Result<()> {
        for id in [a, b] {
            if id.index() >= self.rooms.len() {
                return Err(Error::UnknownRoom(id.to_string()));
            }
        }
        if a == b {
            return Ok(());
        }

        let added = self.room_mut(a).add_neighbor(b);
        self.room_mut(b).add_neighbor(a);
        if added {
            self.link_count += 1;
        }
        Ok(())
    }

    /// 获取房间的邻居
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        self.room(id).map(Room::neighbors).unwrap_or(&[])
    }

    /// 获取通道数量
    pub fn link_count(&self) -> usize {
        self.link_count
    }

    fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.index()]
    }

    // ==================== 起点 / 终点 ====================

    pub fn set_start(&mut self, id: RoomId) {
        self.start = Some(id);
    }

    pub fn set_end(&mut self, id: RoomId) {
        self.end = Some(id);
    }

    pub fn start(&self) -> Option<RoomId> {
        self.start
    }

    pub fn end(&self) -> Option<RoomId> {
        self.end
    }

    /// 是否为起点或终点
    pub fn is_endpoint(&self, id: RoomId) -> bool {
        self.start == Some(id) || self.end == Some(id)
    }

    /// 校验图并返回 (起点, 终点)
    pub fn validate(&self) -> Result<(RoomId, RoomId)> {
        let start = self
            .start
            .ok_or_else(|| Error::InvalidGraph("未设置起点".to_string()))?;
        let end = self
            .end
            .ok_or_else(|| Error::InvalidGraph("未设置终点".to_string()))?;

        if start == end {
            return Err(Error::InvalidGraph("起点与终点相同".to_string()));
        }
        if self.room(start).is_none() || self.room(end).is_none() {
            return Err(Error::InvalidGraph("起点或终点不在房间表中".to_string()));
        }

        Ok((start, end))
    }
}
