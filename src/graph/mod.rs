//! 图核心模块
//!
//! 定义房间和房间图的核心数据结构

mod graph;
mod room;

pub use graph::Graph;
pub use room::{Coord, Room, RoomId};
