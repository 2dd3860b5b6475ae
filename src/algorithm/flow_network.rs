//! 流网络构建
//!
//! 通过拆点把"每个中间房间同时最多一只蚂蚁"编码为容量约束：
//! 房间 `i` 拆成入点 `2i` 和出点 `2i + 1`，两者之间是一条内部弧。
//! 中间房间内部弧容量为 1，起点和终点为蚂蚁数量。

use crate::error::{Error, Result};
use crate::graph::{Graph, RoomId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 流网络节点 ID
pub type NodeId = usize;

/// 房间的入点
pub fn in_node(room: RoomId) -> NodeId {
    room.index() * 2
}

/// 房间的出点
pub fn out_node(room: RoomId) -> NodeId {
    room.index() * 2 + 1
}

/// 节点所属的房间
pub fn room_of(node: NodeId) -> RoomId {
    RoomId::new(node / 2)
}

/// 有向弧（残余网络表示）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowArc {
    /// 目标节点
    to: NodeId,
    /// 反向弧在 `to` 的出弧列表中的下标
    rev: usize,
    /// 残余容量
    residual: usize,
    /// 原始容量（反向弧为 0）
    capacity: usize,
    /// 是否为正向弧
    forward: bool,
}

impl FlowArc {
    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn rev(&self) -> usize {
        self.rev
    }

    pub fn residual(&self) -> usize {
        self.residual
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// 已推送的流量（仅对正向弧有意义）
    pub fn flow(&self) -> usize {
        self.capacity.saturating_sub(self.residual)
    }
}

/// 流网络
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    /// 邻接表（出弧按插入顺序排列，BFS 枚举顺序因此固定）
    adj: Vec<Vec<FlowArc>>,
    start: RoomId,
    end: RoomId,
    /// 正向弧数量
    arc_count: usize,
}

impl FlowNetwork {
    /// 从房间图构建流网络
    pub fn build(graph: &Graph, ants: usize) -> Result<Self> {
        let (start, end) = graph.validate()?;
        if ants == 0 {
            return Err(Error::InvalidAntCount("蚂蚁数量必须为正数".to_string()));
        }

        let mut network = Self {
            adj: vec![Vec::new(); graph.room_count() * 2],
            start,
            end,
            arc_count: 0,
        };

        // 内部弧
        for room in graph.rooms() {
            let id = room.id();
            let capacity = if graph.is_endpoint(id) { ants } else { 1 };
            network.add_arc(in_node(id), out_node(id), capacity);
        }

        // 通道：邻接对称，每个方向各一条单位容量弧
        for room in graph.rooms() {
            for &neighbor in room.neighbors() {
                network.add_arc(out_node(room.id()), in_node(neighbor), 1);
            }
        }

        tracing::debug!(
            rooms = graph.room_count(),
            nodes = network.node_count(),
            arcs = network.arc_count,
            "流网络构建完成"
        );

        Ok(network)
    }

    fn add_arc(&mut self, from: NodeId, to: NodeId, capacity: usize) {
        let rev_from = self.adj[to].len();
        let rev_to = self.adj[from].len();
        self.adj[from].push(FlowArc {
            to,
            rev: rev_from,
            residual: capacity,
            capacity,
            forward: true,
        });
        self.adj[to].push(FlowArc {
            to: from,
            rev: rev_to,
            residual: 0,
            capacity: 0,
            forward: false,
        });
        self.arc_count += 1;
    }

    /// 沿弧推送流量：正向残余减少，配对反向弧残余增加相同数量
    pub(crate) fn push(&mut self, node: NodeId, index: usize, amount: usize) {
        let (to, rev) = {
            let arc = &mut self.adj[node][index];
            arc.residual -= amount;
            (arc.to, arc.rev)
        };
        self.adj[to][rev].residual += amount;
    }

    /// 节点的出弧
    pub fn arcs(&self, node: NodeId) -> &[FlowArc] {
        self.adj.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 源点：起点的出点
    pub fn source(&self) -> NodeId {
        out_node(self.start)
    }

    /// 汇点：终点的入点
    pub fn sink(&self) -> NodeId {
        in_node(self.end)
    }

    pub fn start(&self) -> RoomId {
        self.start
    }

    pub fn end(&self) -> RoomId {
        self.end
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// 正向弧数量
    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    /// 带房间名的残余网络视图
    pub fn dump<'a>(&'a self, graph: &'a Graph) -> NetworkDump<'a> {
        NetworkDump {
            network: self,
            graph,
        }
    }
}

/// 残余网络的可读输出
pub struct NetworkDump<'a> {
    network: &'a FlowNetwork,
    graph: &'a Graph,
}

impl NetworkDump<'_> {
    fn label(&self, node: NodeId) -> String {
        let side = if node % 2 == 0 { "in" } else { "out" };
        format!("{}:{}", self.graph.room_name(room_of(node)), side)
    }
}

impl fmt::Display for NetworkDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let network = self.network;
        writeln!(
            f,
            "nodes: {} (rooms: {}), arcs: {}",
            network.node_count(),
            self.graph.room_count(),
            network.arc_count()
        )?;
        writeln!(
            f,
            "source: {} ({}), sink: {} ({})",
            network.source(),
            self.label(network.source()),
            network.sink(),
            self.label(network.sink())
        )?;

        for node in 0..network.node_count() {
            for arc in network.arcs(node) {
                if !arc.is_forward() {
                    continue;
                }
                let internal = if room_of(node) == room_of(arc.to()) {
                    " [internal]"
                } else {
                    ""
                };
                writeln!(
                    f,
                    "{:>4} {:<16} -> {:>4} {:<16} flow {}/{}{}",
                    node,
                    self.label(node),
                    arc.to(),
                    self.label(arc.to()),
                    arc.flow(),
                    arc.capacity(),
                    internal
                )?;
            }
        }
        Ok(())
    }
}
