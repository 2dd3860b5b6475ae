//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson）
//! 流值即起点到终点的最大顶点不相交路径数

use super::flow_network::{FlowNetwork, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: usize,
    /// 最小割的源侧节点集
    pub source_side: HashSet<NodeId>,
}

/// Edmonds-Karp 最大流算法
///
/// 原地修改流网络的残余容量，结束后网络中保留最终的流分配。
pub struct EdmondsKarp<'a> {
    network: &'a mut FlowNetwork,
    /// 流量上限（达到后停止增广）
    limit: Option<usize>,
}

impl<'a> EdmondsKarp<'a> {
    /// 创建算法实例
    pub fn new(network: &'a mut FlowNetwork) -> Self {
        Self {
            network,
            limit: None,
        }
    }

    /// 设置流量上限
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 计算从 source 到 sink 的最大流
    pub fn max_flow(&mut self, source: NodeId, sink: NodeId) -> MaxFlow {
        let mut value = 0;

        // 重复 BFS 找最短增广路径
        while self.limit.map_or(true, |limit| value < limit) {
            let Some(path) = self.bfs_find_path(source, sink) else {
                break;
            };

            // 单位容量网络中瓶颈恒为 1
            for &(node, index) in &path {
                self.network.push(node, index, 1);
            }
            value += 1;

            tracing::trace!(flow = value, hops = path.len(), "增广路径");
        }

        let source_side = self.find_source_side(source);
        tracing::debug!(flow = value, "最大流计算完成");

        MaxFlow { value, source_side }
    }

    /// BFS 找增广路径，返回路径上的 (节点, 出弧下标) 序列
    fn bfs_find_path(&self, source: NodeId, sink: NodeId) -> Option<Vec<(NodeId, usize)>> {
        let mut parent: Vec<Option<(NodeId, usize)>> = vec![None; self.network.node_count()];
        let mut visited = vec![false; self.network.node_count()];
        let mut queue = VecDeque::new();

        visited[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            if u == sink {
                break;
            }

            for (index, arc) in self.network.arcs(u).iter().enumerate() {
                let v = arc.to();
                if !visited[v] && arc.residual() > 0 {
                    visited[v] = true;
                    parent[v] = Some((u, index));
                    queue.push_back(v);
                }
            }
        }

        if !visited[sink] || source == sink {
            return None;
        }

        // 重构路径
        let mut path = Vec::new();
        let mut current = sink;
        while current != source {
            let (prev, index) = parent[current]?;
            path.push((prev, index));
            current = prev;
        }
        path.reverse();

        Some(path)
    }

    /// 找最小割的源侧节点
    fn find_source_side(&self, source: NodeId) -> HashSet<NodeId> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert(source);
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for arc in self.network.arcs(u) {
                if arc.residual() > 0 && visited.insert(arc.to()) {
                    queue.push_back(arc.to());
                }
            }
        }

        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::flow_network::{in_node, out_node};
    use crate::graph::Graph;

    fn build(rooms: &[&str], links: &[(&str, &str)], start: &str, end: &str) -> Graph {
        let mut graph = Graph::new();
        for name in rooms {
            graph.add_room(*name, None).unwrap();
        }
        for (a, b) in links {
            graph.add_link(a, b).unwrap();
        }
        graph.set_start(graph.room_id(start).unwrap());
        graph.set_end(graph.room_id(end).unwrap());
        graph
    }

    fn solve(graph: &Graph, ants: usize) -> (FlowNetwork, MaxFlow) {
        let mut network = FlowNetwork::build(graph, ants).unwrap();
        let (source, sink) = (network.source(), network.sink());
        let result = EdmondsKarp::new(&mut network).max_flow(source, sink);
        (network, result)
    }

    #[test]
    fn test_max_flow_diamond() {
        let graph = build(
            &["s", "a", "b", "e"],
            &[("s", "a"), ("s", "b"), ("a", "e"), ("b", "e")],
            "s",
            "e",
        );
        let (_, result) = solve(&graph, 10);
        assert_eq!(result.value, 2);
    }

    #[test]
    fn test_vertex_capacity_bottleneck() {
        //   a       c
        // s   > m <   e
        //   b       d
        // 所有路径都必须经过 m，顶点容量把流限制为 1
        let graph = build(
            &["s", "a", "b", "m", "c", "d", "e"],
            &[
                ("s", "a"),
                ("s", "b"),
                ("a", "m"),
                ("b", "m"),
                ("m", "c"),
                ("m", "d"),
                ("c", "e"),
                ("d", "e"),
            ],
            "s",
            "e",
        );
        let (network, result) = solve(&graph, 5);
        assert_eq!(result.value, 1);

        // m 的入点在源侧，出点在汇侧
        let m = graph.room_id("m").unwrap();
        assert!(result.source_side.contains(&in_node(m)));
        assert!(!result.source_side.contains(&out_node(m)));
        assert!(!result.source_side.contains(&network.sink()));
    }

    #[test]
    fn test_flow_requires_cancellation() {
        // BFS 先增广 s-a-d-e，之后必须经反向弧撤销 a-d 才能得到 s-a-b-e 与 s-c-d-e
        let graph = build(
            &["s", "a", "b", "c", "d", "e"],
            &[
                ("s", "a"),
                ("a", "d"),
                ("a", "b"),
                ("b", "e"),
                ("s", "c"),
                ("c", "d"),
                ("d", "e"),
            ],
            "s",
            "e",
        );
        let (_, result) = solve(&graph, 4);
        assert_eq!(result.value, 2);
    }

    #[test]
    fn test_disconnected() {
        let graph = build(&["s", "a", "e"], &[("s", "a")], "s", "e");
        let (_, result) = solve(&graph, 3);
        assert_eq!(result.value, 0);
        assert!(!result.source_side.is_empty());
    }

    #[test]
    fn test_flow_limit() {
        let graph = build(
            &["s", "a", "b", "c", "e"],
            &[
                ("s", "a"),
                ("s", "b"),
                ("s", "c"),
                ("a", "e"),
                ("b", "e"),
                ("c", "e"),
            ],
            "s",
            "e",
        );
        let mut network = FlowNetwork::build(&graph, 2).unwrap();
        let (source, sink) = (network.source(), network.sink());
        let result = EdmondsKarp::new(&mut network)
            .with_limit(2)
            .max_flow(source, sink);
        assert_eq!(result.value, 2);

        let (_, unlimited) = solve(&graph, 2);
        assert_eq!(unlimited.value, 3);
    }

    #[test]
    fn test_deterministic() {
        let graph = build(
            &["s", "a", "b", "c", "d", "e"],
            &[
                ("s", "a"),
                ("a", "d"),
                ("a", "b"),
                ("b", "e"),
                ("s", "c"),
                ("c", "d"),
                ("d", "e"),
            ],
            "s",
            "e",
        );
        let (first, _) = solve(&graph, 3);
        let (second, _) = solve(&graph, 3);
        for node in 0..first.node_count() {
            let a: Vec<usize> = first.arcs(node).iter().map(|arc| arc.residual()).collect();
            let b: Vec<usize> = second.arcs(node).iter().map(|arc| arc.residual()).collect();
            assert_eq!(a, b);
        }
    }
}
