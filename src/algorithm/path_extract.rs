//! 路径提取
//!
//! 从最大流结束后的残余网络中还原顶点不相交路径

use super::flow_network::{room_of, FlowNetwork, NodeId};
use crate::graph::{Graph, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 路径（隧道）：从起点到终点的房间序列
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    rooms: Vec<RoomId>,
}

impl Path {
    pub fn new(rooms: Vec<RoomId>) -> Self {
        Self { rooms }
    }

    /// 路径上的房间序列（含起点和终点）
    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// 房间数
    pub fn length(&self) -> usize {
        self.rooms.len()
    }

    /// 步数（房间数 - 1）
    pub fn hops(&self) -> usize {
        self.rooms.len().saturating_sub(1)
    }

    pub fn room(&self, position: usize) -> Option<RoomId> {
        self.rooms.get(position).copied()
    }

    /// 离开起点后进入的第一个房间
    pub fn first_step(&self) -> Option<RoomId> {
        self.room(1)
    }

    /// 中间房间（不含起点和终点）
    pub fn interior(&self) -> &[RoomId] {
        if self.rooms.len() <= 2 {
            return &[];
        }
        &self.rooms[1..self.rooms.len() - 1]
    }

    /// 用房间名渲染路径，如 `s -> a -> e`
    pub fn render(&self, graph: &Graph) -> String {
        self.rooms
            .iter()
            .map(|&id| graph.room_name(id))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// 从残余网络提取路径，按长度升序返回（长度相同保持发现顺序）
///
/// 每次从起点出点出发，沿残余容量恰为 0 的正向弧（即承载了流的弧）前进，
/// 跳过本轮已访问或已被先前路径占用的节点；走到终点入点即得到一条路径，
/// 中途走不通则丢弃本轮并结束提取。
pub fn extract_paths(network: &FlowNetwork) -> Vec<Path> {
    let source = network.source();
    let sink = network.sink();

    let mut paths = Vec::new();
    let mut consumed_arcs: HashSet<(NodeId, usize)> = HashSet::new();
    let mut claimed_nodes: HashSet<NodeId> = HashSet::new();

    loop {
        let mut visited = HashSet::from([source]);
        let mut taken = Vec::new();
        let mut rooms = vec![network.start()];
        let mut current = source;

        while current != sink {
            let next = network
                .arcs(current)
                .iter()
                .enumerate()
                .find(|(index, arc)| {
                    arc.is_forward()
                        && arc.residual() == 0
                        && !consumed_arcs.contains(&(current, *index))
                        && !visited.contains(&arc.to())
                        && !claimed_nodes.contains(&arc.to())
                });

            let Some((index, arc)) = next else {
                break;
            };

            taken.push((current, index));
            visited.insert(arc.to());
            // 到达入点即进入新房间；入点到出点的内部弧不产生新房间
            if arc.to() % 2 == 0 {
                rooms.push(room_of(arc.to()));
            }
            current = arc.to();
        }

        if current != sink {
            break;
        }

        // 占用本条路径的弧和中间节点（包括中间房间的内部弧）
        consumed_arcs.extend(taken);
        claimed_nodes.extend(visited.into_iter().filter(|&node| node != source && node != sink));

        tracing::trace!(rooms = rooms.len(), "提取路径");
        paths.push(Path::new(rooms));
    }

    paths.sort_by_key(Path::length);
    tracing::debug!(paths = paths.len(), "路径提取完成");

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::flow_network::{in_node, out_node};
    use crate::algorithm::max_flow::EdmondsKarp;

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

    fn flow_and_extract(graph: &Graph, ants: usize) -> (usize, Vec<Path>) {
        let mut network = FlowNetwork::build(graph, ants).unwrap();
        let (source, sink) = (network.source(), network.sink());
        let flow = EdmondsKarp::new(&mut network).max_flow(source, sink);
        (flow.value, extract_paths(&network))
    }

    fn names(graph: &Graph, path: &Path) -> Vec<String> {
        path.rooms()
            .iter()
            .map(|&id| graph.room_name(id).to_string())
            .collect()
    }

    #[test]
    fn test_extract_diamond() {
        let graph = build(
            &["s", "a", "b", "e"],
            &[("s", "a"), ("s", "b"), ("a", "e"), ("b", "e")],
            "s",
            "e",
        );
        let (flow, paths) = flow_and_extract(&graph, 4);

        assert_eq!(flow, 2);
        assert_eq!(paths.len(), 2);
        assert_eq!(names(&graph, &paths[0]), ["s", "a", "e"]);
        assert_eq!(names(&graph, &paths[1]), ["s", "b", "e"]);
        assert!(paths.iter().all(|p| p.length() == 3));
    }

    #[test]
    fn test_extract_after_cancellation() {
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
        let (flow, paths) = flow_and_extract(&graph, 2);

        assert_eq!(flow, 2);
        assert_eq!(names(&graph, &paths[0]), ["s", "a", "b", "e"]);
        assert_eq!(names(&graph, &paths[1]), ["s", "c", "d", "e"]);
    }

    #[test]
    fn test_sorted_by_length() {
        // s-x-y-z-e 比 s-a-e 长，提取后短路径排在前面
        let graph = build(
            &["s", "x", "y", "z", "a", "e"],
            &[
                ("s", "x"),
                ("x", "y"),
                ("y", "z"),
                ("z", "e"),
                ("s", "a"),
                ("a", "e"),
            ],
            "s",
            "e",
        );
        let (_, paths) = flow_and_extract(&graph, 3);

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].length(), 3);
        assert_eq!(paths[1].length(), 5);
        assert_eq!(paths[1].render(&graph), "s -> x -> y -> z -> e");
    }

    #[test]
    fn test_direct_link() {
        let graph = build(&["s", "e"], &[("s", "e")], "s", "e");
        let (flow, paths) = flow_and_extract(&graph, 5);

        assert_eq!(flow, 1);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].length(), 2);
        assert!(paths[0].interior().is_empty());
        assert_eq!(paths[0].first_step(), graph.room_id("e"));
    }

    #[test]
    fn test_no_flow_no_paths() {
        let graph = build(&["s", "a", "e"], &[("s", "a")], "s", "e");
        let (flow, paths) = flow_and_extract(&graph, 1);
        assert_eq!(flow, 0);
        assert!(paths.is_empty());
    }

    #[test]
    fn test_paths_vertex_disjoint() {
        // 3x3 网格，起点左上角，终点右下角
        let mut rooms = Vec::new();
        let mut links = Vec::new();
        for r in 0..3 {
            for c in 0..3 {
                rooms.push(format!("r{}c{}", r, c));
                if c + 1 < 3 {
                    links.push((format!("r{}c{}", r, c), format!("r{}c{}", r, c + 1)));
                }
                if r + 1 < 3 {
                    links.push((format!("r{}c{}", r, c), format!("r{}c{}", r + 1, c)));
                }
            }
        }
        let room_refs: Vec<&str> = rooms.iter().map(String::as_str).collect();
        let link_refs: Vec<(&str, &str)> = links
            .iter()
            .map(|(a, b)| (a.as_str(), b.as_str()))
            .collect();
        let graph = build(&room_refs, &link_refs, "r0c0", "r2c2");

        let (flow, paths) = flow_and_extract(&graph, 10);
        assert_eq!(flow, 2);
        assert_eq!(paths.len(), flow);

        let mut seen = HashSet::new();
        for path in &paths {
            assert_eq!(path.room(0), graph.start());
            assert_eq!(path.rooms().last().copied(), graph.end());
            for room in path.interior() {
                assert!(seen.insert(*room), "房间被多条路径共用");
            }
        }
    }

    /// 沿房间序列推送一个单位的流（含途经房间的内部弧）
    fn push_through(network: &mut FlowNetwork, rooms: &[RoomId]) {
        let mut nodes = Vec::new();
        for (i, &room) in rooms.iter().enumerate() {
            if i > 0 {
                nodes.push(in_node(room));
            }
            if i + 1 < rooms.len() {
                nodes.push(out_node(room));
            }
        }
        for pair in nodes.windows(2) {
            let index = network
                .arcs(pair[0])
                .iter()
                .position(|arc| arc.is_forward() && arc.to() == pair[1])
                .unwrap();
            network.push(pair[0], index, 1);
        }
    }

    #[test]
    fn test_circulation_ignored() {
        // s-a-e 承载一个单位的流，b-c-d 三角形上另有一个环流
        let graph = build(
            &["s", "a", "b", "c", "d", "e"],
            &[
                ("s", "a"),
                ("a", "e"),
                ("s", "b"),
                ("b", "c"),
                ("c", "d"),
                ("d", "b"),
            ],
            "s",
            "e",
        );
        let id = |name: &str| graph.room_id(name).unwrap();

        let mut network = FlowNetwork::build(&graph, 2).unwrap();
        push_through(&mut network, &[id("s"), id("a"), id("e")]);
        push_through(&mut network, &[id("b"), id("c"), id("d"), id("b")]);
        // 环流闭合：b 的内部弧同样承载流量
        let internal = network
            .arcs(in_node(id("b")))
            .iter()
            .position(|arc| arc.is_forward() && arc.to() == out_node(id("b")))
            .unwrap();
        network.push(in_node(id("b")), internal, 1);

        let paths = extract_paths(&network);
        assert_eq!(paths.len(), 1);
        assert_eq!(names(&graph, &paths[0]), ["s", "a", "e"]);
    }
}
