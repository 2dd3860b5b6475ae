//! 数据导入模块
//!
//! 读取 lem-in 文本格式的问题描述：
//!
//! ```text
//! 3            # 蚂蚁数量（必须是第一行）
//! ##start
//! s 0 0        # 房间：名称 x y
//! a 1 0
//! ##end
//! e 2 0
//! s-a          # 通道：房间-房间
//! a-e
//! ```

use crate::error::{Error, Result};
use crate::graph::{Coord, Graph, RoomId};
use std::fs;
use std::path::Path;

/// 导入统计
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub rooms: usize,
    pub links: usize,
    pub comments: usize,
    pub duration_us: u64,
}

/// 解析得到的问题实例
#[derive(Debug, Clone)]
pub struct Problem {
    /// 蚂蚁数量
    pub ants: usize,
    pub graph: Graph,
    /// 原始输入（用于回显）
    pub source: String,
    pub stats: ImportStats,
}

/// 待标记的下一个房间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

/// 图加载器
#[derive(Debug, Default)]
pub struct GraphLoader {
    /// 是否拒绝未知的 `##` 命令
    strict_commands: bool,
}

impl GraphLoader {
    /// 创建加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否拒绝未知命令
    pub fn with_strict_commands(mut self, strict: bool) -> Self {
        self.strict_commands = strict;
        self
    }

    /// 从文件加载
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Problem> {
        let text = fs::read_to_string(path)?;
        self.parse_str(&text)
    }

    /// 从字符串解析
    pub fn parse_str(&self, input: &str) -> Result<Problem> {
        let start_time = std::time::Instant::now();
        let mut stats = ImportStats::default();
        let mut graph = Graph::new();

        let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line.trim()));

        // 第一行：蚂蚁数量
        let (first_no, first) = lines.next().ok_or_else(|| Error::ParseError {
            line: 1,
            message: "输入为空".to_string(),
        })?;
        let ants = parse_ants(first_no, first)?;

        let mut pending: Option<Marker> = None;

        for (line_no, line) in lines {
            if line.is_empty() {
                continue;
            }

            if let Some(command) = line.strip_prefix("##") {
                let marker = match command {
                    "start" => Marker::Start,
                    "end" => Marker::End,
                    _ if self.strict_commands => {
                        return Err(parse_error(line_no, format!("未知命令: {}", line)));
                    }
                    _ => {
                        stats.comments += 1;
                        continue;
                    }
                };
                if pending.is_some() {
                    return Err(parse_error(line_no, "命令之后必须紧跟房间定义"));
                }
                let already_set = match marker {
                    Marker::Start => graph.start().is_some(),
                    Marker::End => graph.end().is_some(),
                };
                if already_set {
                    return Err(parse_error(line_no, format!("重复的命令: {}", line)));
                }
                pending = Some(marker);
                continue;
            }

            if line.starts_with('#') {
                stats.comments += 1;
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields.as_slice() {
                [name, x, y] => {
                    let id = self.parse_room(&mut graph, line_no, name, x, y)?;
                    stats.rooms += 1;
                    match pending.take() {
                        Some(Marker::Start) => graph.set_start(id),
                        Some(Marker::End) => graph.set_end(id),
                        None => {}
                    }
                }
                [link] if pending.is_none() => {
                    let (a, b) = link
                        .split_once('-')
                        .filter(|(a, b)| !a.is_empty() && !b.is_empty() && !b.contains('-'))
                        .ok_or_else(|| parse_error(line_no, format!("无效的行: {}", line)))?;
                    graph.add_link(a, b).map_err(|e| match e {
                        Error::UnknownRoom(name) => {
                            parse_error(line_no, format!("通道引用了未知房间: {}", name))
                        }
                        other => other,
                    })?;
                    stats.links += 1;
                }
                _ => return Err(parse_error(line_no, format!("无效的行: {}", line))),
            }
        }

        if pending.is_some() {
            return Err(parse_error(
                input.lines().count(),
                "命令之后缺少房间定义",
            ));
        }

        stats.duration_us = start_time.elapsed().as_micros() as u64;
        tracing::debug!(
            ants,
            rooms = stats.rooms,
            links = stats.links,
            "输入解析完成"
        );

        Ok(Problem {
            ants,
            graph,
            source: input.to_string(),
            stats,
        })
    }

    /// 解析房间行
    fn parse_room(
        &self,
        graph: &mut Graph,
        line_no: usize,
        name: &str,
        x: &str,
        y: &str,
    ) -> Result<RoomId> {
        if name.starts_with('L') || name.starts_with('#') || name.contains('-') {
            return Err(parse_error(line_no, format!("无效的房间名: {}", name)));
        }
        let x = x
            .parse::<i64>()
            .map_err(|_| parse_error(line_no, format!("无效的坐标: {}", x)))?;
        let y = y
            .parse::<i64>()
            .map_err(|_| parse_error(line_no, format!("无效的坐标: {}", y)))?;

        graph.add_room(name, Some(Coord { x, y }))
    }
}

fn parse_ants(line_no: usize, line: &str) -> Result<usize> {
    if line.is_empty() || line.starts_with('#') {
        return Err(parse_error(line_no, "第一行必须是蚂蚁数量"));
    }
    match line.parse::<usize>() {
        Ok(0) => Err(Error::InvalidAntCount("蚂蚁数量必须为正数".to_string())),
        Ok(n) => Ok(n),
        Err(e) => Err(parse_error(line_no, format!("无效的蚂蚁数量: {}", e))),
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::ParseError {
        line,
        message: message.into(),
    }
}
