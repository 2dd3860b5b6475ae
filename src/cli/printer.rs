//! 结果打印器
//!
//! 把求解结果渲染为 lem-in 文本输出、路径表格或 JSON

use crate::algorithm::Path;
use crate::error::Result;
use crate::graph::Graph;
use crate::solver::Solution;
use prettytable::{format, row, Table};
use serde::Serialize;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// 每轮一行的移动记录
    #[default]
    Text,
    /// JSON 文档
    Json,
}

/// 输出配置
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// 在移动记录之前列出选中的路径
    pub show_paths: bool,
    /// 在移动记录之前回显原始输入
    pub echo_input: bool,
    /// 输出最大流之后的残余网络
    pub dump_network: bool,
}

/// JSON 输出中的路径
#[derive(Debug, Serialize)]
struct PathReport {
    label: String,
    length: usize,
    ants: usize,
    rooms: Vec<String>,
}

/// JSON 输出文档
#[derive(Debug, Serialize)]
struct SolutionReport {
    ants: usize,
    max_flow: usize,
    turns: usize,
    rounds_count: usize,
    paths: Vec<PathReport>,
    rounds: Vec<Vec<String>>,
}

/// 结果打印器
pub struct Printer {
    config: OutputConfig,
}

impl Printer {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// 渲染完整输出
    pub fn render(&self, input: Option<&str>, graph: &Graph, solution: &Solution) -> Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(self.format_text(input, graph, solution)),
            OutputFormat::Json => self.format_json(graph, solution),
        }
    }

    /// 文本格式
    fn format_text(&self, input: Option<&str>, graph: &Graph, solution: &Solution) -> String {
        let mut output = String::new();

        if self.config.echo_input {
            if let Some(text) = input {
                output.push_str(text.trim_end());
                output.push_str("\n\n");
            }
        }

        if self.config.dump_network {
            output.push_str(&solution.network.dump(graph).to_string());
            output.push('\n');
        }

        if self.config.show_paths {
            output.push_str(&format_paths_table(
                graph,
                solution.selection.paths(),
                solution.schedule.assignments(),
            ));
            output.push_str(&format!(
                "{} path(s) selected of {}, {} ant(s), {} round(s) (bound {})\n\n",
                solution.selection.path_count(),
                solution.paths.len(),
                solution.selection.ants(),
                solution.schedule.round_count(),
                solution.selection.turns()
            ));
        }

        for line in solution.render_rounds(graph) {
            output.push_str(&line);
            output.push('\n');
        }

        output
    }

    /// JSON 格式
    fn format_json(&self, graph: &Graph, solution: &Solution) -> Result<String> {
        let assignments = solution.schedule.assignments();
        let paths = solution
            .selection
            .paths()
            .iter()
            .enumerate()
            .map(|(i, path)| PathReport {
                label: path_label(i),
                length: path.length(),
                ants: assignments.get(i).copied().unwrap_or(0),
                rooms: path
                    .rooms()
                    .iter()
                    .map(|&id| graph.room_name(id).to_string())
                    .collect(),
            })
            .collect();

        let rounds = solution
            .schedule
            .rounds()
            .iter()
            .map(|round| round.moves.iter().map(|mv| mv.render(graph)).collect())
            .collect();

        let report = SolutionReport {
            ants: solution.selection.ants(),
            max_flow: solution.max_flow,
            turns: solution.selection.turns(),
            rounds_count: solution.schedule.round_count(),
            paths,
            rounds,
        };

        Ok(serde_json::to_string_pretty(&report)? + "\n")
    }
}

/// 路径标签（从 1 开始）
pub fn path_label(index: usize) -> String {
    format!("Path {}", index + 1)
}

/// 路径表格
pub fn format_paths_table(graph: &Graph, paths: &[Path], assignments: &[usize]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Path", "Rooms", "Ants", "Route"]);

    for (i, path) in paths.iter().enumerate() {
        let ants = assignments.get(i).copied().unwrap_or(0);
        table.add_row(row![
            path_label(i),
            path.length().to_string(),
            ants.to_string(),
            path.render(graph)
        ]);
    }

    table.to_string()
}
