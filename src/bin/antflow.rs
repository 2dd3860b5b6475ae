//! antflow 命令行入口
//!
//! 读取 lem-in 格式的输入文件，输出每轮的蚂蚁移动

use anyhow::Context;
use antflow::cli::{OutputConfig, OutputFormat, Printer};
use antflow::import::GraphLoader;
use antflow::solver::{Solver, SolverConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "antflow")]
#[command(version, about = "蚁群路径规划：最大流求不相交路径并逐轮调度蚂蚁")]
struct Args {
    /// 输入文件路径
    input: PathBuf,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// 输出选中的路径
    #[arg(short = 'p', long)]
    show_paths: bool,

    /// 在移动记录前回显输入
    #[arg(short, long)]
    echo_input: bool,

    /// 输出最大流之后的残余网络
    #[arg(long)]
    dump_network: bool,

    /// 流量达到蚂蚁数量后停止增广
    #[arg(long)]
    cap_flow: bool,

    /// 拒绝未知的 ## 命令
    #[arg(long)]
    strict: bool,

    /// 输出调试日志（可被 RUST_LOG 覆盖）
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let problem = GraphLoader::new()
        .with_strict_commands(args.strict)
        .load_path(&args.input)
        .with_context(|| format!("无法加载输入文件 {}", args.input.display()))?;

    let config = SolverConfig {
        ants: problem.ants,
        cap_flow_at_ants: args.cap_flow,
    };
    let solution = Solver::new(config).solve(&problem.graph)?;

    let printer = Printer::new(OutputConfig {
        format: args.format,
        show_paths: args.show_paths,
        echo_input: args.echo_input,
        dump_network: args.dump_network,
    });
    print!(
        "{}",
        printer.render(Some(&problem.source), &problem.graph, &solution)?
    );

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}
