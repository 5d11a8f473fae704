//! Console client for the rabbit-hole arena.
//!
//! Connects to a search backend over one WebSocket, validates the start and
//! target pair, kicks off the race, and reconciles the backend's progress
//! stream into per-agent state, printing agent activity as it happens and a
//! win summary at the end.
//!
//! Examples:
//!   arena-cli Mustard Chocolate
//!   arena-cli --dfs-model mistralai/mistral-large \
//!       https://en.wikipedia.org/wiki/Microwave_oven Chocolate
//!
//! By default it talks to 127.0.0.1:8000; override with `--ws` and `--api`.

use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rabbithole::analytics::RaceReport;
use rabbithole::protocol::{DEFAULT_MODEL, KNOWN_MODELS};
use rabbithole::{topic, AgentType, Arena, Dispatch, RaceError, RaceState, STOP_COMMAND};

mod connection;
mod validate;

use connection::RaceConnection;

struct Args {
    ws: String,
    api: String,
    bfs_model: String,
    dfs_model: String,
    start: String,
    target: String,
}

fn usage() -> ! {
    eprintln!("arena-cli (races a BFS agent against a DFS agent through Wikipedia)");
    eprintln!("Usage: arena-cli [options] <start> <target>\n");
    eprintln!("Options:");
    eprintln!("  --ws <url>        WebSocket endpoint (default ws://127.0.0.1:8000/ws/race)");
    eprintln!("  --api <url>       HTTP base for validation (default http://127.0.0.1:8000)");
    eprintln!("  --bfs-model <id>  Link-ranking model for the BFS agent");
    eprintln!("  --dfs-model <id>  Link-ranking model for the DFS agent");
    eprintln!();
    eprintln!("Start and target accept a topic (\"Mustard\") or a Wikipedia article URL.");
    eprintln!("Known models:");
    for model in KNOWN_MODELS {
        eprintln!("  {model}");
    }
    process::exit(2);
}

fn parse_args() -> Args {
    let mut ws = "ws://127.0.0.1:8000/ws/race".to_string();
    let mut api = "http://127.0.0.1:8000".to_string();
    let mut bfs_model = DEFAULT_MODEL.to_string();
    let mut dfs_model = DEFAULT_MODEL.to_string();
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ws" => ws = args.next().unwrap_or_else(|| usage()),
            "--api" => api = args.next().unwrap_or_else(|| usage()),
            "--bfs-model" => bfs_model = args.next().unwrap_or_else(|| usage()),
            "--dfs-model" => dfs_model = args.next().unwrap_or_else(|| usage()),
            "--help" | "-h" => usage(),
            _ => positional.push(arg),
        }
    }
    if positional.len() != 2 {
        usage();
    }
    let target = positional.remove(1);
    let start = positional.remove(0);

    for model in [&bfs_model, &dfs_model] {
        if !KNOWN_MODELS.contains(&model.as_str()) {
            warn!("model {model} is not in the known list; passing it through anyway");
        }
    }

    Args {
        ws,
        api,
        bfs_model,
        dfs_model,
        start,
        target,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args();
    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), RaceError> {
    let start_topic = topic::extract(&args.start)
        .ok_or_else(|| RaceError::Input(format!("cannot extract a topic from {:?}", args.start)))?;
    let target_topic = topic::extract(&args.target)
        .ok_or_else(|| RaceError::Input(format!("cannot extract a topic from {:?}", args.target)))?;

    let mut arena = Arena::new(args.bfs_model, args.dfs_model);

    let mut conn = RaceConnection::connect(&args.ws).await?;

    arena.begin_validation();
    info!("validating {start_topic} -> {target_topic}");
    if let Err(err) = validate::check_pair(
        &args.api,
        &topic::article_url(&start_topic),
        &topic::article_url(&target_topic),
    )
    .await
    {
        arena.abort_validation();
        conn.shutdown(false).await;
        return Err(err);
    }

    if !conn.is_open() {
        arena.abort_validation();
        return Err(RaceError::Connectivity("no open connection".to_string()));
    }
    arena.start_race(&start_topic, &target_topic);
    conn.send(&arena.start_command().encode()).await?;
    println!("race on: {start_topic} -> {target_topic}");

    let mut bfs_done = false;
    let mut dfs_done = false;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                if arena.stop_race() {
                    let _ = conn.send(STOP_COMMAND).await;
                    info!("race stopped by user");
                }
                break;
            }
            frame = conn.recv() => {
                let Some(text) = frame else {
                    if arena.session().state() == RaceState::Running {
                        warn!("backend closed the connection mid-race");
                    }
                    break;
                };
                match arena.apply(&text) {
                    Dispatch::Discarded => {}
                    Dispatch::Acknowledged => info!("backend acknowledged start"),
                    Dispatch::Updated { agent, node } => {
                        println!("> [{}] visiting: {node}", agent.as_str());
                    }
                    Dispatch::Won { agent, first } => {
                        if first {
                            println!("\n{} found the target first!", agent.title());
                        }
                        match agent {
                            AgentType::Bfs => bfs_done = true,
                            AgentType::Dfs => dfs_done = true,
                        }
                    }
                    Dispatch::Stopped { agent } => {
                        println!("> [{}] race stopped", agent.as_str());
                        match agent {
                            AgentType::Bfs => bfs_done = true,
                            AgentType::Dfs => dfs_done = true,
                        }
                    }
                }
                if bfs_done && dfs_done {
                    break;
                }
            }
        }
    }

    let still_running = arena.session().state() == RaceState::Running;
    conn.shutdown(still_running).await;

    print_summary(&arena);
    Ok(())
}

fn print_summary(arena: &Arena) {
    let report = RaceReport::from_arena(arena);

    if let Some(winner) = report.winner {
        let lane = arena.lane(winner);
        println!("\nwinner: {}", winner.title());
        println!("  path:   {}", lane.progress.path.join(" -> "));
        println!(
            "  clicks: {}   nodes scanned: {}   model: {}",
            lane.progress.depth, lane.progress.visited_count, lane.progress.model_id
        );
    } else {
        println!("\nno winner declared");
    }

    for lane in [&report.bfs, &report.dfs] {
        let time = lane
            .time_to_complete
            .map(|d| format!("{:.2}s", d.as_secs_f64()))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}: nodes={} depth={} avg_click_depth={:.2} efficiency={:.1}% time={}",
            lane.agent.as_str(),
            lane.nodes_explored,
            lane.path_depth,
            lane.avg_click_depth,
            lane.efficiency_pct,
            time,
        );
    }

    if let Some(agent) = report.shorter_path {
        println!("shorter path: {}", agent.as_str());
    }
    if let Some(agent) = report.more_selective {
        println!("more selective: {}", agent.as_str());
    }
    if let Some(agent) = report.more_efficient {
        println!("more efficient: {}", agent.as_str());
    }
}
