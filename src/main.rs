use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use topicvote_feed::ads::{interleave, FeedNode};
use topicvote_feed::config::{load_system_config, AppConfig, CliConfig, FileConfig};
use topicvote_feed::notifications::{
    merge_announcements_with, unread_count, Notification, TimestampPolicy,
};
use topicvote_feed::topic_cost::{calculate_topic_cost, TopicCostParams};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(name = "feed-tool", version, about = "Topic feed and notification inbox tooling")]
struct CliArgs {
    /// Path to a TOML config file. Its values override CLI flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Path to a JSON snapshot of the remote system config.
    #[clap(long, value_parser = parse_path)]
    pub system_config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert ad slots into a JSON array of list items.
    Interleave(InterleaveArgs),
    /// Merge announcement rows of a JSON array of notifications.
    MergeNotifications(MergeArgs),
    /// Compute the token cost of publishing a topic.
    TopicCost(TopicCostArgs),
}

#[derive(Args, Debug)]
struct InterleaveArgs {
    /// JSON file with the items. Reads stdin when omitted.
    #[clap(value_parser = parse_path)]
    pub input: Option<PathBuf>,

    /// Ad unit identifier. No ads are inserted without one.
    #[clap(long)]
    pub ad_unit_id: Option<String>,

    /// Number of items between two ads.
    #[clap(long)]
    pub interval: Option<u32>,

    /// Number of leading items without ads.
    #[clap(long)]
    pub skip_first: Option<u32>,

    /// First ad key counter value.
    #[clap(long)]
    pub ad_index: Option<u64>,

    /// Never insert ads.
    #[clap(long)]
    pub disable_ads: bool,
}

#[derive(Args, Debug)]
struct MergeArgs {
    /// JSON file with the notification rows. Reads stdin when omitted.
    #[clap(value_parser = parse_path)]
    pub input: Option<PathBuf>,

    /// What to do with unparseable created_at values.
    #[clap(long)]
    pub timestamp_policy: Option<TimestampPolicy>,
}

#[derive(Args, Debug)]
struct TopicCostArgs {
    /// Exposure level: normal, medium, high.
    #[clap(long, default_value = "normal")]
    pub exposure_level: String,

    /// How many days the topic stays open.
    #[clap(long, default_value_t = 1)]
    pub duration_days: u32,

    #[clap(long, default_value_t = 0)]
    pub base_cost: i64,

    /// Today's discount in tokens.
    #[clap(long, default_value_t = 0)]
    pub daily_discount: i64,

    /// The user holds a free topic qualification.
    #[clap(long)]
    pub free: bool,
}

/// Rendered list entry: the item plus its position in the input.
#[derive(Debug, Serialize)]
struct RenderedItem {
    index: usize,
    item: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct MergeOutput {
    unread: usize,
    notifications: Vec<Notification>,
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };

    let mut cli_config = CliConfig {
        system_config_path: cli_args.system_config.clone(),
        ..Default::default()
    };
    match &cli_args.command {
        Command::Interleave(args) => {
            cli_config.ad_unit_id = args.ad_unit_id.clone();
            cli_config.ad_interval = args.interval;
            cli_config.ad_skip_first = args.skip_first;
            cli_config.ad_index = args.ad_index;
            cli_config.disable_ads = args.disable_ads;
        }
        Command::MergeNotifications(args) => {
            cli_config.timestamp_policy = args.timestamp_policy;
        }
        Command::TopicCost(_) => {}
    }

    let remote = match AppConfig::system_config_path(&cli_config, file_config.as_ref()) {
        Some(path) => {
            info!("Loading system config snapshot from {:?}", path);
            Some(load_system_config(&path)?)
        }
        None => None,
    };

    let config = AppConfig::resolve(&cli_config, file_config, remote.as_ref())?;

    match cli_args.command {
        Command::Interleave(args) => {
            let input = read_input(args.input.as_deref())?;
            let items: Vec<serde_json::Value> =
                serde_json::from_str(&input).context("Input must be a JSON array")?;

            let nodes: Vec<FeedNode<RenderedItem>> = interleave(
                &items,
                |item, index| RenderedItem {
                    index,
                    item: item.clone(),
                },
                &config.ads,
            )?;
            info!(
                "Rendered {} items with {} ads",
                items.len(),
                nodes.iter().filter(|n| n.is_ad()).count()
            );
            print_json(&nodes)
        }
        Command::MergeNotifications(args) => {
            let input = read_input(args.input.as_deref())?;
            let notifications: Vec<Notification> = serde_json::from_str(&input)
                .context("Input must be a JSON array of notifications")?;

            let merged =
                merge_announcements_with(notifications, config.notifications.timestamp_policy)?;
            print_json(&MergeOutput {
                unread: unread_count(&merged),
                notifications: merged,
            })
        }
        Command::TopicCost(args) => {
            let (exposure_costs, duration_costs) = remote
                .as_ref()
                .map(|r| r.topic_cost_tables())
                .unwrap_or_default();
            let params = TopicCostParams {
                exposure_costs,
                duration_costs,
                base_cost: args.base_cost,
                exposure_level: args.exposure_level,
                duration_days: args.duration_days,
                daily_discount_amount: args.daily_discount,
                has_free_qualification: args.free,
            };
            print_json(&calculate_topic_cost(&params))
        }
    }
}
