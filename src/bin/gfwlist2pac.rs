//! gfwlist2pac: CLI tool for generating a PAC file from gfwlist.

use clap::Parser;
use gfwlist2pac::{Config, Converter, PacMode, Resources, RuleSource};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gfwlist2pac")]
#[command(version)]
#[command(about = "Generate a proxy auto-config (PAC) file from gfwlist", long_about = None)]
struct Cli {
    /// Path or URL of gfwlist (defaults to the upstream gfwlist)
    #[arg(short, long, value_name = "GFWLIST")]
    input: Option<String>,

    /// Output PAC file
    #[arg(short = 'f', long = "file", value_name = "PAC")]
    output: PathBuf,

    /// Proxy directive in the PAC file, for example "SOCKS5 127.0.0.1:1080;"
    #[arg(short, long, value_name = "PROXY")]
    proxy: String,

    /// Path or URL of a user rule file, appended to gfwlist
    #[arg(long)]
    user_rule: Option<String>,

    /// Use adblock plus matching instead of O(1) lookup
    #[arg(long)]
    precise: bool,

    /// Directory with builtin.txt, tld.txt, proxy.pac and abp.js
    #[arg(long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// Network timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let resources = match &cli.resources {
        Some(dir) => Resources::from_dir(dir)?,
        None => Resources::bundled(),
    };

    let config = Config {
        input: cli.input.as_deref().map(RuleSource::parse),
        output: cli.output,
        proxy: cli.proxy,
        user_rule: cli.user_rule.as_deref().map(RuleSource::parse),
        mode: if cli.precise {
            PacMode::Precise
        } else {
            PacMode::Fast
        },
        timeout: Duration::from_secs(cli.timeout),
    };

    let stats = Converter::new(resources).run(&config)?;

    println!(
        "Generated {:?} ({} entries from {} rule lines, {} bytes)",
        config.output, stats.entries, stats.rule_lines, stats.bytes_written
    );
    Ok(())
}
