// Wed Feb 11 2026 - Alex

use anyhow::{anyhow, Context};
use art_method_patcher::{
    config::PatcherConfig,
    layout::{DescriptorLayout, LayoutRegistry},
    runtime::{detect, PointerWidth, RuntimeProfile, RuntimeVersion},
    utils::LoggingUtils,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "art-layout")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Inspect the ART method descriptor layout table", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every supported layout
    Table(TableArgs),
    /// Print the layout for one runtime
    Resolve(ResolveArgs),
    /// Load a config and report the runtime it selects
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct TableArgs {
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    #[arg(long)]
    api: u32,

    #[arg(long, default_value = "64")]
    width: u32,

    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[arg(short, long)]
    config: PathBuf,
}

#[derive(Serialize)]
struct LayoutRow {
    profile: RuntimeProfile,
    layout: DescriptorLayout,
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    LoggingUtils::init_from_env(LoggingUtils::level_from_str(&args.log_level));

    let result = match args.command {
        Command::Table(table) => handle_table(table),
        Command::Resolve(resolve) => handle_resolve(resolve),
        Command::Check(check) => handle_check(check),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn print_layout(profile: RuntimeProfile, layout: &DescriptorLayout) {
    println!(
        "{:<32} quick {:<14} jni {:<14} flags {}",
        profile.to_string().cyan(),
        layout.entry_point.to_string(),
        layout.jni_entry_point.to_string(),
        layout.access_flags
    );
}

fn handle_table(args: TableArgs) -> anyhow::Result<()> {
    let registry = LayoutRegistry::global()?;
    let rows: Vec<LayoutRow> = registry
        .supported()
        .into_iter()
        .map(|(profile, layout)| LayoutRow { profile, layout })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", "ART method descriptor layouts".bold());
    println!("{}", "=".repeat(50).cyan());
    for row in &rows {
        print_layout(row.profile, &row.layout);
    }
    println!();
    println!("{} {} supported runtimes", "[+]".green(), rows.len());
    Ok(())
}

fn handle_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let version = RuntimeVersion::from_api_level(args.api)
        .ok_or_else(|| anyhow!("API level {} is not a known ART generation", args.api))?;
    let width = PointerWidth::from_bits(args.width)
        .ok_or_else(|| anyhow!("width must be 32 or 64, got {}", args.width))?;
    let profile = RuntimeProfile::new(version, width);
    let layout = LayoutRegistry::global()?.layout(profile)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&LayoutRow { profile, layout })?);
    } else {
        print_layout(profile, &layout);
    }
    Ok(())
}

fn handle_check(args: CheckArgs) -> anyhow::Result<()> {
    let config = PatcherConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    println!("{} Config loaded: {}", "[+]".green(), args.config.display());

    let profile = detect(&config.query())?;
    println!("{} Runtime: {}", "[*]".blue(), profile);

    let registry = LayoutRegistry::global()?;
    if registry.is_supported(profile) {
        print_layout(profile, &registry.layout(profile)?);
    } else {
        println!("{} No layout for {}; hooks would not be installed", "[!]".yellow(), profile);
    }

    match &config.verify_layout {
        Some(check) => println!(
            "{} Layout will be verified against reference 0x{:x} in {}",
            "[*]".blue(),
            check.reference,
            check.code_range()
        ),
        None => println!("{} Layout verification disabled", "[*]".blue()),
    }
    Ok(())
}
