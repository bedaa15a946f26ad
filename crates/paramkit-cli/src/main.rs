//! Command-line harness around the paramkit attribute model.
//! Works on a demo planet-generator parameter set.

mod planet;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use paramkit_core::attributes::{make_power_of_two, PathAttr};
use paramkit_core::geometry::random_points;
use paramkit_core::{Diagnostics, LayoutItem};

#[derive(Parser, Debug)]
#[command(name = "paramkit", about = "Inspect and edit generator parameter presets")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default preset, or write it to a file.
    Defaults {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the attributes in display order, optionally after applying a preset.
    Show {
        #[arg(short, long)]
        preset: Option<PathBuf>,
    },
    /// Build a random path and report its length before and after reordering.
    Tour {
        #[arg(long, default_value_t = 32)]
        points: usize,

        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long)]
        closed: bool,
    },
    /// Snap a value to a power of two.
    Pow2 {
        value: i32,

        /// Round up instead of down.
        #[arg(long)]
        up: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.command {
        Command::Defaults { output } => defaults(output),
        Command::Show { preset } => show(preset),
        Command::Tour { points, seed, closed } => {
            tour(points, seed, closed);
            Ok(())
        }
        Command::Pow2 { value, up } => {
            println!("{}", make_power_of_two(value, up));
            Ok(())
        }
    }
}

fn defaults(output: Option<PathBuf>) -> Result<()> {
    let mut diag = Diagnostics::new();
    let set = planet::planet_attributes(&mut diag)?;
    match output {
        Some(path) => {
            set.save_preset_file(&path)
                .with_context(|| format!("writing preset {}", path.display()))?;
            log::info!("wrote {} attributes to {}", set.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&set.save_preset())?),
    }
    Ok(())
}

fn show(preset: Option<PathBuf>) -> Result<()> {
    let mut diag = Diagnostics::new();
    let mut set = planet::planet_attributes(&mut diag)?;

    if let Some(path) = preset {
        let report = set
            .load_preset_file(&path)
            .with_context(|| format!("loading preset {}", path.display()))?;
        for key in &report.ignored {
            println!("ignored: {key}");
        }
    }

    for item in set.editor_layout() {
        match item {
            LayoutItem::Attribute { key, editor } => {
                if let Some(attr) = set.get(key) {
                    println!("  {key:<20} {:<18} {attr}", format!("{editor:?}"));
                }
            }
            LayoutItem::Separator => println!("  ----"),
            LayoutItem::Heading(text) => println!("-- {text} --"),
            LayoutItem::Text(text) => println!("  {text}"),
            LayoutItem::GroupBegin(title) => println!("[{title}]"),
            LayoutItem::GroupEnd => println!("[end]"),
        }
    }

    for record in diag.records().iter().chain(set.diagnostics().records()) {
        println!("{record}");
    }
    Ok(())
}

fn tour(points: usize, seed: u64, closed: bool) {
    let mut path = PathAttr::new(random_points(seed, points), closed);
    let before = path.length();
    path.reorder_nns();
    let after = path.length();
    println!("points: {}  closed: {closed}", path.len());
    println!("length before: {before:.4}");
    println!("length after:  {after:.4}");
}
