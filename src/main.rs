use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use receipt_points::{parse_receipt, PointsBreakdown, Receipt};

#[derive(Parser)]
#[command(name = "receipt-points")]
#[command(about = "Score purchase receipts offline.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the points a receipt earns, rule by rule
    #[command(alias = "s")]
    Score {
        /// Receipt JSON file
        file: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check a receipt and report the first invalid field
    #[command(alias = "v")]
    Validate {
        /// Receipt JSON file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score { file, json } => run_score(&file, json),
        Command::Validate { file } => run_validate(&file),
    }
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let body = fs::read(path).with_context(|| format!("Failed to read receipt file: {:?}", path))?;
    let receipt = parse_receipt(&body)
        .with_context(|| format!("Receipt {:?} is invalid", path))?;
    Ok(receipt)
}

fn run_score(path: &Path, json: bool) -> Result<()> {
    let receipt = load_receipt(path)?;
    let breakdown = PointsBreakdown::for_receipt(&receipt);

    if json {
        let output = serde_json::json!({
            "points": breakdown.total(),
            "breakdown": breakdown,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("🧾 {} ({} {})", receipt.retailer, receipt.purchase_date, receipt.purchase_time);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    let rows = [
        ("Retailer name", breakdown.retailer_name),
        ("Round dollar total", breakdown.round_total),
        ("Multiple of 0.25", breakdown.quarter_total),
        ("Item pairs", breakdown.item_pairs),
        ("Item descriptions", breakdown.item_descriptions),
        ("Odd purchase day", breakdown.odd_day),
        ("2pm - 4pm purchase", breakdown.afternoon),
    ];
    for (rule, points) in rows {
        println!("  {:<22} {:>6}", rule, points);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<22} {:>6}", "Total", breakdown.total());

    Ok(())
}

fn run_validate(path: &Path) -> Result<()> {
    let body = fs::read(path).with_context(|| format!("Failed to read receipt file: {:?}", path))?;

    match parse_receipt(&body) {
        Ok(receipt) => {
            println!("✓ Receipt is valid ({} items)", receipt.items.len());
            Ok(())
        }
        Err(e) => bail!("❌ Invalid {}: {}", e.field(), e),
    }
}
