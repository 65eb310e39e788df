use anyhow::Result;
use clap::Parser;
use refdata::config::Paths;
use refdata::validate;
use std::path::PathBuf;

/// Report relationship endpoints that do not resolve to any entity record.
#[derive(Parser, Debug)]
#[command(name = "check-dangling-refs", version, about = "Check output tables for dangling references")]
struct Cli {
    /// Output directory to check (defaults to .data)
    #[arg(long)]
    data_root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    println!("🔍 Checking Relationship References");
    println!("{}", "=".repeat(60));

    let mut paths = Paths::load()?;
    if let Some(data_root) = args.data_root {
        paths.data_root = data_root;
    }

    let report = validate::check_references(&paths)?;
    println!("\n📊 Entities: {} across {} files", report.entities, report.entity_files);
    println!("📊 Edges checked: {} across {} files", report.edges_checked, report.relationship_files);

    if report.is_clean() {
        println!("\n✅ All references resolve");
    } else {
        println!("\n❌ {} dangling references:", report.dangling.len());
        for dangling in &report.dangling {
            println!(
                "   - {} row {}: {}:{}:{}",
                dangling.file, dangling.row, dangling.ns, dangling.entity_type, dangling.id
            );
        }
    }

    Ok(())
}
