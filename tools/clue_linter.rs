/// Clue linter: checks clue catalogs for trait values no clue can reveal.
///
/// Usage: clue_linter <catalog.ron>... [--with-standard]

use clap::Parser;
use mystery_case::core::catalog::{CatalogIssue, ClueCatalog};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "clue_linter", about = "Validate clue template catalogs")]
struct Args {
    /// Catalog files, merged in order.
    #[arg(required = true)]
    catalogs: Vec<PathBuf>,

    /// Lint the files merged over the standard catalog instead of alone.
    #[arg(long)]
    with_standard: bool,
}

fn main() {
    let args = Args::parse();

    let mut catalog = if args.with_standard {
        ClueCatalog::standard()
    } else {
        ClueCatalog::default()
    };
    for path in &args.catalogs {
        match ClueCatalog::load_from_ron(path) {
            Ok(loaded) => {
                println!("Loaded {} templates from {}", loaded.len(), path.display());
                catalog.extend(loaded);
            }
            Err(e) => {
                eprintln!("ERROR: failed to load {}: {}", path.display(), e);
                process::exit(1);
            }
        }
    }

    let issues = catalog.lint();

    println!("\n=== Clue Catalog Lint Report ===\n");
    if issues.is_empty() {
        println!("All checks passed!");
    }
    for issue in &issues {
        match issue {
            CatalogIssue::MissingCategory(category) => {
                println!("ERROR: no template reveals {category}")
            }
            CatalogIssue::UncoveredValue(value) => {
                println!("WARNING: {value} can only be revealed alongside other facts")
            }
            CatalogIssue::EmptyConditions(i) => {
                let location = catalog.templates[*i].location.tag();
                println!("ERROR: template #{i} ({location}) has an empty condition list")
            }
        }
    }
    println!("\nSummary: {} templates, {} issues", catalog.len(), issues.len());

    if !issues.is_empty() {
        process::exit(1);
    }
}
