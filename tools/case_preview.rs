/// Case preview: generate a case and print everything a designer needs to
/// check it by hand.
///
/// Usage: case_preview [--seed <n>] [--suspects <n>] [--clues <file.ron>]...
///                     [--traits <file.ron>] [--ron]
///
/// Set RUST_LOG=mystery_case=debug to see the pipeline stages.

use clap::Parser;
use mystery_case::core::case::{Case, CaseError};
use mystery_case::core::search::Resolution;
use mystery_case::schema::location::Location;
use mystery_case::schema::traits::TraitCategory;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "case_preview", about = "Generate and inspect a murder-mystery case")]
struct Args {
    /// Seed to reproduce; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Fixed number of suspects instead of the default 5..=10.
    #[arg(long)]
    suspects: Option<usize>,

    /// Extra clue templates to merge over the standard catalog.
    #[arg(long = "clues")]
    clue_files: Vec<PathBuf>,

    /// Trait weight overrides.
    #[arg(long = "traits")]
    trait_file: Option<PathBuf>,

    /// Dump the case as pretty RON instead of the report.
    #[arg(long)]
    ron: bool,
}

fn main() {
    init_logging();
    let args = Args::parse();

    let case = match build_case(&args) {
        Ok(case) => case,
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    };

    if args.ron {
        match ron::ser::to_string_pretty(&case, ron::ser::PrettyConfig::default()) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("ERROR: failed to serialize case: {e}");
                process::exit(1);
            }
        }
        return;
    }

    print_report(&case);
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn build_case(args: &Args) -> Result<Case, CaseError> {
    let mut builder = Case::builder();
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    if let Some(n) = args.suspects {
        builder = builder.suspect_range(n..=n);
    }
    if let Some(path) = &args.trait_file {
        builder = builder.trait_catalog_path(path);
    }
    for path in &args.clue_files {
        builder = builder.clue_catalog_path(path);
    }
    builder.build()
}

fn print_report(case: &Case) {
    println!("=== Case (seed {}) ===\n", case.seed());

    print!("{:>4}", "#");
    for category in TraitCategory::ALL {
        print!(" {:>14}", category.name());
    }
    println!();
    for suspect in case.suspects() {
        let marker = if suspect.is_guilty() { "*" } else { " " };
        print!("{:>3}{marker}", suspect.index());
        for value in suspect.profile().traits() {
            print!(" {:>14}", value.label());
        }
        println!();
    }

    println!("\nFacts:");
    for (entry, standing) in case
        .combination()
        .entries
        .iter()
        .zip(case.combination().narrowing())
    {
        println!(
            "  {:<28} shared by {}  -> {}",
            entry.fact.to_string(),
            entry.holders,
            standing
        );
    }
    match case.combination().resolution {
        Resolution::Unique => println!("  resolves to the culprit alone"),
        Resolution::Ambiguous { remaining } => {
            println!("  AMBIGUOUS: {remaining} remain after every fact")
        }
    }
    if !case.dopplegangers().is_empty() {
        println!("  dopplegangers: {}", case.dopplegangers());
    }

    println!("\nClues:");
    for clue in &case.clues().clues {
        println!(
            "  {:<28} at {:<24} {}",
            clue.fact.to_string(),
            clue.template.location.tag(),
            clue.template.description
        );
    }
    if let Some(alibi) = case.clues().alibi {
        println!("  alibi check needed for {}", alibi.suspects);
    }

    let env = case.environment();
    println!("\nEnvironment:");
    for location in [
        Location::MurderWeapon,
        Location::VictimPhone,
        Location::VictimHouse,
        Location::Cctv,
        Location::Neighbor,
    ] {
        println!("  {:<24} inspect={}", location.tag(), env.can_inspect(location));
    }
    println!(
        "  present: weapon={} phone={} cctv={} neighbor={}",
        env.murder_weapon, env.victim_phone, env.cctv, env.neighbor
    );
    let houses: Vec<usize> = (0..case.suspects().len())
        .filter(|&i| env.can_inspect_house(i))
        .collect();
    println!("  searchable houses: {houses:?}");
    if let Some(routine) = env.victim_phone_routine {
        println!("  phone: {routine:?}, lock: {:?}", env.victim_phone_lock_routine);
    }
    if let Some(routine) = env.murder_weapon_routine {
        println!("  weapon: {routine:?}");
    }
}
