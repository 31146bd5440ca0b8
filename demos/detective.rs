/// Detective example: plays one case the way a player would.
///
/// Visits every open location, strikes out suspects whose traits contradict
/// what was found, checks alibis if the traits are not enough, then accuses.
///
/// Run with: cargo run --example detective [seed]

use mystery_case::core::case::Case;
use mystery_case::schema::location::Location;
use mystery_case::schema::suspect::SuspectSet;

fn main() {
    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok());
    let case = Case::new(seed);
    let env = case.environment();

    println!("Case #{}: {} suspects\n", case.seed(), case.suspects().len());

    let mut standing = SuspectSet::all(case.suspects().len());

    for location in Location::ALL {
        if !env.can_inspect(location) {
            continue;
        }
        for clue in case.clues().clues.iter().filter(|c| c.template.location == location) {
            let before = standing.len();
            standing = standing
                .iter()
                .filter(|&i| case[i].has(&clue.fact))
                .collect();
            println!(
                "[{}] {} => {} ({} -> {} suspects)",
                location.tag(),
                clue.template.description,
                clue.fact,
                before,
                standing.len()
            );
        }
    }

    if let Some(alibi) = case.clues().alibi {
        println!("\nThe evidence fits more than one person. Checking alibis...");
        for index in alibi.suspects.iter() {
            println!("  suspect #{index} was seen elsewhere that night");
            standing.remove(index);
        }
    }

    let accused = standing.iter().next();
    match accused {
        Some(index) if case.is_culprit(index) => {
            println!("\nSuspect #{index} is arrested. Case closed.")
        }
        Some(index) => println!("\nSuspect #{index} is arrested, but the real killer walks free."),
        None => println!("\nNo one fits the evidence."),
    }
}
