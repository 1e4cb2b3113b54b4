use crash_core::{summarize, RoundFormatter};

fn main() {
    // Example verification of a revealed server seed
    let server_seed = "example-server-seed";
    let formatter = RoundFormatter::default();
    let round = formatter.format_round(server_seed).expect("round");
    let history = formatter.previous_rounds(server_seed).expect("previous rounds");
    println!(
        "seed={} hash={} crash_point={}x",
        round.seed, round.hash, round.multiplier
    );
    println!("previous rounds: {:?}", summarize(&history).expect("summary"));
}
