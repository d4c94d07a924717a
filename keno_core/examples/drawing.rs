use keno_core::{ProvablyFairRng, Session};

fn main() {
    // One four-spot card, two drawings, seeds committed up front.
    let seeds = ProvablyFairRng::new("example-server-seed", "example-client-seed", 1);
    let mut game = Session::with_rngs(100, seeds.rng(), seeds.next_nonce().rng());
    game.start_game(4, 2).expect("valid card");
    let picks = game.player_mut().quick_pick(4).expect("valid tier");

    while game.has_more_drawings() {
        let Some(outcome) = game.process_drawing(&picks, 5) else {
            println!("bet refused");
            break;
        };
        println!(
            "server_seed_hash={} drawing={} picks={:?} winning={:?} matched={:?} winnings={} balance={}",
            seeds.server_seed_hash_hex(),
            outcome.drawing,
            picks,
            outcome.winning_numbers,
            outcome.matched_numbers,
            outcome.winnings,
            outcome.balance
        );
    }
}
