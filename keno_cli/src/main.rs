use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use keno_core::{
    verify_draw, DrawingOutcome, PayoutTable, ProvablyFairRng, Session, SpotsTier, MAX_NUMBER,
    MIN_NUMBER,
};

#[derive(Parser)]
#[command(name = "keno", about = "Play keno cards in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PlayArgs {
    /// Spots on the card: 1, 4, 8 or 10
    #[arg(long)]
    spots: usize,
    /// Consecutive drawings to play the card for (1-4)
    #[arg(long, default_value_t = 1)]
    drawings: u32,
    /// Bet per drawing
    #[arg(long)]
    bet: u64,
    /// Comma separated picks; a quick pick is made when omitted
    #[arg(long, value_delimiter = ',')]
    numbers: Option<Vec<u8>>,
    /// Starting balance
    #[arg(long, env = "KENO_BALANCE", default_value_t = 100)]
    balance: u64,
    /// Seed for a reproducible card
    #[arg(long, env = "KENO_SEED")]
    seed: Option<u64>,
    /// Print each drawing as a JSON line
    #[arg(long)]
    json: bool,
    /// Write the card's drawing history to a CSV file
    #[arg(long)]
    export_csv: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one card of one to four drawings
    Play(PlayArgs),
    /// Show prize charts with odds
    Odds {
        #[arg(long)]
        spots: Option<usize>,
    },
    /// Print the rules of the game
    Rules,
    /// Check a published draw against its seeds
    Verify {
        #[arg(long)]
        server_seed: String,
        #[arg(long)]
        client_seed: String,
        #[arg(long)]
        nonce: u64,
        /// The twenty winning numbers, comma separated, in drawn order
        #[arg(long, value_delimiter = ',')]
        numbers: Vec<u8>,
    },
}

const RULES: &str = "\
1. Choose how many spots to play (1, 4, 8 or 10).
2. Choose how many drawings to play the card for (1 to 4).
3. Pick that many different numbers from 1 to 80, or take a quick pick.
4. Place a bet for each drawing; it comes out of your balance.
5. The house draws 20 numbers from 1 to 80.
6. You win according to how many of your numbers were drawn.
7. Play continues until every drawing on the card has been played.";

fn format_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Picks the UI would never offer: wrong count, repeats, off the board.
fn check_picks(spots: usize, numbers: &[u8]) -> anyhow::Result<()> {
    if numbers.len() != spots {
        bail!("a {spots} spot card needs {spots} numbers, got {}", numbers.len());
    }
    if let Some(n) = numbers
        .iter()
        .find(|n| !(MIN_NUMBER..=MAX_NUMBER).contains(*n))
    {
        bail!("{n} is not on the board ({MIN_NUMBER}-{MAX_NUMBER})");
    }
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[0] == w[1]) {
        bail!("numbers on a card must be different");
    }
    Ok(())
}

fn write_history<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    picks: &[u8],
    history: &[DrawingOutcome],
) -> anyhow::Result<()> {
    wtr.write_record([
        "ts",
        "drawing",
        "picks",
        "winning_numbers",
        "matched_numbers",
        "match_count",
        "bet",
        "winnings",
        "balance",
    ])?;
    let ts = Utc::now().to_rfc3339();
    for out in history {
        wtr.write_record(&[
            ts.clone(),
            out.drawing.to_string(),
            format_numbers(picks),
            format_numbers(&out.winning_numbers),
            format_numbers(&out.matched_numbers),
            out.match_count.to_string(),
            out.bet.to_string(),
            out.winnings.to_string(),
            out.balance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Plays the remaining drawings of the card. The history played so far is
/// written to `csv_out` even when a bet is refused partway through.
fn run_card<W: std::io::Write>(
    game: &mut Session,
    picks: &[u8],
    bet: u64,
    json: bool,
    csv_out: Option<&mut csv::Writer<W>>,
) -> anyhow::Result<Vec<DrawingOutcome>> {
    let mut history = Vec::with_capacity(game.total_drawings() as usize);
    let mut refused = false;
    while game.has_more_drawings() {
        let Some(outcome) = game.process_drawing(picks, bet) else {
            refused = true;
            break;
        };
        if json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            println!(
                "Drawing {}/{}: {}\n  matched {} ({}) -> won {}, balance {}",
                outcome.drawing,
                outcome.total_drawings,
                format_numbers(&outcome.winning_numbers),
                outcome.match_count,
                format_numbers(&outcome.matched_numbers),
                outcome.winnings,
                outcome.balance
            );
        }
        history.push(outcome);
    }

    if let Some(wtr) = csv_out {
        write_history(wtr, picks, &history)?;
        println!("Exported {} drawings", history.len());
    }
    if refused {
        bail!(
            "bet of {bet} refused with a balance of {}",
            game.player().balance()
        );
    }
    Ok(history)
}

fn play(args: PlayArgs) -> anyhow::Result<()> {
    let PlayArgs {
        spots,
        drawings,
        bet,
        numbers,
        balance,
        seed,
        json,
        export_csv,
    } = args;
    let mut game = match seed {
        Some(seed) => Session::seeded(balance, seed),
        None => Session::new(balance),
    };
    game.start_game(spots, drawings)?;

    let picks = match numbers {
        Some(numbers) => {
            check_picks(spots, &numbers)?;
            if !game.player_mut().select_numbers(&numbers)? {
                bail!("selection of {} numbers refused", numbers.len());
            }
            numbers
        }
        None => game.player_mut().quick_pick(spots)?,
    };
    debug!(?picks, "card ready");
    if !json {
        println!("Your numbers: {}", format_numbers(&picks));
    }

    let mut wtr = export_csv
        .as_deref()
        .map(|path| csv::Writer::from_path(path).with_context(|| format!("creating {path}")))
        .transpose()?;
    run_card(&mut game, &picks, bet, json, wtr.as_mut())?;

    if !json {
        println!(
            "Card finished: won {} in total, balance {}",
            game.total_winnings(),
            game.player().balance()
        );
    }
    info!(total_winnings = game.total_winnings(), "card complete");
    Ok(())
}

fn print_odds(table: &PayoutTable) {
    let summary = table.odds_summary();
    println!("{} SPOT GAME", summary.spots);
    for entry in table.entries().iter().rev() {
        println!(
            "  Match {:>2}: {:>7}x   p = {:.6}",
            entry.matches,
            entry.prize_multiplier,
            table.match_probability(entry.matches)
        );
    }
    println!(
        "  Overall odds: 1 in {:.2}   expected return: {:.4}",
        summary.overall_odds, summary.expected_return
    );
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args)?,
        Commands::Odds { spots } => {
            let tiers = match spots {
                Some(spots) => vec![SpotsTier::from_spots(spots)?],
                None => SpotsTier::ALL.iter().rev().copied().collect(),
            };
            for tier in tiers {
                print_odds(&PayoutTable::for_tier(tier));
                println!();
            }
        }
        Commands::Rules => println!("{RULES}"),
        Commands::Verify {
            server_seed,
            client_seed,
            nonce,
            numbers,
        } => {
            let seeds = ProvablyFairRng::new(server_seed, client_seed, nonce);
            println!("server_seed_hash={}", seeds.server_seed_hash_hex());
            if verify_draw(&seeds, &numbers) {
                println!("Draw verified.");
            } else {
                bail!("draw does not match the seeds");
            }
        }
    }

    Ok(())
}
