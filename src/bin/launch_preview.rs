use clap::Parser;

use launchpad_gateway::models::LaunchParameters;
use launchpad_gateway::services::launch_service::build_preview;
use launchpad_gateway::utils::bonding_curve::cost_to_buy;
use launchpad_gateway::utils::format::{format_percent, format_sats, format_token_amount};

/// Print the bonding curve a launch would get, without contacting any service
#[derive(Parser, Debug)]
#[command(name = "launch_preview")]
struct Args {
    /// Initial token supply in base units
    #[arg(long)]
    supply: u128,

    /// Share of the supply sold before the pool graduates, in percent
    #[arg(long, default_value_t = 80)]
    threshold_pct: u8,

    /// Sats raised when the threshold is reached
    #[arg(long)]
    raise: u128,

    #[arg(long, default_value_t = 0)]
    decimals: u8,

    /// Number of intermediate points to print along the curve
    #[arg(long, default_value_t = 4)]
    steps: u128,
}

fn main() {
    let args = Args::parse();
    let params = LaunchParameters {
        initial_supply: args.supply,
        graduation_threshold_pct: args.threshold_pct,
        target_raise: args.raise,
    };

    let preview = match build_preview(&params, args.decimals) {
        Ok(preview) => preview,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let reserves = preview.reserves;

    println!("Virtual reserve A: {}", reserves.virtual_reserve_a);
    println!("Virtual reserve B: {}", reserves.virtual_reserve_b);
    println!("Threshold:         {} tokens", preview.display.threshold);
    println!("Raise at threshold: {}", preview.display.raise_at_graduation);
    if let Some(price) = &preview.display.initial_price {
        println!("Initial price:     {}", price);
    }
    if let Some(price) = &preview.display.graduation_price {
        println!("Graduation price:  {}", price);
    }

    println!("\nSold                    Cost");
    let steps = args.steps.max(1);
    for step in 1..=steps {
        let sold = match reserves.threshold.checked_mul(step) {
            Some(scaled) => scaled / steps,
            None => break,
        };
        match cost_to_buy(reserves.virtual_reserve_a, reserves.virtual_reserve_b, sold) {
            Ok(cost) => println!(
                "{:<22}  {} ({} of threshold)",
                format_token_amount(sold, args.decimals),
                format_sats(cost),
                format_percent(step as f64 * 100.0 / steps as f64)
            ),
            Err(e) => println!("{:<22}  {}", sold, e),
        }
    }
}
