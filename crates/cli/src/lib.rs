pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "dealerprice",
    about = "Dealer price catalog CLI",
    long_about = "Initialize the dealer catalog and look up advertised prices from the command line.",
    after_help = "Examples:\n  dealerprice init\n  dealerprice price Binglee Headphones\n  dealerprice prices Printer"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Create the dealers table and seed it if it does not exist yet")]
    Init,
    #[command(about = "Look up one dealer's price for a product")]
    Price {
        #[arg(help = "Dealer name (exact, case-sensitive)")]
        dealer: String,
        #[arg(help = "Product name (exact, case-sensitive)")]
        product: String,
    },
    #[command(about = "List every dealer's price for a product")]
    Prices {
        #[arg(help = "Product name (exact, case-sensitive)")]
        product: String,
    },
    #[command(about = "List products with the dealers that carry them")]
    Products,
    #[command(about = "Print the effective configuration")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Init => commands::init::run(),
        Command::Price { dealer, product } => commands::query::price(&dealer, &product),
        Command::Prices { product } => commands::query::prices(&product),
        Command::Products => commands::query::products(),
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
