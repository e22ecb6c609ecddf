use aqi_lookup::cli::{args::Args, commands};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // Cancel everything on CTRL+C; commands stop at their next checkpoint
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                    signal_token.cancel();
                }
                Err(e) => eprintln!("Failed to install CTRL+C signal handler: {}", e),
            }
        });

        commands::run(args, cancellation_token).await
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("AQI Lookup - AirNow Air Quality Tables");
    println!("======================================");
    println!();
    println!("Keep the AirNow reporting-area file, a ZIP code to reporting area table");
    println!("and a ZIP code database fresh in memory, and answer lookups against them.");
    println!();
    println!("USAGE:");
    println!("    aqi-lookup [OPTIONS] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    watch       Load every dataset, then keep refreshing until interrupted");
    println!("    lookup      Load the dataset a query needs and answer it");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>  JSON configuration file");
    println!("    -v, --verbose        Increase logging verbosity");
    println!("    -q, --quiet          Suppress output except errors");
    println!("    -h, --help           Show help information");
    println!("    -V, --version        Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Load all datasets once and print refresh statistics:");
    println!("    aqi-lookup -c config.json watch --once");
    println!();
    println!("    # Keep datasets fresh until CTRL+C:");
    println!("    aqi-lookup -c config.json watch");
    println!();
    println!("    # Tomorrow's forecast for a reporting area:");
    println!("    aqi-lookup lookup forecast \"Baton Rouge Area\" --offset-days 1");
    println!();
    println!("    # ZIP code of a city, as JSON:");
    println!("    aqi-lookup lookup --json zip Aibonito PR");
    println!();
    println!("For detailed help on any command, use:");
    println!("    aqi-lookup <COMMAND> --help");
}
