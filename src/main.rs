//! Proxy Latency Bench - Main CLI Application

use clap::Parser;
use proxy_latency_bench::{
    cli::Cli,
    config::{ConfigParser, EnvManager},
    error::{AppError, Result},
    App, PKG_DESCRIPTION, PKG_NAME, VERSION,
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    if let Err(e) = run_application(cli).await {
        eprintln!("Error: {}", e);
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    cli.validate().map_err(AppError::validation)?;

    if cli.print_env_example {
        print!("{}", EnvManager::create_example_env_content());
        return Ok(());
    }

    if cli.debug {
        eprintln!("{} v{} - {}", PKG_NAME, VERSION, PKG_DESCRIPTION);
    }

    let parser = ConfigParser::new(cli);
    let config = parser.parse()?;
    let env_file_warnings = parser.env_file_warnings()?;

    App::new(config)
        .with_env_file_warnings(env_file_warnings)
        .run()
        .await?;
    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    eprintln!();
    eprintln!("{}", error.user_friendly_message());

    if matches!(error, AppError::Config(_) | AppError::Validation(_)) {
        eprintln!();
        eprintln!("Configuration help:");
        eprintln!("  - Check your .env file format (see --print-env-example)");
        eprintln!("  - URLs must start with http:// or https://");
        eprintln!("  - --iterations must be 1-10000, --requests 1-100000");
    }
}
