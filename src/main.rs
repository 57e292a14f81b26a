use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use lumine::api::{self, AppState};
use lumine::commands::CommandHandler;
use lumine::config::ServerConfig;
use lumine::food::api::{RecipeService, SpoonacularClient};
use lumine::food::config::FoodConfig;
use lumine::food::session::Session;
use lumine::FoodError;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Lumine, your culinary adventure in the terminal", long_about = None)]
struct Args {
    /// Spoonacular API key; asked for interactively when omitted
    #[arg(short, long)]
    api_key: Option<String>,

    /// Serve the HTTP API instead of the interactive session
    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize colored output
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let default_level = if args.api { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = FoodConfig::from_env().map_err(|e| anyhow!(e))?;

    if args.api {
        run_api_server(&args, config).await
    } else {
        run_cli_mode(&args, config).await
    }
}

fn print_welcome() {
    println!("\n{}", "Welcome to Lumine🌟".bright_yellow().bold());
    println!("{}\n", "Before we start, let's get your Secret Ingredient! 🥄".bold());
    println!("To start your culinary adventure, follow these steps to get your secret ingredient (API Key):\n");
    println!("  1. 🍽️ Visit the Spoonacular Website: https://spoonacular.com/food-api");
    println!("  2. 🍳 Click on \"Start\" in the top right corner.");
    println!("  3. 📝 Sign up using your email and password.");
    println!("  4. 📧 Check your email inbox and verify your account.");
    println!("  5. 🔑 Log in to Spoonacular.");
    println!("  6. 👤 Navigate to your profile, click \"Show / Hide API key\", copy your key, and paste it below.\n");
}

fn print_key_help(error: &FoodError) {
    println!(
        "{}",
        "Oops! The Secret Ingredient (API Key) might be incorrect, or you've stirred up too many requests today. \
Please double-check your key or try again tomorrow. 🍲"
            .red()
    );
    println!("{}", error.to_string().red());
    if error.is_key_problem() {
        println!("\n{}", "API Quota Information 🔑".bold());
        println!("  1. 🛒 Upgrade Your Plan: https://spoonacular.com/food-api/pricing");
        println!("  2. 🌟 Patience is a Virtue: continue with the free plan tomorrow without changing your key.");
        println!("  3. 📝 Start Fresh: create a new account and follow the API key setup steps again.\n");
    }
}

async fn open_session(api_key: &str, config: &FoodConfig) -> Result<Session, FoodError> {
    let client: Arc<dyn RecipeService> =
        Arc::new(SpoonacularClient::from_config(api_key.to_string(), config)?);
    let (session, status) = Session::open(client, config.clone()).await?;
    println!(
        "{} {}",
        "API key is valid. You can now use the application. 🍀".green(),
        format!("({} points left today)", status.quota_remaining).dimmed()
    );
    Ok(session)
}

/// Keeps asking until the key passes the validation probe.
async fn setup_session(
    args: &Args,
    config: &FoodConfig,
    rl: &mut Editor<(), DefaultHistory>,
) -> Result<Option<Session>> {
    if let Some(key) = &args.api_key {
        match open_session(key.trim(), config).await {
            Ok(session) => return Ok(Some(session)),
            Err(e) => print_key_help(&e),
        }
    } else {
        print_welcome();
    }

    loop {
        match rl.readline("🔒 Enter your Secret Ingredient (API Key): ") {
            Ok(line) => {
                let key = line.trim();
                if key.is_empty() {
                    continue;
                }
                match open_session(key, config).await {
                    Ok(session) => return Ok(Some(session)),
                    Err(e) => print_key_help(&e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err).context("failed to read API key"),
        }
    }
}

async fn run_cli_mode(args: &Args, config: FoodConfig) -> Result<()> {
    let mut rl = Editor::<(), DefaultHistory>::new()?;

    let Some(session) = setup_session(args, &config, &mut rl).await? else {
        println!("👋 Goodbye!");
        return Ok(());
    };

    println!("\n{}", "Lumine🌟 Your Culinary Adventure Awaits🍽️".bright_yellow().bold());
    let mut command_handler = CommandHandler::new(session);

    // Show initial help menu
    if let Err(e) = command_handler.handle_command("help").await {
        println!("{}", e.red());
    }

    // Main input loop
    loop {
        match rl.readline("👨‍🍳 ") {
            Ok(line) => {
                let input = line.trim();
                if !input.is_empty() {
                    let _ = rl.add_history_entry(input);
                }

                if let Err(e) = command_handler.handle_command(input).await {
                    println!("{}", e.red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

async fn run_api_server(args: &Args, config: FoodConfig) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    log::info!("Starting API server on {}", addr);

    let state = AppState::spoonacular(config, ServerConfig::from_env());
    let app = api::create_api(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    log::info!("Ready to accept connections on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
