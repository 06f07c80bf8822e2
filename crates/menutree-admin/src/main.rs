//! Menutree Admin CLI
//!
//! Operator tooling for the restaurant admin surfaces:
//! - List restaurants in a seed catalog
//! - Delete a restaurant through the two-field confirmation
//! - Preview the header for a given session

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use menutree_admin::{
    AdminConfig, ConsoleNotifier, DeleteRestaurantDialog, HeaderView,
    InMemoryRestaurantDirectory, RestaurantDirectory,
};
use menutree_confirm::{GateHandle, SubmitOutcome};
use menutree_types::{RestaurantId, SessionContext, SessionUser, UserId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Menutree admin CLI
#[derive(Parser)]
#[command(name = "menutree-admin")]
#[command(about = "Menutree - restaurant admin tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MENUTREE_CONFIG")]
    config: Option<String>,

    /// Restaurant catalog (JSON array), overrides the configured path
    #[arg(long)]
    catalog: Option<String>,

    /// Log level (overrides configuration)
    #[arg(long, env = "MENUTREE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List restaurants in the catalog
    List,

    /// Delete a restaurant after typed confirmation
    Delete {
        /// Restaurant ID
        id: String,
    },

    /// Show what the header renders for a session
    Header {
        /// Signed-in user id; anonymous when omitted
        #[arg(long)]
        user: Option<String>,

        /// Display name of the signed-in user
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AdminConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = Some(catalog.into());
    }

    // Initialize tracing
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.into());

    if cli.json || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
    }

    match cli.command {
        Commands::List => {
            let directory = load_directory(&config).await?;
            print_restaurants(&directory).await
        }
        Commands::Delete { id } => {
            let id: RestaurantId = id.parse()?;
            let directory = load_directory(&config).await?;
            delete_restaurant(&config, directory, id).await
        }
        Commands::Header { user, name } => {
            let session = match user {
                Some(id) => {
                    let mut user = SessionUser::new(UserId::new(id));
                    if let Some(name) = name {
                        user = user.with_name(name);
                    }
                    SessionContext::signed_in(user)
                }
                None => SessionContext::anonymous(),
            };
            let view = HeaderView::for_session(&session);
            println!("{}", serde_json::to_string_pretty(&view)?);
            Ok(())
        }
    }
}

async fn load_directory(config: &AdminConfig) -> anyhow::Result<Arc<InMemoryRestaurantDirectory>> {
    let directory = match &config.catalog.path {
        Some(path) => InMemoryRestaurantDirectory::from_catalog_file(path)
            .await
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => InMemoryRestaurantDirectory::new(),
    };
    Ok(Arc::new(directory))
}

async fn print_restaurants(directory: &InMemoryRestaurantDirectory) -> anyhow::Result<()> {
    let restaurants = directory.list_restaurants().await?;
    if restaurants.is_empty() {
        println!("{}", "No restaurants".dimmed());
    }
    for restaurant in restaurants {
        println!("{}  {}", restaurant.id.to_string().dimmed(), restaurant.name);
    }
    Ok(())
}

async fn delete_restaurant(
    config: &AdminConfig,
    directory: Arc<InMemoryRestaurantDirectory>,
    id: RestaurantId,
) -> anyhow::Result<()> {
    let Some(restaurant) = directory.get_restaurant(&id).await? else {
        bail!("restaurant not found: {id}");
    };

    let dialog = DeleteRestaurantDialog::new(
        restaurant,
        directory.clone(),
        Arc::new(ConsoleNotifier::new()),
        config.confirmation.clone(),
    );

    let copy = dialog.copy();
    println!("{}", copy.title.bold());
    println!("{}\n", copy.description);

    let gate = dialog.open();
    loop {
        prompt_inputs(&gate, &copy.name_label, &copy.phrase_label)?;

        match gate.submit().await {
            SubmitOutcome::Confirmed => break,
            SubmitOutcome::Rejected(_) => {
                let view = gate.view();
                for message in view.name_error.iter().chain(view.phrase_error.iter()) {
                    println!("{}", message.yellow());
                }
            }
            SubmitOutcome::Failed(_) => {
                // Typed values are kept; retrying resubmits them as-is.
                while ask("Retry?")? {
                    if gate.submit().await.is_confirmed() {
                        break;
                    }
                }
                if gate.is_open() {
                    gate.cancel();
                }
                break;
            }
            SubmitOutcome::Ignored(reason) => bail!("confirmation not accepted: {reason}"),
        }

        if !ask("Try again?")? {
            gate.cancel();
            println!("{}", "Aborted".dimmed());
            break;
        }
    }

    print_restaurants(&directory).await
}

fn prompt_inputs(gate: &GateHandle, name_label: &str, phrase_label: &str) -> anyhow::Result<()> {
    let view = gate.view();
    let name: String = dialoguer::Input::new()
        .with_prompt(name_label)
        .with_initial_text(view.typed_name)
        .allow_empty(true)
        .interact_text()?;
    gate.update_typed_name(name);

    let phrase: String = dialoguer::Input::new()
        .with_prompt(phrase_label)
        .with_initial_text(view.typed_phrase)
        .allow_empty(true)
        .interact_text()?;
    gate.update_typed_phrase(phrase);
    Ok(())
}

fn ask(prompt: &str) -> anyhow::Result<bool> {
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
