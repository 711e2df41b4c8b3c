//! Library desk - command line front end
//!
//! Catalog maintenance and advanced search against a library service.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_desk::{
    config::AppConfig,
    models::{AccessionNumber, BookDraft, BooleanOperator, SearchField},
    services::{search::SearchOutcome, Services},
    views, AppState,
};

#[derive(Parser, Debug)]
#[command(
    name = "library-desk",
    about = "Library catalog maintenance and advanced search",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
struct Cli {
    /// Library service origin, overrides configuration
    #[arg(long, global = true)]
    service_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Catalog maintenance
    #[command(subcommand)]
    Books(BookCommands),
    /// Two-condition boolean search, optionally reserving result rows
    Search(SearchArgs),
    /// Reserved books kept by this client
    #[command(subcommand)]
    Reservations(ReservationCommands),
}

#[derive(Subcommand, Debug)]
enum BookCommands {
    /// List the full catalog
    List,
    /// Create a record
    Add(BookFields),
    /// Update the record with the given accession number
    Edit {
        #[arg(value_name = "ACCESSION_NUMBER")]
        target: String,
        #[command(flatten)]
        fields: BookFields,
    },
}

#[derive(Args, Debug, Default)]
struct BookFields {
    #[arg(long)]
    accession_number: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    publisher: Option<String>,
    /// ISBN or ISSN
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// available, borrowed, or any other status the service uses
    #[arg(long)]
    status: Option<String>,
}

impl BookFields {
    /// Overlay the provided values onto a form draft
    fn apply(self, draft: &mut BookDraft) {
        if let Some(input) = self.accession_number {
            // keep the record's own token when the input names it
            let unchanged = draft
                .accession_number
                .as_ref()
                .is_some_and(|current| current.matches_input(&input));
            if !unchanged {
                draft.accession_number = Some(AccessionNumber::from_input(&input));
            }
        }
        let overrides = [
            (self.title, &mut draft.title),
            (self.author, &mut draft.author),
            (self.publisher, &mut draft.publisher),
            (self.isbn, &mut draft.isbn),
            (self.category, &mut draft.category),
            (self.status, &mut draft.status),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// First field: title, author, accession, publisher, isbn, category
    #[arg(long)]
    field1: Option<SearchField>,
    #[arg(long)]
    expression1: Option<String>,
    /// AND, OR or NOT
    #[arg(long)]
    operator: Option<BooleanOperator>,
    #[arg(long)]
    field2: Option<SearchField>,
    #[arg(long)]
    expression2: Option<String>,
    /// Reserve the result at this row (repeatable)
    #[arg(long)]
    reserve: Vec<usize>,
}

#[derive(Subcommand, Debug)]
enum ReservationCommands {
    List,
    Remove { accession_number: String },
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(url) = cli.service_url.clone() {
        config.service.base_url = url;
    }

    init_tracing(&config);
    tracing::debug!("Starting library-desk v{}", env!("CARGO_PKG_VERSION"));

    let services = Services::from_config(&config).await?;
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    match cli.command {
        Commands::Books(command) => run_books(&state, command).await,
        Commands::Search(args) => run_search(&state, args).await,
        Commands::Reservations(command) => run_reservations(&state, command).await,
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_desk={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_books(state: &AppState, command: BookCommands) -> anyhow::Result<()> {
    let mut catalog = state.services.catalog().await;

    let outcome = match command {
        BookCommands::List => {
            println!("{}", views::render_catalog(catalog.books()));
            return Ok(());
        }
        BookCommands::Add(fields) => {
            let mut draft = catalog.form();
            fields.apply(&mut draft);
            catalog.submit_draft(draft).await?
        }
        BookCommands::Edit { target, fields } => {
            if catalog.select_by_accession(&target).is_none() {
                bail!("No book with accession number {}", target);
            }
            let mut draft = catalog.form();
            fields.apply(&mut draft);
            catalog.submit_draft(draft).await?
        }
    };

    if !outcome.is_success() {
        bail!("Book submission {:?}", outcome);
    }
    println!("{}", views::render_catalog(catalog.books()));
    Ok(())
}

async fn run_search(state: &AppState, args: SearchArgs) -> anyhow::Result<()> {
    let mut form = state.services.search();
    form.set_first(args.field1, args.expression1.unwrap_or_default());
    form.set_second(args.field2, args.expression2.unwrap_or_default());
    form.set_operator(args.operator);

    match form.submit().await {
        SearchOutcome::Matched(0) => println!("No books found"),
        SearchOutcome::Matched(_) => println!("{}", views::render_results(&form.rows())),
        _ => bail!("{}", form.error()),
    }

    if args.reserve.is_empty() {
        return Ok(());
    }
    form.reserve_rows(&args.reserve)?;
    for row in &args.reserve {
        println!("Reserved row {}", row);
    }
    save_reservations(state).await
}

async fn run_reservations(state: &AppState, command: ReservationCommands) -> anyhow::Result<()> {
    let reservations = &state.services.reservations;
    match command {
        ReservationCommands::List => {
            println!("{}", views::render_catalog(&reservations.reserved_books()));
            Ok(())
        }
        ReservationCommands::Remove { accession_number } => {
            let key = reservations
                .reserved_books()
                .into_iter()
                .filter_map(|b| b.accession_number)
                .find(|a| a.matches_input(&accession_number))
                .with_context(|| format!("No reservation for {}", accession_number))?;
            reservations.remove(&key);
            save_reservations(state).await
        }
        ReservationCommands::Clear => {
            reservations.clear();
            save_reservations(state).await
        }
    }
}

async fn save_reservations(state: &AppState) -> anyhow::Result<()> {
    let path = Path::new(&state.config.reservations.path);
    state
        .services
        .reservations
        .save(path)
        .await
        .with_context(|| format!("Failed to save reservations to {}", path.display()))
}
