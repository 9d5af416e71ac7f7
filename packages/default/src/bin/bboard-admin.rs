use anyhow::{Context, Result};
use bboard::{
    config::debug_print_config,
    db::{run_migrations, validate_db_connection},
    models::{
        bbs::Bb,
        config::BboardConfig,
        registered_models,
        rubrics::{NewRubric, Rubric},
    },
    queries::{books, common, notes, rubrics},
};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Administrative commands for the bulletin board database.
#[derive(Parser)]
#[command(name = "bboard-admin", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending schema migrations
    Migrate,
    /// Verify configuration and database connectivity
    Check,
    /// List registered models with their verbose names
    Models,
    /// Manage rubrics
    Rubric {
        #[command(subcommand)]
        action: RubricAction,
    },
    /// Manage ads
    Bb {
        #[command(subcommand)]
        action: BbAction,
    },
    /// Manage books
    Book {
        #[command(subcommand)]
        action: BookAction,
    },
    /// Manage notes attached to any record
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
}

#[derive(Subcommand)]
enum RubricAction {
    Add { name: String },
    List,
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum BbAction {
    List,
}

#[derive(Subcommand)]
enum BookAction {
    /// Reorder an author's books; every book id must be listed once
    Reorder {
        author_id: i32,
        #[arg(required = true)]
        book_ids: Vec<i32>,
    },
}

#[derive(Subcommand)]
enum NoteAction {
    Add {
        /// Model name, e.g. `bb` or `book`
        model: String,
        object_id: i32,
        content: String,
    },
    List {
        model: String,
        object_id: i32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Listing models needs no database.
    if let Command::Models = cli.command {
        print_models();
        return Ok(());
    }

    let cfg = BboardConfig::load()?;
    debug_print_config(&cfg);
    let pool = cfg.db_pool().await?;

    run(cli.command, &pool).await
}

fn print_models() {
    for model in registered_models() {
        println!(
            "{:<12} {:<16} {} / {}",
            model.model, model.table, model.verbose_name, model.verbose_name_plural
        );
        for (field, label) in model.field_labels {
            println!("    {field:<14} {label}");
        }
    }
}

async fn run(command: Command, pool: &PgPool) -> Result<()> {
    match command {
        Command::Migrate => run_migrations(pool).await?,
        Command::Check => {
            validate_db_connection(pool).await?;
            info!("✅ configuration and database connection are valid");
        }
        Command::Models => print_models(),
        Command::Rubric { action } => match action {
            RubricAction::Add { name } => {
                let rubric = rubrics::insert_rubric(pool, &NewRubric::new(name)).await?;
                println!("{}\t{}", rubric.id, rubric);
            }
            RubricAction::List => {
                for rubric in common::list::<Rubric>(pool).await? {
                    println!("{}\t{}", rubric.id, rubric);
                }
            }
            RubricAction::Delete { id } => {
                common::delete::<Rubric>(pool, id)
                    .await
                    .with_context(|| format!("deleting rubric {id}"))?;
            }
        },
        Command::Bb { action } => match action {
            BbAction::List => {
                for bb in common::list::<Bb>(pool).await? {
                    let kind = bb.kind.map(|k| k.label()).unwrap_or("-");
                    let price = bb.price.map(|p| p.to_string()).unwrap_or_default();
                    println!("{}\t{}\t{}\t{}\t{}", bb.id, bb.published, kind, bb.title, price);
                }
            }
        },
        Command::Book { action } => match action {
            BookAction::Reorder {
                author_id,
                book_ids,
            } => {
                books::set_book_order(pool, author_id, &book_ids).await?;
            }
        },
        Command::Note { action } => match action {
            NoteAction::Add {
                model,
                object_id,
                content,
            } => {
                let note = notes::add_note_by_model(pool, &model, object_id, &content).await?;
                println!("{}", note.id);
            }
            NoteAction::List { model, object_id } => {
                for note in notes::list_notes_by_model(pool, &model, object_id).await? {
                    println!("{}\t{}", note.id, note.content);
                }
            }
        },
    }
    Ok(())
}
