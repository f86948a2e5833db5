//! Command-line front end for a `PostgreSQL`-backed task board.
//!
//! Usage:
//!
//! ```text
//! taskboard [--config taskboard.yaml] [--verbose] <command>
//! ```
//!
//! `show` prints the three columns with due-date labels and board
//! statistics. `add` creates a task at the end of its column, `move` drops
//! a task onto a column or another task, and `prioritize` sends the
//! visible in-progress tasks to the summarizer.
//! Connection settings come from the YAML file and the `DATABASE_URL`,
//! `TASKBOARD_OWNER_ID`, `TASKBOARD_SUMMARIZER_URL` and
//! `TASKBOARD_SUMMARIZER_KEY` environment variables.

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use mockable::{Clock, DefaultClock};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc,
};
use taskboard::{
    board::{
        adapters::{
            http::HttpTaskSummarizer,
            postgres::{PostgresCategoryStore, PostgresTaskStore},
        },
        domain::{CategoryId, DropTarget, DueDateLabel, OwnerId, Priority, TaskId, TaskStatus},
        services::{BoardController, DragOutcome, PrioritizationService, TaskDraft},
    },
    config::BoardConfig,
};
use tracing_subscriber::{EnvFilter, fmt};

type Controller = BoardController<PostgresTaskStore, PostgresCategoryStore, DefaultClock>;

#[derive(Parser)]
#[command(name = "taskboard", author, version, about = "Kanban task board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board
    Show(FilterArgs),

    /// Create a task at the end of its column
    Add(AddArgs),

    /// Drop a task onto a column (`todo`, `in_progress`, `done`) or another task
    Move {
        /// Task to move
        task: TaskId,
        /// Column name or task identifier
        target: DropTarget,
    },

    /// Ask the summarizer to rank the visible in-progress tasks
    Prioritize(FilterArgs),
}

#[derive(Parser, Clone)]
struct AddArgs {
    /// Task title
    title: String,

    /// Longer description
    #[arg(short, long, default_value = "")]
    description: String,

    /// Column: `todo`, `in_progress` or `done`
    #[arg(long, default_value = "todo")]
    status: TaskStatus,

    /// Priority: `low`, `medium` or `high`
    #[arg(short, long, default_value = "medium")]
    priority: Priority,

    /// Category identifier
    #[arg(long)]
    category: Option<CategoryId>,

    /// Due date as RFC 3339, e.g. `2025-03-10T17:00:00Z`
    #[arg(long)]
    due: Option<DateTime<Utc>>,
}

impl AddArgs {
    fn into_draft(self) -> TaskDraft {
        let draft = TaskDraft::new(self.title)
            .with_description(self.description)
            .with_status(self.status)
            .with_priority(self.priority);
        let categorized = match self.category {
            Some(category) => draft.with_category(category),
            None => draft,
        };
        match self.due {
            Some(due) => categorized.with_due_date(due),
            None => categorized,
        }
    }
}

#[derive(Parser, Clone, Default)]
struct FilterArgs {
    /// Only show tasks whose title or description contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Only show tasks in this category
    #[arg(long)]
    category: Option<CategoryId>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("taskboard=debug")
    } else {
        EnvFilter::new("taskboard=warn")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    let config = load_config(cli.config.as_deref())?;
    let mut controller = connect(&config)?;
    controller
        .load()
        .await
        .context("failed to load the board")?;

    match cli.command {
        Commands::Show(args) => {
            apply_filter(&mut controller, args);
            show(&controller)
        }
        Commands::Add(args) => add_task(&mut controller, args.into_draft()).await,
        Commands::Move { task, target } => move_task(&mut controller, task, target).await,
        Commands::Prioritize(args) => {
            apply_filter(&mut controller, args);
            prioritize(&controller, &config).await
        }
    }
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<BoardConfig> {
    let config = match config_path {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    }
    .with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

fn connect(config: &BoardConfig) -> anyhow::Result<Controller> {
    let Some(database_url) = config.database_url.as_deref() else {
        bail!("no database configured; set DATABASE_URL or database_url");
    };
    let Some(owner) = config.owner_id else {
        bail!("no board owner configured; set TASKBOARD_OWNER_ID or owner_id");
    };
    let owner_id = OwnerId::from_uuid(owner);

    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = Pool::builder()
        .build(manager)
        .context("failed to build PostgreSQL connection pool")?;

    Ok(BoardController::new(
        Arc::new(PostgresTaskStore::new(pool.clone(), owner_id)),
        Arc::new(PostgresCategoryStore::new(pool, owner_id)),
        Arc::new(DefaultClock),
        owner_id,
    )
    .with_celebration_duration(config.celebration_duration()))
}

fn apply_filter(controller: &mut Controller, args: FilterArgs) {
    if let Some(query) = args.search {
        controller.set_search_query(query);
    }
    controller.set_category_filter(args.category);
}

fn show(controller: &Controller) -> anyhow::Result<()> {
    let now = DefaultClock.utc();
    let mut out = io::stdout().lock();

    for status in TaskStatus::ALL {
        let column = controller.column(status);
        writeln!(out, "{} ({})", status.title(), column.len())?;
        for task in column {
            let category = controller
                .category_of(task)
                .map(|category| format!(" [{}]", category.name()))
                .unwrap_or_default();
            let due = task
                .due_date()
                .map(|due| format!(" - {}", DueDateLabel::classify(due, now)))
                .unwrap_or_default();
            writeln!(
                out,
                "  {} {} ({}){category}{due}",
                task.id(),
                task.title(),
                task.priority().as_str()
            )?;
        }
    }

    let stats = controller.stats();
    writeln!(
        out,
        "\n{} tasks, {} in progress, {} done, {}% complete",
        stats.total, stats.in_progress, stats.done, stats.completion_rate
    )?;
    Ok(())
}

async fn add_task(controller: &mut Controller, draft: TaskDraft) -> anyhow::Result<()> {
    let created = controller
        .create_task(draft)
        .await
        .context("failed to create task")?;
    writeln!(
        io::stdout().lock(),
        "created {} in {} at position {}",
        created.id(),
        created.status(),
        created.position()
    )?;
    Ok(())
}

async fn move_task(
    controller: &mut Controller,
    task: TaskId,
    target: DropTarget,
) -> anyhow::Result<()> {
    if controller.begin_drag(task).is_none() {
        bail!("task {task} is not on this board");
    }
    let outcome = controller.complete_drag(task, Some(target)).await;
    let mut out = io::stdout().lock();
    match outcome {
        DragOutcome::Persisted(placement) => {
            writeln!(
                out,
                "moved {} to {} at position {}",
                placement.task_id, placement.status, placement.position
            )?;
            if controller.celebration_visible() {
                writeln!(out, "Task complete!")?;
            }
            Ok(())
        }
        DragOutcome::Unchanged => {
            writeln!(out, "nothing to move")?;
            Ok(())
        }
        DragOutcome::Ignored => bail!("drop target {target:?} could not be resolved"),
        DragOutcome::RolledBack { error, .. } => {
            Err(anyhow::Error::new(error).context("move was not saved; board reloaded"))
        }
    }
}

async fn prioritize(controller: &Controller, config: &BoardConfig) -> anyhow::Result<()> {
    let Some(candidates) = controller.prioritization_candidates() else {
        bail!("no in-progress tasks to prioritize");
    };

    let summarizer = HttpTaskSummarizer::from_config(&config.summarizer)?;
    let service = PrioritizationService::new(Arc::new(summarizer));
    let report = service.prioritize(&candidates).await;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", report.text)?;
    if report.succeeded {
        writeln!(out, "\n({} tasks analysed)", report.task_count)?;
        Ok(())
    } else {
        bail!("prioritization failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn parsed_draft(args: &[&str]) -> TaskDraft {
        let cli = Cli::try_parse_from(args).expect("arguments parse");
        let Commands::Add(add) = cli.command else {
            panic!("expected the add command");
        };
        add.into_draft()
    }

    #[rstest]
    fn add_defaults_to_medium_todo_task() {
        assert_eq!(
            parsed_draft(&["taskboard", "add", "Water plants"]),
            TaskDraft::new("Water plants")
        );
    }

    #[rstest]
    fn add_carries_every_option_into_the_draft() {
        let category = CategoryId::new();
        let due = Utc
            .with_ymd_and_hms(2025, 3, 10, 17, 0, 0)
            .single()
            .expect("valid timestamp");
        let category_arg = category.to_string();

        let draft = parsed_draft(&[
            "taskboard",
            "add",
            "Book venue",
            "--description",
            "Seats 40",
            "--status",
            "in_progress",
            "--priority",
            "high",
            "--category",
            &category_arg,
            "--due",
            "2025-03-10T17:00:00Z",
        ]);

        assert_eq!(
            draft,
            TaskDraft::new("Book venue")
                .with_description("Seats 40")
                .with_status(TaskStatus::InProgress)
                .with_priority(Priority::High)
                .with_category(category)
                .with_due_date(due)
        );
    }

    #[rstest]
    fn add_rejects_unknown_priority() {
        assert!(Cli::try_parse_from(["taskboard", "add", "X", "--priority", "urgent"]).is_err());
    }
}
