use clap::Parser;
use clap::error::ErrorKind;
use planner_cli::cli::{Cli, Command};
use planner_core::config::{self, ConfigOverrides, Palette, palette_for_theme};
use planner_core::error::AppError;
use planner_core::model::{Task, TaskStatus};
use planner_core::storage::json_store::{self, TaskStore};
use planner_core::task_api::{self, TaskPlanner};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use time::Date;

const LOG_ENV_VAR: &str = "PLANNER_LOG";

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "P")]
    priority: u32,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "")]
    note: String,
}

fn task_row(task: &Task, today: Date, palette: &Palette) -> TaskRow {
    let overdue = task.is_overdue(today);
    let paint = |text: &str| {
        if overdue {
            palette.alertize(text)
        } else if task.status == TaskStatus::Done {
            palette.mutedize(text)
        } else {
            text.to_string()
        }
    };

    TaskRow {
        id: task.id,
        priority: task.priority,
        status: paint(task.status.label()),
        due: paint(task.due_date.as_deref().unwrap_or("-")),
        title: paint(&task.title),
        note: if overdue {
            palette.alertize("OVERDUE")
        } else {
            String::new()
        },
    }
}

fn print_tasks_plain(tasks: &[Task], today: Date, palette: &Palette) {
    if tasks.is_empty() {
        println!("No tasks yet. Add one with \"planner add 'Install add-in'\".");
        return;
    }

    let rows: Vec<TaskRow> = tasks
        .iter()
        .map(|task| task_row(task, today, palette))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::psql());
    println!("{table}");
}

fn task_json(task: &Task) -> serde_json::Value {
    serde_json::json!({
        "task_id": task.id,
        "title": task.title,
        "priority": task.priority,
        "status": task.status,
        "due_date": task.due_date,
    })
}

fn print_tasks_json(tasks: &[Task], today: Date) {
    let payload: Vec<serde_json::Value> = tasks
        .iter()
        .map(|task| {
            let mut value = task_json(task);
            value["overdue"] = serde_json::Value::Bool(task.is_overdue(today));
            value
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn print_task_json(task: &Task) {
    println!("{}", task_json(task));
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV_VAR, "warn"))
        .format_timestamp(None)
        .init();
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let loaded = config::load_config_with_fallback();
    let mut overrides = ConfigOverrides::default();
    for raw in &cli.config_override {
        overrides.apply(raw)?;
    }
    let config = config::merge_overrides(&loaded.config, &overrides);

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| json_store::store_path(&loaded.config, &overrides));
    log::debug!("using task store {}", store_path.display());
    let planner = TaskPlanner::new(TaskStore::new(store_path));

    match cli.command {
        Command::Add {
            title,
            priority,
            due_date,
        } => {
            let title = title.ok_or_else(|| AppError::invalid_input("title is required"))?;
            let priority = priority.unwrap_or_else(|| i64::from(config.default_priority()));

            let task = planner.add(&title, priority, due_date.as_deref())?;
            if cli.json {
                print_task_json(&task);
            } else {
                let due_text = task
                    .due_date
                    .as_deref()
                    .map(|due| format!(" due {due}"))
                    .unwrap_or_default();
                println!(
                    "Added task #{}: {} (priority {}){}",
                    task.id, task.title, task.priority, due_text
                );
            }
        }
        Command::List => {
            let today = task_api::today_local();
            let mut tasks = planner.list()?;
            task_api::sort_tasks(&mut tasks, today);
            if cli.json {
                print_tasks_json(&tasks, today);
            } else {
                let palette = palette_for_theme(config.theme.as_deref());
                print_tasks_plain(&tasks, today, &palette);
            }
        }
        Command::Complete { task_id } => {
            let task = planner.complete(task_id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Marked task #{} as done: {}", task.id, task.title);
            }
        }
        Command::Prioritize { task_id, priority } => {
            let task = planner.prioritize(task_id, priority)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Updated task #{} priority to {}", task.id, task.priority);
            }
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
