use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Subcommand;
use colored::*;
use taskboard_cli::commands::{tasks_table, Workspace};
use taskboard_cli::Config;
use taskboard_core::{TaskCategory, TaskCreateInput, TaskPriority, TaskStatus};
use taskboard_tasks::{FilterCriteria, TaskQuery, TaskSort};

#[derive(Subcommand)]
pub enum TasksCommands {
    /// Add a task for a user
    Add {
        /// Owner's username
        #[arg(short, long)]
        user: String,
        /// Task title
        #[arg(short, long)]
        title: String,
        /// low, medium, high or urgent
        #[arg(short, long)]
        priority: Option<TaskPriority>,
        /// work, personal, study, health, finance, shopping or other
        #[arg(short, long)]
        category: Option<TaskCategory>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        #[arg(short, long)]
        description: Option<String>,
        /// Username to assign the task to
        #[arg(long)]
        assignee: Option<String>,
    },
    /// List the tasks a user owns or is assigned
    List {
        #[arg(short, long)]
        user: String,
        /// pending, in-progress or completed
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Sort as field-order, e.g. dueDate-asc
        #[arg(long)]
        sort: Option<TaskSort>,
    },
}

pub fn handle_tasks_command(config: &Config, command: TasksCommands) -> Result<()> {
    let workspace = Workspace::open(config.storage_config())?;

    match command {
        TasksCommands::Add {
            user,
            title,
            priority,
            category,
            due,
            description,
            assignee,
        } => {
            let input = TaskCreateInput {
                title,
                description,
                priority,
                category,
                due_date: due,
                assignee_id: None,
            };
            let outcome = workspace.add_task(&user, assignee.as_deref(), input)?;
            println!("{} {}", "✓".green(), outcome.message);
            println!("  ID: {}", outcome.data.id.cyan());
            Ok(())
        }
        TasksCommands::List { user, status, sort } => {
            let query = TaskQuery {
                filter: status.map(FilterCriteria::status).unwrap_or_default(),
                sort: sort.unwrap_or_default(),
                ..TaskQuery::default()
            };
            let tasks = workspace.list_tasks(&user, &query)?;

            if tasks.is_empty() {
                println!("{}", format!("No tasks for {}", user).yellow());
                return Ok(());
            }

            println!("{}", format!("Tasks for {}", user).blue().bold());
            println!();
            println!("{}", tasks_table(&tasks, Local::now().date_naive()));
            println!("Total: {} tasks", tasks.len().to_string().cyan());
            Ok(())
        }
    }
}
