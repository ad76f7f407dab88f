use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasker_core::error::AppError;
use tasker_core::model::{Ratio, Task, TaskStatus};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Updated")]
    updated: String,
    #[tabled(rename = "Completed")]
    completed: String,
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn display_time(value: Option<OffsetDateTime>, offset: UtcOffset) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    value
        .and_then(|at| at.to_offset(offset).format(&format).ok())
        .unwrap_or_else(|| "-".to_string())
}

fn task_table(tasks: &[Task]) -> String {
    let offset = local_offset();
    let rows = tasks.iter().map(|task| TaskRow {
        id: task.id,
        description: task.description.clone(),
        status: task.status.label(),
        created: display_time(Some(task.created_at), offset),
        updated: display_time(task.updated_at, offset),
        completed: display_time(task.completed_at, offset),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn print_status_group(status: TaskStatus, tasks: &[Task]) {
    println!("{}: {}", status.label(), tasks.len());
    if !tasks.is_empty() {
        println!("{}", task_table(tasks));
    }
}

/// Prints tasks grouped by status. `tasks` must already be in display order.
pub fn print_grouped(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("Tasks: 0");
        return;
    }

    for status in TaskStatus::ALL {
        let group: Vec<Task> = tasks
            .iter()
            .filter(|task| task.status == status)
            .cloned()
            .collect();
        if !group.is_empty() {
            print_status_group(status, &group);
        }
    }
}

pub fn print_ratio(ratio: &Ratio) {
    println!("{}/{} ({}%)", ratio.completed, ratio.total, ratio.percent);
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string(value).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{rendered}");
    Ok(())
}
