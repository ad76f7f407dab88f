mod cli;
mod logging;
mod render;

use clap::{CommandFactory, Parser};
use cli::{Cli, Command};
use std::io::{self, BufRead};
use tasker_core::error::AppError;
use tasker_core::model::TaskStatus;
use tasker_core::store::{TaskStore, sort_for_display};

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn report(err: &AppError) {
    eprintln!("ERROR: {} - {}", err.code(), err);
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn open_store() -> Result<TaskStore, AppError> {
    let mut store = TaskStore::open_default()?;
    tracing::debug!(path = %store.path().display(), "opening task store");
    store.init()?;
    Ok(store)
}

fn run_command(cli: Cli, store: &mut TaskStore) -> Result<(), AppError> {
    match cli.command {
        Command::Add { description } => {
            let task = store.add_task(&description.join(" "))?;
            if cli.json {
                render::print_json(&task)?;
            } else {
                println!("Task added successfully (ID: {})", task.id);
            }
        }
        Command::Update { id, description } => {
            let task = store.update_task(&id, &description.join(" "))?;
            if cli.json {
                render::print_json(&task)?;
            } else {
                println!("Task updated successfully (ID: {})", task.id);
            }
        }
        Command::Mark { id, status } => {
            let task = store.update_status(&id, &status)?;
            if cli.json {
                render::print_json(&task)?;
            } else {
                println!("Task status updated successfully (ID: {})", task.id);
            }
        }
        Command::Delete { id } => {
            let task = store.delete_task(&id)?;
            if cli.json {
                render::print_json(&task)?;
            } else {
                println!(
                    "Task deleted successfully (ID: {}): {}",
                    task.id, task.description
                );
            }
        }
        Command::List { status: None } => {
            let mut tasks = store.all_tasks()?;
            sort_for_display(&mut tasks);
            if cli.json {
                render::print_json(&tasks)?;
            } else {
                render::print_grouped(&tasks);
            }
        }
        Command::List {
            status: Some(status),
        } => {
            let status: TaskStatus = status.parse()?;
            let tasks = store.tasks_by_status(status.as_str())?;
            if cli.json {
                render::print_json(&tasks)?;
            } else {
                render::print_status_group(status, &tasks);
            }
        }
        Command::Ratio => {
            let ratio = store.ratio()?;
            if cli.json {
                render::print_json(&ratio)?;
            } else {
                render::print_ratio(&ratio);
            }
        }
        Command::Recent => {
            let count = store.completed_last_24_hours()?;
            if cli.json {
                render::print_json(&serde_json::json!({ "completedLast24Hours": count }))?;
            } else {
                println!("{count}");
            }
        }
    }

    Ok(())
}

fn run_interactive(store: &mut TaskStore) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::invalid_data(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                report(&err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasker".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) if !err.use_stderr() => {
                println!("{err}");
                continue;
            }
            Err(err) => {
                report(&normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli, store) {
            report(&err);
        }
    }

    Ok(())
}

fn main() {
    logging::init_logging();

    let mut args = std::env::args_os();
    args.next();
    let interactive = args.next().is_none();

    let cli = if interactive {
        None
    } else {
        match Cli::try_parse() {
            Ok(cli) => Some(cli),
            Err(err) if !err.use_stderr() => err.exit(),
            Err(err) => {
                report(&normalize_parse_error(err));
                std::process::exit(1);
            }
        }
    };

    let mut store = match open_store() {
        Ok(store) => store,
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    };

    let result = match cli {
        Some(cli) => run_command(cli, &mut store),
        None => run_interactive(&mut store),
    };

    if let Err(err) = result {
        report(&err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::split_command_line;

    #[test]
    fn split_command_line_honours_quotes() {
        let args = split_command_line("add \"buy milk\" today").unwrap();
        assert_eq!(args, vec!["add", "buy milk", "today"]);
    }

    #[test]
    fn split_command_line_keeps_escaped_quotes() {
        let args = split_command_line(r#"update 1 "say \"hi\"""#).unwrap();
        assert_eq!(args, vec!["update", "1", "say \"hi\""]);
    }

    #[test]
    fn split_command_line_rejects_unterminated_quote() {
        let err = split_command_line("add \"oops").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }
}
