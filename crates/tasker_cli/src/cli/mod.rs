use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tasker", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasker add Buy milk
    Add { description: Vec<String> },
    /// Replace a task's description
    ///
    /// Example: tasker update 1 "Buy organic milk"
    Update {
        id: String,
        description: Vec<String>,
    },
    /// Change a task's status
    ///
    /// Statuses: to-do, in-progress, done, canceled, incomplete
    ///
    /// Example: tasker mark 1 done
    Mark { id: String, status: String },
    /// Delete a task
    ///
    /// Example: tasker delete 1
    Delete { id: String },
    /// List tasks, optionally only those with the given status
    ///
    /// Example: tasker list
    /// Example: tasker list in-progress
    List { status: Option<String> },
    /// Show how many tasks are done out of the total
    ///
    /// Example: tasker ratio
    Ratio,
    /// Count tasks completed in the last 24 hours
    ///
    /// Example: tasker recent
    #[command(alias = "last-24")]
    Recent,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn add_collects_description_words() {
        let cli = Cli::try_parse_from(["tasker", "add", "Buy", "milk"]).unwrap();
        match cli.command {
            Command::Add { description } => assert_eq!(description.join(" "), "Buy milk"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn last_24_is_an_alias_for_recent() {
        let cli = Cli::try_parse_from(["tasker", "last-24", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Recent));
        assert!(cli.json);
    }
}
