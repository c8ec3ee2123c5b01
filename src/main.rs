use clap::{Parser, Subcommand};

mod billing;
mod cmd;
mod input;
mod money;

#[derive(Parser, Debug)]
#[command(name = "gymbill", version, author)]
#[command(about = "Billing for supplements, personal training and group classes")]
struct Opts {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record services interactively from a numbered menu (default)
    Session(cmd::session::SessionCommand),
    /// Record a batch of items from a file and print the billing history
    Report(cmd::report::ReportCommand),
    /// Print the expected batch input format
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Some(Command::Session(session)) => session.exec(),
        Some(Command::Report(report)) => report.exec(),
        Some(Command::Schema(schema)) => schema.exec(),
        None => cmd::session::SessionCommand::default().exec(),
    }
}
