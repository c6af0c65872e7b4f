use backend::config::db::DbKind;
use backend::infra::db::connect_db;
use clap::{Parser, ValueEnum};
use migration::MigrationCommand;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

/// Runs schema migrations against the PostgreSQL database described by the
/// `POSTGRES_*` environment variables. In-memory SQLite is not offered: each
/// invocation would migrate a database that vanishes on exit.
#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "User registry database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,backend=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let conn = match connect_db(DbKind::Postgres).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    let command: MigrationCommand = args.command.into();
    if let Err(e) = migration::migrate(&conn, command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
    tracing::info!(?command, "done");
}
