//! Ocean Explorer entry point
//!
//! Native builds run a small command-line front end over a file-backed
//! progression store. The web build is driven from JavaScript through
//! `platform::web::Explorer`.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::{Parser, Subcommand};

    use ocean_explorer::consts::DEFAULT_DATA_DIR;
    use ocean_explorer::platform::FileStore;
    use ocean_explorer::{Catalog, LocationStatus, Progression, SaveSlot};

    #[derive(Debug, Parser)]
    #[command(name = "ocean-explorer", version, about = "Track progress through the Ocean Explorer journey")]
    pub struct Cli {
        /// Directory holding saved progress
        #[arg(long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        #[command(subcommand)]
        command: Option<Command>,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Show every location and its state
        Status,
        /// Mark a location as finished
        Complete { id: String },
        /// Check whether an entry point may be visited
        Enter { entry_point: String },
        /// Print where a visit to a location starts
        Open { id: String },
        /// Forget all progress
        Reset,
    }

    fn print_status(progression: &Progression<FileStore>) {
        for location in progression.locations() {
            let marker = match location.status() {
                LocationStatus::Completed => "✓",
                LocationStatus::Available => "→",
                LocationStatus::Locked => "🔒",
            };
            println!(
                "{} {} {:<12} [{}] {}",
                marker,
                location.display_icon,
                location.name,
                location.id,
                location.status().as_str()
            );
        }
        let progress = progression.progress();
        println!("{}/{} completed", progress.completed, progress.total);
    }

    pub fn run(cli: Cli) -> ExitCode {
        log::info!("Using data directory {}", cli.data_dir.display());
        let slot = SaveSlot::with_default_key(FileStore::new(&cli.data_dir));
        let mut progression = Progression::load(Catalog::ocean(), slot);

        match cli.command.unwrap_or(Command::Status) {
            Command::Status => print_status(&progression),
            Command::Complete { id } => {
                if progression.location(&id).is_none() {
                    eprintln!("Unknown location: {}", id);
                    return ExitCode::FAILURE;
                }
                progression.mark_location_completed(&id);
                print_status(&progression);
            }
            Command::Enter { entry_point } => {
                let owner = progression
                    .location_by_entry_point(&entry_point)
                    .map(|l| l.name.clone())
                    .unwrap_or_else(|| "no location".to_string());
                if progression.can_enter(&entry_point) {
                    println!("{} is open ({})", entry_point, owner);
                } else {
                    println!("{} is locked ({})", entry_point, owner);
                    return ExitCode::FAILURE;
                }
            }
            Command::Open { id } => match progression.start_entry_point(&id) {
                Some(entry_point) => println!("{}", entry_point),
                None => {
                    eprintln!("{} is locked or unknown", id);
                    return ExitCode::FAILURE;
                }
            },
            Command::Reset => {
                progression.reset();
                println!("Progress reset");
            }
        }

        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;

    env_logger::init();
    cli::run(cli::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build starts from platform::web::start and pages drive an Explorer
}
