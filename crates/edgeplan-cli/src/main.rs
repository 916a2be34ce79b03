use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "edgeplan",
    about = "edgeplan — offline video-to-edge-cache placement optimizer",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a placement for a problem file and emit the assignment
    Solve {
        /// Problem file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
        /// Assignment output file, or "-" for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
        /// Log a progress event every N commits (0 disables)
        #[arg(long, default_value_t = 100)]
        progress: u64,
    },
    /// Validate and score an existing assignment
    Score {
        /// Problem file
        #[arg(short, long)]
        input: String,
        /// Assignment file, in the shape solve emits
        #[arg(short, long)]
        assignment: String,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    // The assignment goes to stdout, so diagnostics stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("edgeplan=info".parse()?)
                .add_directive("edgeplan_solver=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { input, output, progress } => {
            commands::solve::run(&input, &output, progress)
        }
        Commands::Score { input, assignment, format } => {
            commands::score::run(&input, &assignment, &format)
        }
    }
}
