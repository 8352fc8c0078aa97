//! A command line interface for declaring, running, and cleaning the
//! protein domain steps of a transcriptome annotation.
//!
//! ```shell
//! cargo run --release --bin=hmmremap --features=binaries -- check
//! cargo run --release --bin=hmmremap --features=binaries -- press db/Pfam-A.hmm
//! cargo run --release --bin=hmmremap --features=binaries -- \
//!     scan longest_orfs.pep db/Pfam-A.hmm longest_orfs.pep.x.Pfam-A.tbl --threads 8
//! cargo run --release --bin=hmmremap --features=binaries -- \
//!     remap longest_orfs.pep.x.Pfam-A.tbl longest_orfs.gff3 longest_orfs.pep.x.Pfam-A.csv
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use hmmremap::domain::QueryNamer;
use hmmremap::domain::name::DEFAULT_QUERY_BASENAME;
use hmmremap::remap;
use hmmremap::task::Task;
use hmmremap::task::hmmpress;
use hmmremap::task::hmmscan;
use hmmremap::task::remap_hmmer;
use hmmremap::tool;
use hmmremap::tool::Tool;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Arguments
////////////////////////////////////////////////////////////////////////////////////////

/// Runs the HMMER steps of an annotation and remaps their results onto
/// transcript coordinates.
#[derive(Parser)]
struct Cli {
    /// The subcommand.
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

/// Options shared by every subcommand that declares a task.
#[derive(Args)]
struct TaskArgs {
    /// Remove the task's targets instead of running it.
    #[arg(long, default_value_t = false)]
    clean: bool,
}

/// The available subcommands.
#[derive(Subcommand)]
enum Command {
    /// Ensures `hmmscan` and `hmmpress` can be found.
    Check,

    /// Indexes a profile HMM database with `hmmpress`.
    Press {
        /// The profile HMM database.
        db: PathBuf,

        #[command(flatten)]
        task: TaskArgs,

        /// Extra parameters passed to `hmmpress`.
        #[arg(last = true)]
        params: Vec<OsString>,
    },

    /// Searches protein sequences against a pressed database with `hmmscan`.
    Scan {
        /// The protein FASTA to search.
        input: PathBuf,

        /// The pressed profile HMM database.
        db: PathBuf,

        /// Where to write the domain table.
        output: PathBuf,

        /// The E-value cutoff.
        #[arg(short = 'E', long, default_value_t = hmmscan::DEFAULT_CUTOFF)]
        cutoff: f64,

        /// The number of threads given to `hmmscan`.
        #[arg(short, long, default_value_t = 1)]
        threads: usize,

        #[command(flatten)]
        task: TaskArgs,

        /// Extra parameters passed to `hmmscan`.
        #[arg(last = true)]
        params: Vec<OsString>,
    },

    /// Remaps a domain table from ORF coordinates onto transcript coordinates.
    Remap {
        /// The domain table written by `hmmscan --domtblout`.
        domains: PathBuf,

        /// The GFF3 of ORF locations.
        orfs: PathBuf,

        /// Where to write the remapped hits as CSV.
        output: PathBuf,

        /// The basename the transcripts were renamed with.
        #[arg(long, default_value = DEFAULT_QUERY_BASENAME)]
        query_basename: String,

        #[command(flatten)]
        task: TaskArgs,
    },
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// Runs or cleans a declared task.
fn execute(task: &Task, args: &TaskArgs) -> Result<()> {
    if args.clean {
        for path in task.clean().with_context(|| format!("cleaning `{task}`"))? {
            info!("removed {}", path.display());
        }

        return Ok(());
    }

    task.run().with_context(|| format!("running `{task}`"))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check => {
            let found = tool::check(&Tool::ALL).context("checking for required executables")?;

            for (tool, path) in found {
                println!("{tool}\t{}", path.display());
            }

            Ok(())
        }
        Command::Press { db, task, params } => {
            let declared = hmmpress::task(&db, &params, None).context("declaring `hmmpress`")?;
            execute(&declared, &task)
        }
        Command::Scan {
            input,
            db,
            output,
            cutoff,
            threads,
            task,
            params,
        } => {
            let options = hmmscan::Options {
                cutoff,
                threads,
                params,
            };

            let declared = hmmscan::task(&input, &output, &db, &options)
                .context("declaring `hmmscan`")?;
            execute(&declared, &task)
        }
        Command::Remap {
            domains,
            orfs,
            output,
            query_basename,
            task,
        } => {
            let namer = QueryNamer::try_new(query_basename).context("creating query namer")?;
            let builder = remap::Builder::default().query_namer(namer);

            let declared = remap_hmmer::task(&domains, &orfs, &output, builder);
            execute(&declared, &task)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(cli.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(cli)
}
