mod script;


use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use canvas::drag::ClampPolicy;
use canvas::engine::{EngineConfig, EngineCore};
use canvas::repo::RepoError;
use canvas::scene::{self, PaintingDocument, SceneError};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use store::{HttpStore, PaintingSession, PaintingStore, StoreConfig, StoreError, file};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::script::{ReplayReport, ScriptError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing username; pass --username or set EASEL_USERNAME")]
    MissingUsername,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error("scene rejected: {0}")]
    Repo(#[from] RepoError),
    #[error("script: {0}")]
    Script(#[from] ScriptError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "easel", about = "Shape painting editor: store client and gesture replay")]
struct Cli {
    #[arg(long, env = "EASEL_BASE_URL", default_value = store::config::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "EASEL_USERNAME")]
    username: Option<String>,

    /// Let dragged shapes leave the canvas bounds.
    #[arg(long, default_value_t = false)]
    no_clamp: bool,

    /// Raise a shape to the top of the draw order when it is pressed.
    #[arg(long, default_value_t = false)]
    raise_on_press: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    store_config: StoreConfig,
    username: Option<String>,
    engine: EngineConfig,
}

impl CliContext {
    fn username(&self) -> Result<&str, CliError> {
        self.username.as_deref().ok_or(CliError::MissingUsername)
    }

    fn store(&self) -> Result<HttpStore, CliError> {
        Ok(HttpStore::new(&self.store_config)?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    User(UserCommand),
    Painting(PaintingCommand),
    Scene(SceneCommand),
}

#[derive(Args, Debug)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    Check { username: String },
    Create { username: String },
}

#[derive(Args, Debug)]
struct PaintingCommand {
    #[command(subcommand)]
    command: PaintingSubcommand,
}

#[derive(Subcommand, Debug)]
enum PaintingSubcommand {
    List,
    Get {
        id: Uuid,
        #[arg(long, help = "Write the document here instead of stdout")]
        out: Option<PathBuf>,
    },
    /// Upload a painting file, creating a new painting unless --id is given.
    Save {
        file: PathBuf,
        #[arg(long)]
        id: Option<Uuid>,
    },
}

#[derive(Args, Debug)]
struct SceneCommand {
    #[command(subcommand)]
    command: SceneSubcommand,
}

#[derive(Subcommand, Debug)]
enum SceneSubcommand {
    /// Replay a gesture script and report the resulting scene.
    Replay(ReplayArgs),
    /// Validate a painting file and print it normalized.
    Import { file: PathBuf },
    /// Print per-kind shape counts of a painting file.
    Counts { file: PathBuf },
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    input: String,

    #[arg(long, help = "Load this painting file before replaying")]
    base: Option<PathBuf>,

    #[arg(long, help = "Export the result as JSON into this directory")]
    export_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Save the result to the store as a new painting")]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = CliContext {
        store_config: StoreConfig::from_env().with_base_url(&cli.base_url),
        username: cli.username,
        engine: EngineConfig {
            clamp: if cli.no_clamp { ClampPolicy::Free } else { ClampPolicy::Clamp },
            raise_on_press: cli.raise_on_press,
        },
    };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::User(user) => run_user(&ctx, user).await,
        Command::Painting(painting) => run_painting(&ctx, painting).await,
        Command::Scene(scene) => run_scene(&ctx, scene).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    cli.store()?.health().await?;
    println!("ok");
    Ok(())
}

async fn run_user(cli: &CliContext, user: UserCommand) -> Result<(), CliError> {
    let store = cli.store()?;
    match user.command {
        UserSubcommand::Check { username } => {
            let exists = store.check_user_exists(&username).await?;
            println!("{}", if exists { "exists" } else { "not found" });
            Ok(())
        }
        UserSubcommand::Create { username } => {
            store.create_user(&username).await?;
            println!("created {}", username.trim());
            Ok(())
        }
    }
}

async fn run_painting(cli: &CliContext, painting: PaintingCommand) -> Result<(), CliError> {
    let mut session = PaintingSession::login_existing(cli.store()?, cli.username()?).await?;
    match painting.command {
        PaintingSubcommand::List => {
            for summary in session.list().await? {
                println!("{}\t{}", summary.id, summary.name);
            }
            Ok(())
        }
        PaintingSubcommand::Get { id, out } => {
            let doc = session.load(id).await?;
            let rendered = scene::to_json_pretty(&doc)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    eprintln!("wrote {}", path.display());
                }
                None => println!("{rendered}"),
            }
            Ok(())
        }
        PaintingSubcommand::Save { file: path, id } => {
            let doc = file::import_path(&path)?;
            if let Some(id) = id {
                // Confirms ownership before overwriting.
                session.load(id).await?;
            }
            let saved = session.save_document(&doc).await?;
            println!("{saved}");
            Ok(())
        }
    }
}

async fn run_scene(cli: &CliContext, command: SceneCommand) -> Result<(), CliError> {
    match command.command {
        SceneSubcommand::Replay(args) => run_replay(cli, args).await,
        SceneSubcommand::Import { file: path } => {
            let doc = file::import_path(&path)?;
            println!("{}", scene::to_json_pretty(&doc)?);
            Ok(())
        }
        SceneSubcommand::Counts { file: path } => {
            let engine = load_engine(cli, Some(&path))?;
            print_json(&serde_json::to_value(engine.counts())?)
        }
    }
}

async fn run_replay(cli: &CliContext, args: ReplayArgs) -> Result<(), CliError> {
    let (engine, report, exported) = replay_to_disk(cli, &args)?;
    eprintln!(
        "replayed {} events: {} created, {} moved, {} deleted",
        report.events, report.created, report.moved, report.deleted
    );
    if let Some(path) = exported {
        eprintln!("exported {}", path.display());
    }

    let scene = engine.scene();
    if args.save {
        let mut session = PaintingSession::login(cli.store()?, cli.username()?).await?;
        let id = session.save(&scene).await?;
        eprintln!("saved painting {id}");
    }

    let doc: PaintingDocument = engine.export_document()?;
    print_json(&serde_json::to_value(&doc)?)
}

/// Replay the script onto the optional base painting, then export the result
/// when an export directory is given.
fn replay_to_disk(
    cli: &CliContext,
    args: &ReplayArgs,
) -> Result<(EngineCore, ReplayReport, Option<PathBuf>), CliError> {
    let mut engine = load_engine(cli, args.base.as_deref())?;
    let report = script::replay(open_input(&args.input)?, &mut engine)?;
    let exported = match &args.export_dir {
        Some(dir) => Some(file::export_scene(dir, &engine.scene())?),
        None => None,
    };
    Ok((engine, report, exported))
}

fn load_engine(cli: &CliContext, base: Option<&Path>) -> Result<EngineCore, CliError> {
    let mut engine = EngineCore::with_config(cli.engine);
    if let Some(path) = base {
        engine.load_document(file::import_path(path)?)?;
    }
    Ok(engine)
}

fn open_input(input: &str) -> Result<Box<dyn BufRead>, CliError> {
    if input == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    Ok(Box::new(BufReader::new(File::open(input)?)))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
