use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

use fhtml_codegen::{CompilerOutput, Options};
use fhtml_source::{LoadError, LocalFile, RemoteSource, RootSelector, SourceProvider};

const HTML_FILE: &str = "output.html";
const CSS_FILE: &str = "styles.css";

#[derive(Parser)]
#[command(name = "fhtml")]
#[command(about = "Turn a design-file screen into static HTML + CSS")]
#[command(version)]
struct Cli {
    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a design file and write output.html + styles.css
    Run(RunArgs),

    /// Load a local export and report its screen without writing output
    Check {
        /// Exported design-file JSON
        path: PathBuf,

        /// Screen root to use (node id or name)
        #[arg(long)]
        node: Option<String>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Personal access token for the design API
    token: String,

    /// File key of the design (from the file URL)
    source_id: String,

    /// Read this pre-exported JSON instead of calling the API
    #[arg(long, value_name = "EXPORT")]
    file: Option<PathBuf>,

    /// Screen root to use (node id or name); default is the largest frame
    #[arg(long)]
    node: Option<String>,

    /// Directory receiving output.html and styles.css
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Document title (default: the screen name)
    #[arg(long)]
    title: Option<String>,

    /// Let rounded containers clip their children
    #[arg(long)]
    clip_rounded: bool,

    /// Do not emit a web-font @import
    #[arg(long)]
    no_fonts: bool,

    /// Design API root
    #[arg(long, default_value = RemoteSource::DEFAULT_BASE_URL)]
    api_base: String,
}

/// Fatal conditions of a run.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Run(args) => cmd_run(&args),
        Command::Check { path, node } => cmd_check(&path, node),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn selector(node: Option<String>) -> RootSelector {
    match node {
        Some(key) => RootSelector::Matching(key),
        None => RootSelector::Largest,
    }
}

/// Pick the source once; translation never looks at where the tree came from.
fn provider(args: &RunArgs) -> Box<dyn SourceProvider> {
    match &args.file {
        Some(path) => Box::new(LocalFile::new(path)),
        None => Box::new(
            RemoteSource::new(&args.token, &args.source_id).with_base_url(&args.api_base),
        ),
    }
}

fn options(args: &RunArgs) -> Options {
    Options {
        title: args.title.clone(),
        stylesheet_href: CSS_FILE.to_string(),
        clip_rounded: args.clip_rounded,
        import_fonts: !args.no_fonts,
    }
}

fn cmd_run(args: &RunArgs) -> Result<(), CliError> {
    let provider = provider(args);
    let root = fhtml_source::load(provider.as_ref(), &selector(args.node.clone()))?;

    tracing::info!("converting to HTML/CSS");
    let output = fhtml_codegen::compile_with(&root, &options(args));

    write_outputs(&args.out_dir, &output)?;

    tracing::info!(elements = output.element_count, "conversion complete");
    if !output.fonts.is_empty() {
        tracing::info!("fonts used: {}", output.fonts.join(", "));
    }
    Ok(())
}

fn cmd_check(path: &Path, node: Option<String>) -> Result<(), CliError> {
    let root = fhtml_source::load(&LocalFile::new(path), &selector(node))?;
    eprintln!("OK: {} ({} nodes)", root.name, root.count());
    Ok(())
}

fn write_outputs(out_dir: &Path, output: &CompilerOutput) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir).map_err(|source| CliError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    // Stage both files, then move them into place. A failure at any step
    // removes whatever this run wrote.
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();
    for (name, contents) in [(HTML_FILE, &output.html), (CSS_FILE, &output.css)] {
        let path = out_dir.join(name);
        let tmp = out_dir.join(format!(".{name}.tmp"));
        if let Err(source) = std::fs::write(&tmp, contents) {
            discard(staged.iter().map(|(tmp, _)| tmp.as_path()).chain([tmp.as_path()]));
            return Err(CliError::Write { path, source });
        }
        staged.push((tmp, path));
    }

    // Stylesheet first, so a document never lands without it.
    let mut placed: Vec<&Path> = Vec::new();
    for (tmp, path) in staged.iter().rev() {
        if let Err(source) = std::fs::rename(tmp, path) {
            discard(staged.iter().map(|(tmp, _)| tmp.as_path()).chain(placed));
            return Err(CliError::Write {
                path: path.clone(),
                source,
            });
        }
        placed.push(path);
        tracing::info!(path = %path.display(), "wrote");
    }
    Ok(())
}

fn discard<'a>(paths: impl IntoIterator<Item = &'a Path>) {
    for path in paths {
        if std::fs::remove_file(path).is_ok() {
            tracing::debug!(path = %path.display(), "removed partial output");
        }
    }
}
