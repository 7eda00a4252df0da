//! Command-line interface for filebucket.
//!
//! `gen-path-tree` prints the counted JSON tree of every bucket's files;
//! `grep` searches bucket contents with regular expressions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use filebucket::{
    BinaryDetection, BucketOptionsBuilder, FilebucketError, GrepOptionsBuilder,
    OutputMode, PathCursor, collect_bucket_paths, grep, write_path_tree,
};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Mutex;

/// fb — file bucket statistics and search
#[derive(Parser)]
#[command(name = "fb", version, about, long_about = None)]
struct Cli {
    /// Diagnostic verbosity on stderr
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the JSON path tree with recursive file counts
    GenPathTree(TreeArgs),
    /// Search file buckets with regular expressions
    Grep(GrepArgs),
}

#[derive(Args)]
struct BucketArgs {
    /// Folder containing the bucket repositories
    #[arg(long, default_value = ".")]
    bucket_path: PathBuf,

    /// Treat every subdirectory as a bucket, not only git repositories
    #[arg(long)]
    all_dirs: bool,

    /// Ignore glob patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Disable .gitignore handling
    #[arg(long)]
    no_gitignore: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,
}

impl BucketArgs {
    fn builder(self) -> BucketOptionsBuilder {
        BucketOptionsBuilder::new(self.bucket_path)
            .require_git(!self.all_dirs)
            .ignore_patterns(self.ignore_patterns)
            .respect_gitignore(!self.no_gitignore)
            .follow_links(self.follow_links)
    }
}

#[derive(Args)]
struct TreeArgs {
    #[command(flatten)]
    buckets: BucketArgs,

    /// Read paths, one per line, from a file (`-` for stdin) instead of buckets.
    /// The list is used as given, so bucket and normalization flags are rejected.
    #[arg(
        long,
        conflicts_with_all = [
            "bucket_path",
            "all_dirs",
            "ignore_patterns",
            "no_gitignore",
            "follow_links",
            "no_lowercase",
            "ignore_suffixes",
        ]
    )]
    from_list: Option<PathBuf>,

    /// Sort the --from-list input before building the tree
    #[arg(long, requires = "from_list")]
    sort: bool,

    /// Write JSON as it is produced; a failed run ends with a `!truncated:` line
    #[arg(long)]
    stream: bool,

    /// Keep the original case of paths
    #[arg(long)]
    no_lowercase: bool,

    /// Drop paths ending with this suffix (can be repeated; default .gitignore)
    #[arg(long = "ignore-suffix")]
    ignore_suffixes: Vec<String>,
}

#[derive(Args)]
struct GrepArgs {
    #[command(flatten)]
    buckets: BucketArgs,

    /// Regular expression to filter searched file names
    #[arg(short = 'f', long = "file-pattern", default_value = "")]
    filename_pattern: String,

    /// Regular expression to run on each line of every file
    #[arg(long)]
    pattern: String,

    /// Binary detection strategy
    #[arg(long, default_value = "accurate", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    Silent,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

#[cfg(feature = "logging")]
fn setup_tracing(level: LogLevel) {
    let level = match level {
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Silent => return,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}

#[cfg(not(feature = "logging"))]
fn setup_tracing(_level: LogLevel) {}

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.log_level);
    let result = match cli.command {
        Command::GenPathTree(args) => run_tree(args),
        Command::Grep(args) => run_grep(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn read_list(source: &Path) -> Result<Box<dyn BufRead>, FilebucketError> {
    if source.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(source).map_err(|e| FilebucketError::Io {
        path: source.to_path_buf(),
        source: e,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

fn run_tree(args: TreeArgs) -> Result<(), FilebucketError> {
    let TreeArgs {
        buckets,
        from_list,
        sort,
        stream,
        no_lowercase,
        ignore_suffixes,
    } = args;
    let mut builder = buckets.builder().lowercase(!no_lowercase);
    if !ignore_suffixes.is_empty() {
        builder = builder.ignore_suffixes(ignore_suffixes);
    }
    let mode = if stream {
        OutputMode::Streaming
    } else {
        OutputMode::Buffered
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let count = match from_list {
        Some(source) => {
            let lines = read_list(&source)?.lines().map(move |line| {
                line.map_err(|e| FilebucketError::Io {
                    path: source.clone(),
                    source: e,
                })
            });
            if sort {
                let mut paths = lines.collect::<Result<Vec<String>, _>>()?;
                paths.sort_unstable();
                write_path_tree(&mut PathCursor::new(paths), &mut out, mode)?
            } else {
                write_path_tree(&mut PathCursor::from_fallible(lines)?, &mut out, mode)?
            }
        }
        None => {
            let paths = collect_bucket_paths(&builder.build())?;
            write_path_tree(&mut PathCursor::new(paths), &mut out, mode)?
        }
    };
    writeln!(out).map_err(FilebucketError::Write)?;
    out.flush().map_err(FilebucketError::Write)?;
    #[cfg(feature = "logging")]
    tracing::info!("Wrote path tree of {} files", count);
    #[cfg(not(feature = "logging"))]
    let _ = count;
    Ok(())
}

fn run_grep(args: GrepArgs) -> Result<(), FilebucketError> {
    let options = GrepOptionsBuilder::new(args.buckets.bucket_path.clone(), args.pattern)
        .filename_pattern(args.filename_pattern)
        .binary_detection(args.binary_detection)
        .buckets(args.buckets.builder().build())
        .build();
    let sink = Mutex::new(io::stdout());
    let matches = grep(&options, &sink)?;
    #[cfg(feature = "logging")]
    tracing::info!("{} matches", matches);
    #[cfg(not(feature = "logging"))]
    let _ = matches;
    Ok(())
}
