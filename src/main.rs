use anyhow::Context;
use std::path::PathBuf;
use tindit::config::{snippets::load_snippets, ConfigPaths, Settings};
use tindit::file::FileBrowser;
use tindit::snippet::SnippetEngine;
use tindit::{error, logging, App, Session};

/// コマンドライン引数
#[derive(Debug, Default)]
struct Args {
    dir: Option<PathBuf>,
    debug_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();
    let args = parse_args(std::env::args().skip(1))?;

    if let Some(path) = logging::init(args.debug_log.clone()).context("failed to open debug log")? {
        log::info!("tindit {} started, logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }

    let paths = ConfigPaths::platform_default()?;
    let settings = Settings::load_or_create(&paths)
        .with_context(|| format!("failed to load {}", paths.config_file().display()))?;
    let snippets = load_snippets(&paths)
        .with_context(|| format!("failed to load {}", paths.snippets_file().display()))?;

    let dir = match args.dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let browser = FileBrowser::open(&dir).with_context(|| format!("cannot browse {}", dir.display()))?;

    let session = Session::new(browser, settings, SnippetEngine::new(snippets));
    App::new(session).run()?;
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug-log" => {
                let path = iter.next().context("--debug-log requires a path")?;
                parsed.debug_log = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("usage: tindit [DIR] [--debug-log PATH]");
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => anyhow::bail!("unknown option: {}", arg),
            _ => parsed.dir = Some(PathBuf::from(arg)),
        }
    }
    Ok(parsed)
}
