use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use gazette::build::build_site;
use gazette::config::Config;
use gazette::server::serve;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::Level;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<()> {
    let matches = App::new("gazette")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .global(true)
                .help("Logs debug output"),
        )
        .subcommand(
            SubCommand::with_name("build")
                .about("Renders the site into static files")
                .arg(project_arg())
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .value_name("DIR")
                        .help("The output directory (default: `_output` in the project root)"),
                ),
        )
        .subcommand(
            SubCommand::with_name("serve")
                .about("Serves the site locally, rendering pages per request")
                .arg(project_arg())
                .arg(
                    Arg::with_name("addr")
                        .long("addr")
                        .takes_value(true)
                        .value_name("HOST:PORT")
                        .default_value(DEFAULT_ADDR)
                        .help("The address to listen on"),
                ),
        )
        .get_matches();

    let verbose = matches.is_present("verbose")
        || matches
            .subcommand()
            .1
            .map_or(false, |m| m.is_present("verbose"));
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .init();

    match matches.subcommand() {
        ("build", Some(m)) => {
            let output = m.value_of("output").map(PathBuf::from);
            let config = load_config(m, output.as_deref())?;
            build_site(&config).context("Building site")?;
            Ok(())
        }
        ("serve", Some(m)) => {
            let addr: SocketAddr = m
                .value_of("addr")
                .unwrap_or(DEFAULT_ADDR)
                .parse()
                .context("Parsing `--addr`")?;
            let config = load_config(m, None)?;
            serve(&config, addr).await
        }
        _ => Ok(()),
    }
}

fn project_arg() -> Arg<'static, 'static> {
    Arg::with_name("project")
        .short("p")
        .long("project")
        .takes_value(true)
        .value_name("DIR")
        .help("A directory in the project (default: the current directory)")
}

fn load_config(matches: &ArgMatches, output: Option<&Path>) -> Result<Config> {
    let dir = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("Getting the current directory")?,
    };
    let dir = std::fs::canonicalize(&dir)
        .with_context(|| format!("Resolving project directory `{}`", dir.display()))?;
    Config::from_directory(&dir, output)
}
