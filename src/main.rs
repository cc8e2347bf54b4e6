use anyhow::Result;
use clap::Parser;
use platpkg::commands::{self, config::{Config, Options}};
use platpkg::platform::HostPlatformDetector;
use platpkg::runtime::RealRuntime;
use std::path::PathBuf;
use std::time::Duration;

/// platpkg - per-platform binary packages for Composer projects
///
/// Reads `extra.platform-packages` from the root manifest and installed
/// packages, and picks the download URL that fits the current OS and
/// architecture.
///
/// Examples:
///   platpkg resolve                   # Resolve every declared platform package
///   platpkg --os linux --arch arm64 plan
///   platpkg match linux-x86_64 win all
#[derive(Parser, Debug)]
#[command(author, version = env!("PLATPKG_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the detected operating system (also via PLATPKG_OS)
    #[arg(long, env = "PLATPKG_OS", value_name = "OS", global = true)]
    pub os: Option<String>,

    /// Override the detected architecture (also via PLATPKG_ARCH)
    #[arg(long, env = "PLATPKG_ARCH", value_name = "ARCH", global = true)]
    pub arch: Option<String>,

    /// Seconds to wait for a content-type probe
    #[arg(
        long = "probe-timeout",
        env = "PLATPKG_PROBE_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = commands::config::DEFAULT_PROBE_TIMEOUT_SECS,
        global = true
    )]
    pub probe_timeout: u64,

    /// Never send HEAD requests; unknown extensions are zip
    #[arg(long = "no-probe", global = true)]
    pub no_probe: bool,

    /// Root manifest (defaults to $COMPOSER or composer.json)
    #[arg(long, env = "PLATPKG_MANIFEST", value_name = "PATH", global = true)]
    pub manifest: Option<PathBuf>,

    /// Installed packages file (defaults to vendor/composer/installed.json)
    #[arg(long, env = "PLATPKG_INSTALLED", value_name = "PATH", global = true)]
    pub installed: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the platform descriptor in use
    Platform,

    /// Check platform keys against the current platform
    Match(MatchArgs),

    /// Classify the archive behind a URL
    Classify(ClassifyArgs),

    /// Resolve declared platform packages to concrete packages (JSON)
    Resolve,

    /// Show install, update and uninstall decisions
    Plan,

    /// Resolve the download of an installed platform-package record
    Dist(DistArgs),
}

#[derive(clap::Args, Debug)]
pub struct MatchArgs {
    /// Platform keys such as "linux-x86_64", "win" or "all"
    #[arg(value_name = "KEY", required = true)]
    pub keys: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    #[arg(value_name = "URL")]
    pub url: String,
}

#[derive(clap::Args, Debug)]
pub struct DistArgs {
    /// Installed package name, e.g. "vendor/name--suffix"
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            os: self.os.clone(),
            arch: self.arch.clone(),
            probe_timeout: Some(Duration::from_secs(self.probe_timeout)),
            no_probe: self.no_probe,
            manifest: self.manifest.clone(),
            installed: self.installed.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = Config::new(RealRuntime, &HostPlatformDetector, cli.options())?;

    match cli.command {
        Commands::Platform => commands::platform(config)?,
        Commands::Match(args) => commands::match_keys(config, &args.keys)?,
        Commands::Classify(args) => commands::classify(config, &args.url).await?,
        Commands::Resolve => commands::resolve(config).await?,
        Commands::Plan => commands::show_plan(config).await?,
        Commands::Dist(args) => commands::dist(config, &args.name).await?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_match_parsing() {
        let cli = Cli::try_parse_from(["platpkg", "match", "linux-x86_64", "all"]).unwrap();
        match cli.command {
            Commands::Match(args) => assert_eq!(args.keys, vec!["linux-x86_64", "all"]),
            _ => panic!("Expected Match command"),
        }
    }

    #[test]
    fn test_cli_match_requires_a_key() {
        assert!(Cli::try_parse_from(["platpkg", "match"]).is_err());
    }

    #[test]
    fn test_cli_global_overrides_parsing() {
        let cli = Cli::try_parse_from([
            "platpkg", "plan", "--os", "linux", "--arch", "arm64", "--no-probe",
        ])
        .unwrap();
        let options = cli.options();

        assert_eq!(options.os.as_deref(), Some("linux"));
        assert_eq!(options.arch.as_deref(), Some("arm64"));
        assert!(options.no_probe);
    }

    #[test]
    fn test_cli_probe_timeout_parsing() {
        let cli = Cli::try_parse_from(["platpkg", "--probe-timeout", "3", "resolve"]).unwrap();
        assert_eq!(cli.options().probe_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_cli_dist_parsing() {
        let cli = Cli::try_parse_from(["platpkg", "dist", "acme/tool--cli"]).unwrap();
        match cli.command {
            Commands::Dist(args) => assert_eq!(args.name, "acme/tool--cli"),
            _ => panic!("Expected Dist command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["platpkg"]).is_err());
    }
}
