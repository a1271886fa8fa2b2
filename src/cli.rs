use awsup::{DesiredState, Request};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "awsup")]
#[command(version)]
#[command(about = "Declarative installer for the AWS CLI on Linux hosts", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Converge the host to the desired AWS CLI state
    Reconcile(ReconcileArgs),

    /// Report whether the AWS CLI is currently installed
    Status(StatusArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Desired state of the AWS CLI
    #[arg(short, long, value_enum, default_value_t = DesiredState::Present)]
    pub state: DesiredState,

    /// URL to download the installer bundle from
    #[arg(long, default_value = awsup::types::DEFAULT_DOWNLOAD_URL)]
    pub download_url: String,

    /// Staging directory for the download (default: ephemeral temp dir)
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// File name for the downloaded bundle
    #[arg(long, default_value = awsup::types::DEFAULT_DOWNLOAD_FILE_NAME)]
    pub download_file_name: String,

    /// Directory the aws binary is linked into
    #[arg(long, default_value = awsup::types::DEFAULT_BIN_DIR)]
    pub bin_dir: PathBuf,

    /// Directory the AWS CLI files are installed into
    #[arg(long, default_value = awsup::types::DEFAULT_INSTALL_DIR)]
    pub install_dir: PathBuf,

    /// Inspect only: report what would change without touching the host
    #[arg(long)]
    pub check: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Parser)]
pub struct StatusArgs {
    /// Directory the aws binary is expected in
    #[arg(long, default_value = awsup::types::DEFAULT_BIN_DIR)]
    pub bin_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl ReconcileArgs {
    /// Build the validated-parameter record consumed by the engine.
    pub fn to_request(&self) -> Request {
        let mut request = Request::new(self.state)
            .download_url(&self.download_url)
            .download_file_name(&self.download_file_name)
            .bin_dir(&self.bin_dir)
            .install_dir(&self.install_dir)
            .check_mode(self.check);
        if let Some(dir) = &self.download_dir {
            request = request.download_dir(dir);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_defaults() {
        let cli = Cli::try_parse_from(["awsup", "reconcile"]).unwrap();
        let Command::Reconcile(args) = cli.command else {
            panic!("expected reconcile");
        };
        assert_eq!(args.state, DesiredState::Present);
        assert!(!args.check);

        let request = args.to_request();
        assert!(request.apply_changes);
        assert!(request.download_dir.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_reconcile_check_mode() {
        let cli =
            Cli::try_parse_from(["awsup", "reconcile", "--state", "absent", "--check"]).unwrap();
        let Command::Reconcile(args) = cli.command else {
            panic!("expected reconcile");
        };
        assert_eq!(args.state, DesiredState::Absent);

        let request = args.to_request();
        assert!(!request.apply_changes);
    }

    #[test]
    fn test_reconcile_custom_locations() {
        let cli = Cli::try_parse_from([
            "awsup",
            "reconcile",
            "--bin-dir",
            "/opt/bin",
            "--install-dir",
            "/opt/aws-cli",
            "--download-dir",
            "/var/tmp/staging",
        ])
        .unwrap();
        let Command::Reconcile(args) = cli.command else {
            panic!("expected reconcile");
        };

        let request = args.to_request();
        assert_eq!(request.bin_dir, PathBuf::from("/opt/bin"));
        assert_eq!(request.install_dir, PathBuf::from("/opt/aws-cli"));
        assert_eq!(
            request.download_dir,
            Some(PathBuf::from("/var/tmp/staging"))
        );
    }

    #[test]
    fn test_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
