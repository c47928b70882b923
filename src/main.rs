use std::path::PathBuf;

use catalogue_tools::api::{ApiClient, Credentials};
use catalogue_tools::render::{CsvRenderer, ExcelRenderer, Renderer};
use catalogue_tools::report::ReportOptions;
use catalogue_tools::{Result, ToolError, accounts, export};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    let client = ApiClient::new(cli.credentials.into())?;

    match cli.command {
        Command::PermissionMatrix(args) => {
            let output = args.output_or_default("permission-matrix");
            export::permission_matrix(
                &client,
                renderer(args.format).as_ref(),
                &output,
                &ReportOptions::default(),
            )
        }
        Command::UserMatrix(args) => {
            let output = args.output_or_default("user-role-matrix");
            export::user_role_matrix(&client, renderer(args.format).as_ref(), &output)
        }
        Command::CreateAccounts(args) => {
            accounts::create_missing_accounts(&client, &args.input, &args.description)?;
            Ok(())
        }
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn renderer(format: FileFormat) -> Box<dyn Renderer> {
    match format {
        FileFormat::Xlsx => Box::new(ExcelRenderer),
        FileFormat::Csv => Box::new(CsvRenderer),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Export permission and user-role matrices from the catalogue service."
)]
struct Cli {
    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export the object-definition / role permission matrix.
    PermissionMatrix(ExportArgs),

    /// Export the user / role membership matrix.
    UserMatrix(ExportArgs),

    /// Create accounts for entries of a semicolon-delimited user list that
    /// do not exist yet.
    CreateAccounts(CreateAccountsArgs),
}

#[derive(clap::Args)]
struct CredentialArgs {
    /// User API key for the public endpoint family.
    #[arg(long, env = "BD_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Access token used by the catalogue web application.
    #[arg(long, env = "BD_UI_ACCESS_TOKEN", hide_env_values = true)]
    ui_access_token: String,

    /// Tenant identifier sent with every request.
    #[arg(long, env = "BD_TENANT")]
    tenant: String,

    /// Workspace scoping the object-instance counts.
    #[arg(long, env = "BD_WORKSPACE_ID")]
    workspace_id: String,

    /// Additional authorization header required by some tenants.
    #[arg(long, env = "BD_B2C_AUTHORIZATION", hide_env_values = true)]
    b2c_authorization: Option<String>,
}

impl From<CredentialArgs> for Credentials {
    fn from(args: CredentialArgs) -> Self {
        Credentials {
            api_key: args.api_key,
            ui_access_token: args.ui_access_token,
            tenant: args.tenant,
            workspace_id: args.workspace_id,
            b2c_authorization: args.b2c_authorization,
        }
    }
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = FileFormat::Xlsx)]
    format: FileFormat,

    /// Output file path; defaults to a dated file name in the working
    /// directory.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ExportArgs {
    fn output_or_default(&self, prefix: &str) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let date = Local::now().format("%Y-%m-%d");
            PathBuf::from(format!("{prefix}-{date}.{}", self.format))
        })
    }
}

#[derive(clap::Args)]
struct CreateAccountsArgs {
    /// Path to the semicolon-delimited user list.
    #[arg(long)]
    input: PathBuf,

    /// Description applied to every created account.
    #[arg(long)]
    description: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FileFormat {
    Xlsx,
    Csv,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Xlsx => write!(f, "xlsx"),
            FileFormat::Csv => write!(f, "csv"),
        }
    }
}
