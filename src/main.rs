//! integra CLI entrypoint
//! Parses command-line arguments and dispatches to the integration service.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use integra::application::{
    ConnectRequest, FallbackPolicy, GenerateRequest, InitRequest, IntegrationService, TestOutcome,
    TestRequest,
};
use integra::core::{Workspace, logging};
use integra::generation::Language;
use integra::infrastructure::probe::parse_method;
use integra::web;
use std::io::{BufRead, Write};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "integra")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialise the project configuration and workspace directories
    Init {
        /// Project name stored in the configuration
        #[arg(long, default_value = "Integra.AI")]
        project_name: String,
        /// Default language for generated clients
        #[arg(long, default_value = "python")]
        language: Language,
        /// Do not create a `.env` credential placeholder
        #[arg(long)]
        no_env: bool,
    },
    /// List known integrations
    List,
    /// Generate client code from a natural-language prompt
    #[command(alias = "generate")]
    Ai {
        /// Description of the integration to generate
        #[arg(long, short)]
        prompt: String,
        /// Integration name (defaults to one derived from the prompt)
        #[arg(long)]
        name: Option<String>,
        /// Language override for this integration
        #[arg(long)]
        language: Option<Language>,
        /// Provider model
        #[arg(long)]
        model: Option<String>,
        /// Provider API key (defaults to GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Create a template client for an API with a known base URL
    Connect {
        /// Integration name
        #[arg(long)]
        name: String,
        /// Base URL of the target API
        #[arg(long)]
        base_url: String,
        /// Bearer token embedded in the generated client
        #[arg(long)]
        token: Option<String>,
    },
    /// Send one request to an integration's API
    Test {
        /// Integration name
        #[arg(long)]
        name: String,
        /// Endpoint path appended to the base URL
        #[arg(long, default_value = "/")]
        endpoint: String,
        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,
        /// Base URL used when the integration has none stored
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Serve the web front door
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        /// Port to bind
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let workspace = Workspace::current().context("Failed to resolve the working directory")?;
    // Values already in the environment win over `.env`
    let _ = dotenvy::from_path(workspace.env_path());
    logging::init(&workspace.log_file());

    let service = IntegrationService::with_defaults(workspace)
        .context("Failed to initialise the integration service")?;

    match cli.command {
        Commands::Init {
            project_name,
            language,
            no_env,
        } => run_init(&service, project_name, language, !no_env).await?,
        Commands::List => run_list(&service).await?,
        Commands::Ai {
            prompt,
            name,
            language,
            model,
            api_key,
        } => {
            let request = GenerateRequest {
                prompt,
                name,
                language,
                model,
                credential: api_key,
            };
            run_generate(&service, request).await?
        }
        Commands::Connect {
            name,
            base_url,
            token,
        } => run_connect(&service, ConnectRequest { name, base_url, token }).await?,
        Commands::Test {
            name,
            endpoint,
            method,
            base_url,
        } => {
            let request = TestRequest {
                name,
                endpoint,
                method,
                base_url,
            };
            run_test(&service, request).await?
        }
        Commands::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            println!("Serving on http://{addr}");
            web::serve(Arc::new(service), addr)
                .await
                .with_context(|| format!("Web server on {addr} failed"))?
        }
    }
    Ok(())
}

async fn run_init(
    service: &IntegrationService,
    project_name: String,
    language: Language,
    write_env: bool,
) -> anyhow::Result<()> {
    let report = service
        .init(InitRequest {
            project_name,
            language,
            write_env,
        })
        .await
        .context("Failed to initialise the project")?;

    println!("Initialised {}", report.config.project_name);
    println!("  config:   {}", report.config_path.display());
    println!("  language: {}", report.config.language.display_name());
    if report.env_created {
        println!("  created .env; set GEMINI_API_KEY before generating");
    }
    Ok(())
}

async fn run_list(service: &IntegrationService) -> anyhow::Result<()> {
    let items = service.list().await.context("Failed to list integrations")?;
    if items.is_empty() {
        println!("No integrations found.");
        return Ok(());
    }

    println!("{:<4} NAME", "#");
    for (index, item) in items.iter().enumerate() {
        println!("{:<4} {item}", index + 1);
    }
    Ok(())
}

async fn run_generate(service: &IntegrationService, request: GenerateRequest) -> anyhow::Result<()> {
    let report = service
        .generate(request, FallbackPolicy::Propagate)
        .await
        .context("Failed to generate the integration")?;

    info!(slug = %report.slug, "Generation finished");
    println!("Saved generated code to {}", report.artifact_path.display());
    println!("Metadata: {}", report.metadata_path.display());
    Ok(())
}

async fn run_connect(service: &IntegrationService, request: ConnectRequest) -> anyhow::Result<()> {
    let report = service
        .connect(request)
        .await
        .context("Failed to connect the integration")?;

    println!("Saved client to {}", report.artifact_path.display());
    println!("Metadata: {}", report.metadata_path.display());
    Ok(())
}

async fn run_test(service: &IntegrationService, mut request: TestRequest) -> anyhow::Result<()> {
    let mut outcome = service
        .test(request.clone())
        .await
        .context("Failed to test the integration")?;

    if outcome == TestOutcome::MissingBaseUrl {
        let base_url = prompt_line("Base URL: ")?;
        if base_url.is_empty() {
            bail!("A base URL is required to test '{}'", request.name);
        }
        request.base_url = Some(base_url);
        outcome = service
            .test(request.clone())
            .await
            .context("Failed to test the integration")?;
    }

    match outcome {
        TestOutcome::NotFound => bail!("Integration '{}' not found", request.name),
        TestOutcome::MissingBaseUrl => bail!("No base URL available for '{}'", request.name),
        TestOutcome::Completed { url, status, body } => {
            println!("{} {url} -> {status}", parse_method(&request.method));
            println!("{body}");
        }
    }
    Ok(())
}

fn prompt_line(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}
