//! Circuit Q&A Command-Line Interface
//!
//! Terminal front end for the Circuit Q&A backend: create circuits, ask
//! questions about them, list and parse stored circuits, preview detected
//! gates and browse example snippets.
//!
//! ```text
//! circuitqa create --title "Bell" --example bell_state
//! circuitqa ask -q "Why does the CNOT entangle?" --circuit 42
//! circuitqa scan my_circuit.py
//! circuitqa circuits
//! circuitqa parse 42
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{OutputFormat, Reported, Settings};
use commands::{ask, circuits, create, examples, parse, scan, session, version};

/// Circuit Q&A - author, preview and ask questions about Qiskit circuits
#[derive(Parser, Debug)]
#[command(name = "circuitqa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL
    #[arg(long, global = true, env = "CIRCUITQA_API_URL", default_value = circuitqa_client::DEFAULT_BASE_URL)]
    api_url: String,

    /// Cookie string sent to the backend (falls back to ~/.circuitqa/cookie)
    #[arg(long, global = true, env = "CIRCUITQA_COOKIE", hide_env_values = true)]
    cookie: Option<String>,

    /// Name of the cookie holding the CSRF token
    #[arg(long, global = true, env = "CIRCUITQA_CSRF_COOKIE", default_value = "csrftoken")]
    csrf_cookie: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "CIRCUITQA_TIMEOUT", default_value = "60")]
    timeout: u64,

    /// Output format (text, html, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a circuit from Qiskit source
    Create {
        /// Circuit title
        #[arg(short, long)]
        title: Option<String>,

        /// Qiskit source file
        #[arg(short, long, conflicts_with = "example")]
        code: Option<String>,

        /// Use a built-in example instead of a file
        #[arg(short, long)]
        example: Option<String>,
    },

    /// List your stored circuits
    Circuits,

    /// Parse a stored circuit on the server
    Parse {
        /// Circuit ID
        id: i64,
    },

    /// Ask a question, optionally about a stored circuit
    Ask {
        /// The question
        #[arg(short, long)]
        question: Option<String>,

        /// Circuit ID the question is about
        #[arg(short, long)]
        circuit: Option<String>,

        /// Also copy the answer to this file
        #[arg(long)]
        copy: Option<String>,
    },

    /// Show a stored question/answer session
    Session {
        /// Session ID
        id: i64,
    },

    /// Detect gate calls in Qiskit source
    Scan {
        /// Qiskit source file
        #[arg(conflicts_with = "example")]
        input: Option<String>,

        /// Scan a built-in example instead of a file
        #[arg(short, long)]
        example: Option<String>,
    },

    /// List built-in example circuits
    Examples,

    /// Print a built-in example circuit
    Example {
        /// Example key (see `circuitqa examples`)
        key: String,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings {
        api_url: cli.api_url,
        cookie: cli.cookie,
        csrf_cookie: cli.csrf_cookie,
        timeout_secs: cli.timeout,
        format: cli.format,
    };

    // Execute command
    let result = match cli.command {
        Commands::Create {
            title,
            code,
            example,
        } => create::execute(&settings, title.as_deref(), code.as_deref(), example.as_deref()).await,

        Commands::Circuits => circuits::execute(&settings).await,

        Commands::Parse { id } => parse::execute(&settings, id).await,

        Commands::Ask {
            question,
            circuit,
            copy,
        } => {
            ask::execute(
                &settings,
                question.as_deref(),
                circuit.as_deref(),
                copy.as_deref(),
            )
            .await
        }

        Commands::Session { id } => session::execute(&settings, id).await,

        Commands::Scan { input, example } => {
            scan::execute(&settings, input.as_deref(), example.as_deref())
        }

        Commands::Examples => {
            examples::list();
            Ok(())
        }

        Commands::Example { key } => examples::show(&settings, &key),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        if e.downcast_ref::<Reported>().is_none() {
            eprintln!("{} {}", style("Error:").red().bold(), e);
        }
        std::process::exit(1);
    }

    Ok(())
}
