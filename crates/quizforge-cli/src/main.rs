//! quizforge CLI — generate, take and grade chapter quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "AI-assisted quiz generation and grading")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and seed the data directory with sample chapters
    Init,

    /// List AI providers and which one would be used
    Providers,

    /// Store an API key for a provider
    SetKey {
        /// Provider id: groq, gemini or openai
        #[arg(long)]
        provider: String,

        /// The API key
        #[arg(long)]
        key: String,
    },

    /// List chapters
    Chapters,

    /// List saved quizzes
    Quizzes {
        /// Only quizzes open to this class level
        #[arg(long)]
        class: Option<String>,
    },

    /// Generate a quiz for a chapter
    Generate {
        /// Chapter id
        #[arg(long)]
        chapter: String,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Question types, comma-separated: mcq,true_false,short_answer
        #[arg(long, default_value = "mcq,true_false,short_answer")]
        types: String,

        /// Provider id (default: auto-detected)
        #[arg(long)]
        provider: Option<String>,

        /// Quiz title when saving (default: "<chapter> - Test")
        #[arg(long)]
        title: Option<String>,

        /// Time limit in minutes when saving (default from config)
        #[arg(long)]
        time_limit: Option<u32>,

        /// Save the quiz to the data directory
        #[arg(long)]
        save: bool,

        /// Question ids to leave out when saving, comma-separated
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade a JSON answer map against a saved quiz
    Grade {
        /// Quiz id
        #[arg(long)]
        test: String,

        /// JSON file mapping question id to answer
        #[arg(long)]
        answers: PathBuf,

        /// Record the attempt for this student
        #[arg(long)]
        student: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Take a saved quiz interactively, with a countdown
    Take {
        /// Quiz id
        #[arg(long)]
        test: String,

        /// Student id the attempt is recorded for
        #[arg(long)]
        student: String,
    },

    /// Show a student's progress
    Progress {
        /// Student id
        #[arg(long)]
        student: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().expect("valid directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Init => commands::init::execute(config).await,
        Commands::Providers => commands::providers::execute(config),
        Commands::SetKey { provider, key } => commands::set_key::execute(config, provider, key),
        Commands::Chapters => commands::chapters::execute(config).await,
        Commands::Quizzes { class } => commands::quizzes::execute(config, class).await,
        Commands::Generate {
            chapter,
            count,
            types,
            provider,
            title,
            time_limit,
            save,
            exclude,
            format,
        } => {
            commands::generate::execute(
                config,
                commands::generate::GenerateArgs {
                    chapter,
                    count,
                    types,
                    provider,
                    title,
                    time_limit,
                    save,
                    exclude,
                    format,
                },
            )
            .await
        }
        Commands::Grade {
            test,
            answers,
            student,
            format,
        } => commands::grade::execute(config, test, answers, student, format).await,
        Commands::Take { test, student } => commands::take::execute(config, test, student).await,
        Commands::Progress { student, format } => {
            commands::progress::execute(config, student, format).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
