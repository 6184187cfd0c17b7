//! cogtest CLI — generate, grade, and check seeded assessments.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "cogtest",
    version,
    about = "Deterministic assessment generation and grading"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the test plan for a seed
    Plan {
        /// Seed the whole plan derives from
        #[arg(long)]
        seed: String,

        /// Plan variant: sectioned or hashed (overrides config)
        #[arg(long)]
        variant: Option<String>,

        /// Append the code-tracing section
        #[arg(long)]
        coding: bool,

        /// Emit the client view: no seed, no answer keys
        #[arg(long)]
        public: bool,

        /// Write the plan JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade responses against sections regenerated from a seed
    Grade {
        /// Seed the plan was generated from
        #[arg(long)]
        seed: String,

        /// Section code to grade (e.g. "arith"); all plan sections if omitted
        #[arg(long)]
        section: Option<String>,

        /// JSON file holding an array of responses
        #[arg(long)]
        responses: PathBuf,

        /// Plan variant: sectioned or hashed (overrides config)
        #[arg(long)]
        variant: Option<String>,

        /// The plan included the code-tracing section
        #[arg(long)]
        coding: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Save the full report JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check one answer against a hashed plan's sealed key
    Verify {
        /// Hashed plan JSON produced by `cogtest plan --variant hashed`
        #[arg(long)]
        plan: PathBuf,

        /// Question id (cloze blanks use `{item}.b{k}`)
        #[arg(long)]
        question: String,

        /// The answer to check
        #[arg(long)]
        answer: String,

        /// Exit code 1 if the answer is incorrect
        #[arg(long)]
        strict: bool,
    },

    /// Generate plans for many seeds and report structural problems
    Validate {
        /// Number of seeds to check
        #[arg(long, default_value = "25")]
        seeds: usize,

        /// Seed prefix; seeds are `{prefix}-{n}`
        #[arg(long, default_value = "validate")]
        prefix: String,

        /// Include the code-tracing section
        #[arg(long)]
        coding: bool,
    },

    /// Create a starter cogtest.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cogtest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Plan {
            seed,
            variant,
            coding,
            public,
            output,
            config,
        } => commands::plan::execute(seed, variant, coding, public, output, config),
        Commands::Grade {
            seed,
            section,
            responses,
            variant,
            coding,
            format,
            output,
            config,
        } => commands::grade::execute(
            seed, section, responses, variant, coding, format, output, config,
        ),
        Commands::Verify {
            plan,
            question,
            answer,
            strict,
        } => commands::verify::execute(plan, question, answer, strict),
        Commands::Validate {
            seeds,
            prefix,
            coding,
        } => commands::validate::execute(seeds, prefix, coding),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
