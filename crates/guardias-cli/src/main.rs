mod cmd;
mod output;
mod store;

use clap::{Parser, Subcommand, ValueEnum};
use guardias_core::KeyStyle;
use guardias_telegram::client::DEFAULT_API_URL;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "guardias",
    about = "Guard duty bot: register weekly on-call shifts and report them by month",
    version,
    propagate_version = true
)]
struct Cli {
    /// Shift file (default: ./guardias.json)
    #[arg(long, global = true, env = "GUARDIAS_FILE")]
    file: Option<PathBuf>,

    /// Keep shifts in memory only; nothing is written to disk
    #[arg(long, global = true)]
    memory: bool,

    /// How shifts are grouped in the shift file
    #[arg(
        long,
        global = true,
        env = "GUARDIAS_KEY_STYLE",
        value_enum,
        default_value_t = KeyStyleArg::Date
    )]
    key_style: KeyStyleArg,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyStyleArg {
    /// Group by start date (2024-12-25)
    Date,
    /// Group by ISO week (2024-W52)
    IsoWeek,
}

impl From<KeyStyleArg> for KeyStyle {
    fn from(arg: KeyStyleArg) -> Self {
        match arg {
            KeyStyleArg::Date => KeyStyle::Date,
            KeyStyleArg::IsoWeek => KeyStyle::IsoWeek,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot and the health-check server
    Serve {
        /// Bot token from @BotFather
        #[arg(long, env = "TELEGRAM_TOKEN", hide_env_values = true)]
        token: String,

        /// Port for the health-check server
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,

        /// Bot API base URL
        #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,
    },

    /// Register a shift (and optionally the following weeks)
    Add {
        /// Person on duty
        person: String,
        /// First day of the shift, YYYY-MM-DD
        date: String,
        /// Number of consecutive weekly shifts
        #[arg(long, short = 'w', default_value = "1", allow_negative_numbers = true)]
        weeks: i64,
    },

    /// Show shifts starting in a month (default: current month)
    Month {
        /// Month number, 1-12
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        /// Year, e.g. 2024 (default: current year)
        #[arg(long, short = 'y')]
        year: Option<i32>,
    },

    /// List every registered shift
    List,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let backend = store::resolve_backend(cli.file.as_deref(), cli.memory);
    let key_style = KeyStyle::from(cli.key_style);

    let result = match cli.command {
        Commands::Serve {
            token,
            port,
            api_url,
        } => cmd::serve::run(backend, key_style, &token, port, &api_url),
        Commands::Add {
            person,
            date,
            weeks,
        } => cmd::add::run(backend, key_style, &person, &date, weeks, cli.json),
        Commands::Month { month, year } => {
            cmd::month::run(backend, key_style, year, month, cli.json)
        }
        Commands::List => cmd::list::run(backend, key_style, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
