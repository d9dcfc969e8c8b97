use clap::Parser;

/// Safe calculator: evaluates arithmetic over a fixed whitelist of operators,
/// math functions and constants.
#[derive(Parser, Debug)]
#[command(name = "safecalc", version)]
pub struct Cli {
    /// Evaluate EXPRESSION, print the result and exit
    #[arg(
        short,
        long,
        value_name = "EXPRESSION",
        allow_hyphen_values = true,
        conflicts_with = "test"
    )]
    pub expr: Option<String>,

    /// Run the built-in self-tests
    #[arg(long)]
    pub test: bool,

    /// Start the full-screen interactive mode instead of the line REPL
    #[cfg(feature = "tui")]
    #[arg(long, conflicts_with_all = ["expr", "test"])]
    pub tui: bool,

    /// Number of entries shown by the `history` command
    #[arg(long, value_name = "N", default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    OneShot,
    SelfTest,
    Repl,
    #[cfg(feature = "tui")]
    Tui,
}

/// Settings the shells run with, resolved from the command line.
#[derive(Debug, Clone)]
pub struct Config {
    pub history_limit: usize,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_limit: DEFAULT_HISTORY_LIMIT,
            prompt: "calc> ".to_string(),
        }
    }
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.test {
            return Mode::SelfTest;
        }
        if self.expr.is_some() {
            return Mode::OneShot;
        }
        #[cfg(feature = "tui")]
        if self.tui {
            return Mode::Tui;
        }
        Mode::Repl
    }

    pub fn config(&self) -> Config {
        Config {
            history_limit: self.history_limit,
            ..Config::default()
        }
    }

    /// Default log filter when RUST_LOG is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
