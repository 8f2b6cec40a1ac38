use std::ffi::OsString;

pub use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(version, about = "A CLI tool to test APIs from the terminal", long_about = None)]
struct ClapArgs {
    #[command(subcommand)]
    command: Option<Mode>,

    /// Print the request line to stderr (get/post only)
    #[arg(short, long, global = true, help = "verbose output")]
    verbose: bool,
}

/// What the binary should do
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Launch the interactive form (default)
    Tui,
    /// Send a GET request to the specified URL
    Get { url: String },
    /// Send a POST request with a JSON body
    Post { url: String, json: String },
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    mode: Mode,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from_clap(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_clap(ClapArgs::parse_from(itr))
    }

    fn from_clap(args: ClapArgs) -> Self {
        Self {
            mode: args.command.unwrap_or(Mode::Tui),
            verbose: args.verbose,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
