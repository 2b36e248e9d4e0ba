//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for `ask`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every response, formatted for the terminal
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for llm-fanout
#[derive(Parser, Debug)]
#[command(name = "llm-fanout")]
#[command(author, version, about = "Send one prompt to several LLM services at once")]
#[command(long_about = r#"
llm-fanout sends a prompt to every configured LLM service in parallel and
returns whichever answers arrive. The latest set of answers is kept for ten
minutes so one designated service can write a comparison of them.

Configuration files are loaded from (in priority order):
1. FANOUT_* environment variables
2. --config <path>     Explicit config file
3. ./fanout.toml       Project-level config
4. ~/.config/llm-fanout/config.toml   Global config

Example:
  llm-fanout serve --port 9000
  llm-fanout ask "What's the weather like on Mars?" --compare
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Interface to bind (overrides [server] host)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind (overrides [server] port)
    #[arg(long, value_name = "PORT")]
    pub port: Option<u16>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Fan one prompt out from the terminal
    Ask {
        /// The prompt to send
        prompt: String,

        /// Follow up with a comparison from the designated service
        #[arg(long)]
        compare: bool,

        /// System instructions sent with the prompt
        #[arg(long, value_name = "TEXT")]
        instructions: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "full")]
        output: OutputFormat,
    },
}

impl Cli {
    /// The subcommand to run; `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_is_the_default() {
        let cli = Cli::parse_from(["llm-fanout", "--port", "9000"]);
        assert_eq!(cli.command(), Command::Serve);
        assert_eq!(cli.port, Some(9000));
    }

    #[test]
    fn test_ask_with_flags() {
        let cli = Cli::parse_from([
            "llm-fanout",
            "ask",
            "weather?",
            "--compare",
            "-o",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.command(),
            Command::Ask {
                prompt: "weather?".to_string(),
                compare: true,
                instructions: None,
                output: OutputFormat::Json,
            }
        );
    }

    #[test]
    fn test_ask_requires_prompt() {
        assert!(Cli::try_parse_from(["llm-fanout", "ask"]).is_err());
    }
}
