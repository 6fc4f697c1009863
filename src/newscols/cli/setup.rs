use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "newscols", bin_name = "newscols", version)]
#[command(
    about = "Edit and inspect multi-column text blocks in stored documents",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the documents (defaults to the current directory)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a columns block to a document, creating the document if needed
    New {
        /// Document name
        document: String,

        /// Block type (defaults to the configured default-block)
        #[arg(short, long)]
        block: Option<String>,
    },

    /// Change attributes of a block, e.g. `columnCount=3`
    Set {
        /// Document name
        document: String,

        /// Block number (1-based)
        block: usize,

        /// Assignments in name=value form
        #[arg(required = true, num_args = 1..)]
        assignments: Vec<String>,
    },

    /// Print the derived style of one block or of all blocks
    Style {
        /// Document name
        document: String,

        /// Block number (1-based)
        block: Option<usize>,
    },

    /// List documents, or the blocks of one document
    #[command(alias = "ls")]
    Show {
        /// Document name
        document: Option<String>,
    },

    /// Compare stored styles with what the attributes derive
    Check {
        /// Document name
        document: String,

        /// Re-render drifted blocks and save the document
        #[arg(long)]
        heal: bool,
    },

    /// Print the attribute schema
    Schema {
        /// Restrict to one block type
        #[arg(short, long)]
        block: Option<String>,
    },

    /// Get or set configuration values
    Config {
        /// Configuration key (e.g., default-block, document-ext)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("newscols").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn set_takes_many_assignments() {
        let cli = parse(&["set", "post", "2", "columnCount=3", "textColor=#222"]);
        match cli.command {
            Some(Commands::Set {
                document,
                block,
                assignments,
            }) => {
                assert_eq!(document, "post");
                assert_eq!(block, 2);
                assert_eq!(assignments, vec!["columnCount=3", "textColor=#222"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn set_requires_an_assignment() {
        assert!(Cli::try_parse_from(["newscols", "set", "post", "1"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["style", "post", "--json", "-v", "--dir", "/tmp/docs"]);
        assert!(cli.json);
        assert!(cli.verbose);
        assert_eq!(cli.dir, Some(PathBuf::from("/tmp/docs")));
    }

    #[test]
    fn naked_invocation_has_no_command() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn check_heal_flag() {
        match parse(&["check", "post", "--heal"]).command {
            Some(Commands::Check { heal, .. }) => assert!(heal),
            other => panic!("unexpected {:?}", other),
        }
    }
}
