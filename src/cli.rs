use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cupcake - order cupcakes from the terminal
#[derive(Parser, Debug)]
#[command(name = "cupcake")]
#[command(about = "Walks you through ordering cupcakes: quantity, flavor, pickup date and summary")]
#[command(version)]
pub struct Cli {
    /// Catalog JSON file (flavors, quantities, prices). Built-in catalog if omitted.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Write logs to this file (RUST_LOG controls the level)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive order wizard
    Order {
        /// Append sent orders to this file as JSON lines instead of printing them on exit
        #[arg(long)]
        share_file: Option<PathBuf>,

        /// Step to open on (start, flavor, pickup, summary)
        #[arg(long, default_value = "start")]
        step: String,
    },
    /// Price an order without the wizard
    Quote {
        /// Number of cupcakes (must be offered by the catalog)
        #[arg(short, long)]
        quantity: u32,

        /// Flavor name
        #[arg(short, long)]
        flavor: String,

        /// Pickup option index, 0 = today (same-day surcharge)
        #[arg(short, long, default_value_t = 1)]
        pickup: usize,
    },
    /// Print the catalog as JSON, or validate a catalog file
    Catalog {
        /// Catalog file to validate
        #[arg(long)]
        validate: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_runs_wizard() {
        let cli = Cli::try_parse_from(["cupcake"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.catalog.is_none());
    }

    #[test]
    fn test_quote_arguments() {
        let cli = Cli::try_parse_from([
            "cupcake", "quote", "-q", "12", "-f", "Vanilla", "--pickup", "0",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Quote {
                quantity,
                flavor,
                pickup,
            }) => {
                assert_eq!(quantity, 12);
                assert_eq!(flavor, "Vanilla");
                assert_eq!(pickup, 0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_catalog_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cupcake", "order", "--catalog", "menu.json"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("menu.json")));
    }
}
