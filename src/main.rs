use clap::{Parser, Subcommand};
use deck_collage::{config, pipeline, report};
use std::path::PathBuf;

/// Shared arguments for commands that read a deck list.
#[derive(clap::Args, Clone)]
struct DeckArgs {
    /// Deck list: a path to a deck file, or a bare deck name resolved
    /// to <sim-root>/Decks/<name>.deck
    deck: PathBuf,

    /// Simulator installation root (contains OPTCGSim_Data/ and Decks/)
    #[arg(long)]
    sim_root: PathBuf,
}

#[derive(Parser)]
#[command(name = "deck-collage")]
#[command(about = "Deck collage image generator for the OPTCG simulator")]
#[command(long_about = "\
Deck collage image generator for the OPTCG simulator

The simulator's installation tree is the data source. Card art is read from
the simulator's asset directory, deck lists are plain text, and the output
is a single grid image with one cell per card copy.

Simulator tree:

  <sim-root>/
  ├── OPTCGSim_Data/
  │   └── StreamingAssets/
  │       └── Cards/               # Card art, one directory per set
  │           ├── OP01/
  │           │   ├── OP01-001.png # .png preferred, .jpg fallback
  │           │   └── OP01-025.jpg
  │           └── ST01/
  │               └── ST01-012.png
  └── Decks/
      └── lunch.deck               # Deck lists saved by the simulator

Deck list format (one entry per line, anything else is ignored):

  4xOP01-001 Roronoa Zoro          # quantity x code, trailing name ignored
  2xST01-012

Run 'deck-collage gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the collage image from a deck list
    Build(BuildArgs),
    /// Parse a deck list and report asset resolution without building
    Check(DeckArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct BuildArgs {
    #[command(flatten)]
    target: DeckArgs,

    /// Output directory for the collage image
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Layout config file (TOML); built-in defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build(args) => {
            let config = config::load_config(args.config.as_deref())?;
            let deck_path = pipeline::resolve_deck_path(&args.target.sim_root, &args.target.deck);

            println!("==> Building {}", deck_path.display());
            let outcome =
                pipeline::build(&args.target.sim_root, &deck_path, &args.output, &config)?;
            report::print_build_summary(&outcome, &config.layout);
        }
        Command::Check(args) => {
            let deck_path = pipeline::resolve_deck_path(&args.sim_root, &args.deck);

            println!("==> Checking {}", deck_path.display());
            let inventory = pipeline::check(&args.sim_root, &deck_path)?;
            report::print_check_output(&inventory);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
