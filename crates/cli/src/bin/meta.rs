use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;
use vidkit_core::logging::init_logging;
use vidkit_core::metadata::{generate_metadata, preview, TitleStyle};

/// Characters of each description shown in the list view
const DESCRIPTION_PREVIEW: usize = 80;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StyleArg {
    Casual,
    Professional,
    Trendy,
}

impl From<StyleArg> for TitleStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Casual => TitleStyle::Casual,
            StyleArg::Professional => TitleStyle::Professional,
            StyleArg::Trendy => TitleStyle::Trendy,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "vidkit-meta")]
#[command(about = "Generate random video metadata", long_about = None)]
#[command(version)]
struct Args {
    /// Video topic
    #[arg(short, long, default_value = "Video")]
    topic: String,

    /// Number of titles
    #[arg(short = 'n', long, default_value_t = 5)]
    count: usize,

    /// Title style
    #[arg(short, long, value_enum, default_value_t = StyleArg::Casual)]
    style: StyleArg,

    /// Also generate descriptions
    #[arg(long)]
    desc: bool,

    /// Print a JSON array instead of a numbered list
    #[arg(long)]
    json: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut rng = match args.seed {
        Some(seed) => {
            debug!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let items = generate_metadata(
        &mut rng,
        &args.topic,
        args.count,
        args.style.into(),
        args.desc,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!("\nRandom titles for '{}':\n", args.topic);
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item.title);
        if let Some(description) = &item.description {
            println!(
                "   Description: {}\n",
                preview(description, DESCRIPTION_PREVIEW)
            );
        }
    }
    Ok(())
}
