//! Command-line front end: decode and render map files, or generate and
//! save new ones.

use std::fs;

use anyhow::{bail, Context, Result};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;

use mazemap::map::decoder::MapDecoder;
use mazemap::map::encoder::MapEncoder;
use mazemap::map::generator::MazeGenerator;
use mazemap::rng::MazeRng;

const USAGE: &str = "Usage: mazemap decode <file.map>
       mazemap generate <width> <height> <warps> [seed] [out.map]";

fn main() -> Result<()> {
    // Setup tracing; silent unless RUST_LOG asks for output.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).expect("Could not set global default");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        Some((command, rest)) => match command.as_str() {
            "decode" => {
                let [path] = rest else {
                    eprintln!("{USAGE}");
                    bail!("decode takes exactly one file argument");
                };
                decode(path)
            }
            "generate" => generate(rest),
            // A bare filename is shorthand for decode.
            path if rest.is_empty() => decode(path),
            _ => {
                eprintln!("{USAGE}");
                bail!("unrecognized arguments");
            }
        },
        None => {
            eprintln!("{USAGE}");
            bail!("missing command");
        }
    }
}

fn decode(path: &str) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {path}"))?;
    let map = MapDecoder::decode(&bytes).with_context(|| format!("failed to decode {path}"))?;
    print!("{map}");
    Ok(())
}

fn generate(args: &[String]) -> Result<()> {
    let [width, height, warps, rest @ ..] = args else {
        eprintln!("{USAGE}");
        bail!("generate takes <width> <height> <warps>");
    };
    let width: u8 = width.parse().context("width must be 1-255")?;
    let height: u8 = height.parse().context("height must be 1-255")?;
    let warps: u8 = warps.parse().context("warps must be 0-255")?;

    let mut rest = rest.iter();
    let seed = rest
        .next()
        .map(|raw| raw.parse::<u64>())
        .transpose()
        .context("seed must be an unsigned integer")?;
    let out = rest.next();

    let mut rng = match seed {
        Some(seed) => MazeRng::new(seed),
        None => MazeRng::from_entropy(),
    };
    let map = MazeGenerator::generate(width, height, warps, &mut rng)?;
    print!("{map}");
    eprintln!("seed: {}", rng.seed());

    if let Some(path) = out {
        fs::write(path, MapEncoder::encode(&map)).with_context(|| format!("failed to write {path}"))?;
    }
    Ok(())
}
