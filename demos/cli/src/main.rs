use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rollify_core::{format_absolute, format_relative, parse_unix_ts};

#[derive(Parser, Debug)]
#[command(
    name = "rollify-timefmt",
    about = "Preview the relative and absolute rendering of a unix timestamp."
)]
struct Args {
    /// Unix timestamp in seconds, as stored in the unix-ts attribute.
    #[arg(short, long)]
    unix_ts: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let ts = parse_unix_ts(&args.unix_ts)
        .with_context(|| format!("cannot render timestamp {:?}", args.unix_ts))?;

    println!(
        "Relative: {}\nTooltip:  {}",
        format_relative(ts, Utc::now()),
        format_absolute(ts)
    );

    Ok(())
}
