//! The `colorjson colorize` command for highlighting existing JSON logs.

use clap::Args;
use colorjson_core::{colorize, ColorScheme, Config, Palette};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

/// Arguments for the `colorize` command.
#[derive(Args, Debug)]
pub struct ColorizeArgs {
    /// JSON lines file to read (defaults to stdin)
    pub input: Option<PathBuf>,

    /// Color scheme (default, dim, vivid, plain)
    #[arg(long)]
    pub scheme: Option<String>,

    /// Colorize even when stdout is not a terminal
    #[arg(long)]
    pub always: bool,
}

/// Execute the colorize command.
pub fn execute(args: ColorizeArgs, config: &Config) -> anyhow::Result<()> {
    let palette = match &args.scheme {
        Some(name) => ColorScheme::parse(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown color scheme '{name}'"))?
            .palette(),
        None => config.palette()?,
    };
    let stdout_is_term = console::Term::stdout().is_term();
    let palette = if args.always || crate::logging::color_enabled(stdout_is_term) {
        palette
    } else {
        Palette::PLAIN
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", path.display()))?;
            colorize_lines(BufReader::new(file), &mut out, &palette)?
        }
        None => colorize_lines(io::stdin().lock(), &mut out, &palette)?,
    };

    tracing::debug!(lines = count, "Colorize finished");
    Ok(())
}

/// Colorize each non-blank line of `input` into `out`, returning the count.
pub fn colorize_lines<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    palette: &Palette,
) -> io::Result<usize> {
    let mut count = 0;
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut colored = colorize(trimmed, palette);
        colored.push('\n');
        out.write_all(colored.as_bytes())?;
        count += 1;
    }
    out.flush()?;
    Ok(count)
}
