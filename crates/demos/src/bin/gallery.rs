//! Replay a pointer session against the gallery scene and print the frames.

use std::{fs, io, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use bramble::{Screen, Theme, backend::record::Recorder, geom::Vec2};
use bramble_demos::{
    gallery::{Gallery, register_images, sample_images},
    script::{DEFAULT_SCRIPT, Player, parse},
};
use clap::Parser;

/// CLI flags for the gallery demo.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Script to replay. Defaults to a short built-in session.
    script: Option<PathBuf>,

    /// Screen width.
    #[clap(long, default_value_t = 1024)]
    width: i32,

    /// Screen height.
    #[clap(long, default_value_t = 768)]
    height: i32,

    /// JSON theme overrides.
    #[clap(short, long)]
    theme: Option<PathBuf>,

    /// Log tree activity to stderr.
    #[clap(short, long)]
    verbose: bool,
}

/// Run the gallery demo.
fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(tracing::Level::TRACE)
            .without_time()
            .compact()
            .init();
    }

    let theme = match &args.theme {
        Some(path) => {
            let src = fs::read_to_string(path)
                .with_context(|| format!("reading theme {}", path.display()))?;
            Theme::from_json(&src)?
        }
        None => Theme::default(),
    };
    let script = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        None => DEFAULT_SCRIPT.to_string(),
    };
    let steps = parse(&script)?;

    let images = sample_images();
    let mut recorder = Recorder::new();
    register_images(&mut recorder, &images);
    let size = Vec2::new(args.width, args.height);
    let mut screen = Screen::with_theme(recorder, size, Rc::new(theme));
    let gallery = Gallery::build(&mut screen, &images)?;

    let mut player = Player::new(&mut screen, &gallery, io::stdout().lock());
    player.run(&steps)?;
    tracing::debug!("replayed {} steps, {} frames", steps.len(), player.frames());
    Ok(())
}
