use std::{fs, path::PathBuf};

use clap::{Parser, ValueEnum};
use glob::glob;
use miette::{IntoDiagnostic, Result, WrapErr, miette};
use rustc_hash::FxHashSet;
use tonify::ToneColors;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(about = "Annotate Chinese text with pinyin readings, colored by tone")]
struct Cli {
    /// Input paths or glob patterns (can be repeated), e.g. 'notes/*.txt'
    inputs: Vec<String>,

    /// Output directory
    #[arg(long, short = 'o')]
    out_dir: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = Emit::Html)]
    emit: Emit,

    /// JSON file with tone colors; entries it omits keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Color for first-tone syllables
    #[arg(long)]
    tone1: Option<String>,

    /// Color for second-tone syllables
    #[arg(long)]
    tone2: Option<String>,

    /// Color for third-tone syllables
    #[arg(long)]
    tone3: Option<String>,

    /// Color for fourth-tone syllables
    #[arg(long)]
    tone4: Option<String>,

    /// Color for neutral-tone and unrecognized syllables
    #[arg(long)]
    tone0: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Standalone page with <ruby> readings over each character.
    Html,
    /// The raw annotation sequence, for an external renderer.
    Json,
}

fn main() -> Result<()> {
    let indicatif_layer = IndicatifLayer::new();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tonify=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    let cli = Cli::parse();
    let colors = load_colors(&cli)?;

    let mut input_paths: FxHashSet<PathBuf> = FxHashSet::default();

    for pattern in &cli.inputs {
        let entries = glob(pattern)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to expand glob pattern: {pattern:?}"))?;

        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    input_paths.insert(path);
                }
                _ => {}
            }
        }
    }

    if input_paths.is_empty() {
        return Err(miette!("No input files found"));
    }

    if !cli.out_dir.exists() {
        fs::create_dir_all(&cli.out_dir)
            .into_diagnostic()
            .wrap_err_with(|| miette!("Failed to create out-dir: {:?}", cli.out_dir))?;
    }

    run(&cli, &colors, input_paths.into_iter().collect())
}

/// Merge tone colors: documented defaults, then the config file, then any
/// individual flags. The core only ever sees the fully merged snapshot.
fn load_colors(cli: &Cli) -> Result<ToneColors> {
    let mut colors = match &cli.config {
        Some(path) => {
            let data = fs::read_to_string(path)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to read config file: {path:?}"))?;

            serde_json::from_str(&data)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to parse config file: {path:?}"))?
        }
        None => ToneColors::default(),
    };

    if let Some(color) = &cli.tone1 {
        colors.tone1 = color.clone();
    }
    if let Some(color) = &cli.tone2 {
        colors.tone2 = color.clone();
    }
    if let Some(color) = &cli.tone3 {
        colors.tone3 = color.clone();
    }
    if let Some(color) = &cli.tone4 {
        colors.tone4 = color.clone();
    }
    if let Some(color) = &cli.tone0 {
        colors.tone0 = color.clone();
    }

    Ok(colors)
}

#[cfg(not(feature = "mandarin"))]
fn run(_cli: &Cli, _colors: &ToneColors, _input_paths: Vec<PathBuf>) -> Result<()> {
    Err(miette!(
        "tonify was built without a romanizer; enable the `mandarin` feature"
    ))
}

#[cfg(feature = "mandarin")]
fn run(cli: &Cli, colors: &ToneColors, input_paths: Vec<PathBuf>) -> Result<()> {
    use indicatif::ProgressStyle;
    use rayon::prelude::*;
    use tonify::romanizer::mandarin::MandarinRomanizer;
    use tracing::{info, info_span};
    use tracing_indicatif::span_ext::IndicatifSpanExt;

    let romanizer = MandarinRomanizer;

    info!(
        "Annotating {} inputs -> {:?}...",
        input_paths.len(),
        cli.out_dir
    );

    let inputs_span = info_span!("annotate_inputs");
    inputs_span.pb_set_style(
        &ProgressStyle::with_template(
            "{msg} [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise}]",
        )
        .unwrap(),
    );
    inputs_span.pb_set_length(input_paths.len() as u64);
    inputs_span.pb_set_message("Annotating inputs");

    let inputs_span_enter = inputs_span.enter();

    input_paths
        .par_iter()
        .map(|in_path| {
            let result = process_text(cli, &romanizer, colors, in_path);
            inputs_span.pb_inc(1);
            result
        })
        .collect::<Result<Vec<()>>>()?;

    drop(inputs_span_enter);
    drop(inputs_span);

    info!("Done annotating inputs.");

    Ok(())
}

#[cfg(feature = "mandarin")]
fn process_text(
    cli: &Cli,
    romanizer: &tonify::romanizer::mandarin::MandarinRomanizer,
    colors: &ToneColors,
    in_path: &std::path::Path,
) -> Result<()> {
    use tonify::{annotate_range, render};
    use tracing::info;

    let text = fs::read_to_string(in_path)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to read input file: {in_path:?}"))?;

    let file_stem = in_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| miette!("Invalid file name: {in_path:?}"))?;

    // The CLI has no viewport; the window is the whole file.
    let end = text.encode_utf16().count();
    let annotations = annotate_range(&text, 0, end, romanizer, colors);

    info!(
        "Annotated {} characters in {:?}",
        annotations.len(),
        in_path
    );

    let (out_name, output) = match cli.emit {
        Emit::Html => {
            let fragment = render::render_fragment(&text, &annotations);
            (
                format!("{file_stem}.html"),
                render::render_page(file_stem, &fragment),
            )
        }
        Emit::Json => {
            let json = serde_json::to_string_pretty(&annotations)
                .into_diagnostic()
                .wrap_err_with(|| miette!("Failed to serialize annotations for {in_path:?}"))?;

            (format!("{file_stem}.json"), json)
        }
    };

    let out_path = cli.out_dir.join(out_name);

    fs::write(&out_path, output)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Failed to write output file: {out_path:?}"))?;

    info!("Wrote {out_path:?}");

    Ok(())
}
