use clap::Parser;
use pxviewport_lib::batch::{self, Processed, SourceFile};
use pxviewport_lib::generate::viewport_css::OutputOptions;
use pxviewport_lib::options::{PartialOptions, PatternOption};
use pxviewport_lib::PxToViewport;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

const PXVIEWPORT_INTRO: &str = r#"
    pxviewport - px to viewport units for stylesheets
"#;

#[derive(Parser)]
#[command(name = "pxviewport")]
#[command(about = "Convert px lengths in CSS to viewport units")]
struct Args {
    /// Input stylesheets.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file for a single input, or output directory for several.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Options file (TOML, or JSON with a .json extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    viewport_width: Option<f64>,

    #[arg(long)]
    unit_precision: Option<u32>,

    #[arg(long)]
    viewport_unit: Option<String>,

    /// Also emit an `@media (orientation: landscape)` block.
    #[arg(long)]
    landscape: bool,

    #[arg(long)]
    landscape_width: Option<f64>,

    /// Convert rules inside media queries too.
    #[arg(long)]
    media_query: bool,

    /// Keep the original declaration and add the converted one after it.
    #[arg(long)]
    no_replace: bool,

    #[arg(long)]
    min_pixel_value: Option<f64>,

    /// Skip files whose path matches this regex. Repeatable.
    #[arg(long, value_name = "REGEX")]
    exclude: Vec<String>,

    /// Only convert files whose path matches this regex. Repeatable.
    #[arg(long, value_name = "REGEX")]
    include: Vec<String>,

    /// Minify the output.
    #[arg(long)]
    minify: bool,
}

impl Args {
    /// Flags as an options layer; unset flags leave config values alone.
    fn overrides(&self) -> PartialOptions {
        let patterns = |list: &Vec<String>| (!list.is_empty()).then(|| PatternOption::Many(list.clone()));
        PartialOptions {
            viewport_width: self.viewport_width,
            unit_precision: self.unit_precision,
            viewport_unit: self.viewport_unit.clone(),
            landscape: self.landscape.then_some(true),
            landscape_width: self.landscape_width,
            media_query: self.media_query.then_some(true),
            replace: self.no_replace.then_some(false),
            min_pixel_value: self.min_pixel_value,
            exclude: patterns(&self.exclude),
            include: patterns(&self.include),
            ..PartialOptions::default()
        }
    }
}

fn main() {
    env_logger::init();
    eprintln!("{}", PXVIEWPORT_INTRO);

    // parse the args given in terminal
    let args: Args = Args::parse();

    if let Err(message) = run(&args) {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let file_options = match &args.config {
        Some(path) => PartialOptions::from_file(path).map_err(|e| e.to_string())?,
        None => PartialOptions::default(),
    };
    let plugin = PxToViewport::from_partial(file_options.merge(args.overrides())).map_err(|e| e.to_string())?;
    log::debug!("resolved options: {:?}", plugin.options());

    let mut sources = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        let css = fs::read_to_string(path).map_err(|e| format!("reading '{}': {}", path.display(), e))?;
        sources.push(SourceFile {
            path: path.clone(),
            css,
        });
    }

    let output = OutputOptions { minify: args.minify };
    let single = sources.len() == 1;
    let mut failed = false;

    for Processed { path, result } in batch::process_all(sources, &plugin, output) {
        let out = match result {
            Ok(out) => out,
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failed = true;
                continue;
            }
        };
        for warning in &out.report.warnings {
            eprintln!("{}:{}", path.display(), warning);
        }

        match destination(&path, args.output.as_deref(), single) {
            Some(target) => {
                fs::write(&target, &out.css).map_err(|e| format!("writing '{}': {}", target.display(), e))?;
                log::info!("{} -> {}", path.display(), target.display());
            }
            None => io::stdout()
                .write_all(out.css.as_bytes())
                .map_err(|e| format!("writing to stdout: {}", e))?,
        }
    }

    if failed {
        Err("some stylesheets could not be processed".to_string())
    } else {
        Ok(())
    }
}

/// Where the result for `input` goes. `None` means stdout.
fn destination(input: &Path, output: Option<&Path>, single: bool) -> Option<PathBuf> {
    match output {
        Some(file) if single => Some(file.to_path_buf()),
        Some(dir) => Some(dir.join(viewport_file_name(input))),
        None if single => None,
        None => Some(input.with_file_name(viewport_file_name(input))),
    }
}

fn viewport_file_name(input: &Path) -> String {
    let stem = input.file_stem().map_or_else(|| "out".into(), |s| s.to_string_lossy());
    format!("{}.viewport.css", stem)
}
