#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cairo-backend")]
use rxn_coords::ChartResult;
#[cfg(feature = "cairo-backend")]
use rxn_coords::figure::{
    Figure, ReactionFigureJob, delta_bar_figure, step_figure, step_with_inset_figure,
};

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    job_path: Option<PathBuf>,
    out_dir: PathBuf,
}

#[cfg(feature = "cairo-backend")]
type FigureBuilder = fn(&ReactionFigureJob) -> ChartResult<Figure>;

#[cfg(feature = "cairo-backend")]
const OUTPUTS: [(&str, FigureBuilder); 3] = [
    ("delta_es.png", delta_bar_figure),
    ("es.png", step_figure),
    ("es_delta_es_inset.png", step_with_inset_figure),
];

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = rxn_coords::telemetry::init_tracing_with_fallback("rxn_coords=info");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let args = parse_args()?;
    let job = match &args.job_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read job `{}`: {err}", path.display()))?;
            ReactionFigureJob::from_json(&raw).map_err(|err| err.to_string())?
        }
        None => ReactionFigureJob::default(),
    };

    fs::create_dir_all(&args.out_dir).map_err(|err| {
        format!(
            "failed to create output dir `{}`: {err}",
            args.out_dir.display()
        )
    })?;

    for (file_name, build) in OUTPUTS {
        let path = args.out_dir.join(file_name);
        build(&job)
            .and_then(|figure| write_png(&figure, &path))
            .map_err(|err| format!("{file_name}: {err}"))?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_png(figure: &Figure, path: &Path) -> ChartResult<()> {
    use rxn_coords::render::{CairoRenderer, Renderer};

    let frame = figure.layout()?;
    let mut renderer = CairoRenderer::for_frame(&frame)?;
    renderer.render(&frame)?;
    renderer.write_png(path)
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut job_path = None;
    let mut out_dir = PathBuf::from(".");

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--job" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --job".to_owned())?;
                job_path = Some(PathBuf::from(value));
            }
            "--out-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out-dir".to_owned())?;
                out_dir = PathBuf::from(value);
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs { job_path, out_dir })
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> &'static str {
    "usage: render_rxn_figures [--job <job.json>] [--out-dir <dir>]\n\
     writes delta_es.png, es.png and es_delta_es_inset.png"
}
