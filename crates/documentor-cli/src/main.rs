use documentor_core::{FsPathValidator, LaunchOptions, PreferenceStore, Preferences};
use documentor_preview::{
    BaseUriUserAgent, Canvas, LayoutContext, ReplacedElement, XhtmlDocument,
    XhtmlNamespaceHandler, preview_factory, resolve_images,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(documentor_core::Error),
    Preview(documentor_preview::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Preview(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<documentor_core::Error> for CliError {
    fn from(value: documentor_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<documentor_preview::Error> for CliError {
    fn from(value: documentor_preview::Error) -> Self {
        Self::Preview(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Default)]
enum Command {
    #[default]
    Preview,
    Prefs,
    Launch(Vec<String>),
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    interactive: bool,
    out: Option<PathBuf>,
    store: Option<PathBuf>,
}

fn usage() -> &'static str {
    "documentor-cli\n\
\n\
USAGE:\n\
  documentor-cli [preview] [--pretty] [--interactive] [--out <dir>] <page.xhtml>\n\
  documentor-cli prefs [--pretty] [--store <path>]\n\
  documentor-cli [--pretty] launch [-root <path>] [-target <path>] [-html | -chm] [-D <condition>]...\n\
\n\
NOTES:\n\
  - preview resolves every <img> of an XHTML page and prints the replaced elements as JSON.\n\
  - preview --out writes each SVG viewport as <dir>/image-<n>.png at its resolved size.\n\
  - prefs prints the stored preferences (defaults when --store is omitted or missing).\n\
  - launch prints how the editor would start; everything after `launch` is a launch option.\n\
  - set RUST_LOG (e.g. RUST_LOG=debug) to see resolution decisions on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "preview" => args.command = Command::Preview,
            "prefs" => args.command = Command::Prefs,
            "launch" => {
                args.command = Command::Launch(it.by_ref().cloned().collect());
            }
            "--pretty" => args.pretty = true,
            "--interactive" => args.interactive = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(PathBuf::from(out));
            }
            "--store" => {
                let Some(store) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.store = Some(PathBuf::from(store));
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_log() {
    let mut filter = EnvFilter::default().add_directive(tracing::Level::WARN.into());

    if let Ok(env) = std::env::var("RUST_LOG") {
        if let Ok(env) = env.parse() {
            filter = filter.add_directive(env);
        }
    }

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

#[derive(Serialize)]
struct ImageOut {
    element: usize,
    source: Option<String>,
    kind: Option<&'static str>,
    width: Option<u32>,
    height: Option<u32>,
    png: Option<PathBuf>,
}

fn run_preview(args: &Args) -> Result<(), CliError> {
    let Some(input) = args.input.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let text = std::fs::read_to_string(input)?;
    let base = BaseUriUserAgent::for_path(Path::new(input)).base().cloned();
    let doc = XhtmlDocument::parse(&text, base)?;

    let handler = XhtmlNamespaceHandler;
    let mut factory = preview_factory();
    let mut canvas = Canvas::new();
    let resolved = if args.interactive {
        let mut ctx = LayoutContext::interactive(&handler, &mut canvas);
        resolve_images(&doc, &mut factory, &mut ctx)
    } else {
        let mut ctx = LayoutContext::new(&handler);
        resolve_images(&doc, &mut factory, &mut ctx)
    };
    tracing::debug!(
        images = resolved.len(),
        attached = canvas.len(),
        "resolved preview page"
    );

    if let Some(dir) = &args.out {
        std::fs::create_dir_all(dir)?;
    }

    let mut out = Vec::with_capacity(resolved.len());
    for (n, image) in resolved.iter().enumerate() {
        let replacement = image.replacement.as_ref();
        let kind = replacement.map(|r| match r {
            ReplacedElement::Svg(_) => "svg",
            ReplacedElement::Delegated(_) => "image",
        });
        let size = replacement.map(ReplacedElement::size);

        let mut png = None;
        if let (Some(dir), Some(svg)) = (&args.out, replacement.and_then(|r| r.as_svg())) {
            let path = dir.join(format!("image-{}.png", n + 1));
            match svg.viewport().render_png(Some(tiny_skia::Color::WHITE)) {
                Ok(bytes) => {
                    std::fs::write(&path, bytes)?;
                    png = Some(path);
                }
                Err(err) => {
                    tracing::warn!(
                        locator = %svg.viewport().url(),
                        error = %err,
                        "SVG viewport not rendered"
                    );
                }
            }
        }

        out.push(ImageOut {
            element: image.element_id.0,
            source: image.source.clone(),
            kind,
            width: size.map(|s| s.width),
            height: size.map(|s| s.height),
            png,
        });
    }

    write_json(&out, args.pretty)
}

#[derive(Serialize)]
struct PrefsOut<'a> {
    path: Option<&'a Path>,
    preferences: &'a Preferences,
    mercurial_path_valid: bool,
    chm_compiler_path_valid: bool,
}

fn run_prefs(args: &Args) -> Result<(), CliError> {
    let store = match &args.store {
        Some(path) => PreferenceStore::open(path)?,
        None => PreferenceStore::in_memory(Preferences::default()),
    };
    let prefs = store.get();
    let out = PrefsOut {
        path: store.path(),
        preferences: prefs,
        mercurial_path_valid: prefs.has_valid_mercurial_path(&FsPathValidator),
        chm_compiler_path_valid: prefs.has_valid_chm_compiler_path(&FsPathValidator),
    };
    write_json(&out, args.pretty)
}

#[derive(Serialize)]
struct ExportOut<'a> {
    format: &'static str,
    root: &'a Path,
    target: &'a Path,
}

#[derive(Serialize)]
struct LaunchOut<'a> {
    root: Option<&'a Path>,
    target: Option<&'a Path>,
    export: Option<ExportOut<'a>>,
    conditions: Vec<&'a str>,
}

fn run_launch(launch_args: &[String], pretty: bool) -> Result<(), CliError> {
    let opts = LaunchOptions::parse(launch_args)?;
    let request = opts.export_request();
    let out = LaunchOut {
        root: opts.initial_root(),
        target: opts.export_target(),
        export: request.as_ref().map(|r| ExportOut {
            format: r.format.target_name(),
            root: &r.root,
            target: &r.target,
        }),
        conditions: opts.conditions().iter().collect(),
    };
    write_json(&out, pretty)
}

fn run(args: Args) -> Result<(), CliError> {
    match &args.command {
        Command::Preview => run_preview(&args),
        Command::Prefs => run_prefs(&args),
        Command::Launch(rest) => run_launch(rest, args.pretty),
    }
}

fn main() {
    init_log();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(CliError::Core(err @ documentor_core::Error::Usage { .. })) => {
            eprintln!("{err}\n\n{}", documentor_core::launch::usage());
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
