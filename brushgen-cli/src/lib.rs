/// Command line front end: scene files in, map files out
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use brushgen_core::{parse_map, Result, Scene};

pub mod report;

pub use report::{brush_summary, Reporter};

pub const USAGE: &str = "Usage:
  brushgen [SCENE.json] [--out DIR] [--name FILE]   generate a map
  brushgen inspect MAP                              summarise a map's brushes

Without a scene file the built-in demo brush is generated.";

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate {
        scene: Option<PathBuf>,
        out: Option<PathBuf>,
        name: Option<String>,
    },
    Inspect {
        map: PathBuf,
    },
    Help,
}

impl Command {
    /// Parse arguments, not including the program name
    pub fn parse(args: &[String]) -> std::result::Result<Self, String> {
        match args.first().map(String::as_str) {
            Some("-h") | Some("--help") => return Ok(Command::Help),
            Some("inspect") => {
                return match &args[1..] {
                    [map] => Ok(Command::Inspect { map: PathBuf::from(map) }),
                    _ => Err("inspect takes exactly one map file".to_string()),
                };
            }
            _ => {}
        }

        let mut scene = None;
        let mut out = None;
        let mut name = None;
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--out" => out = Some(PathBuf::from(flag_value(&mut iter, "--out")?)),
                "--name" => name = Some(flag_value(&mut iter, "--name")?.clone()),
                flag if flag.starts_with("--") => return Err(format!("unknown option {}", flag)),
                path if scene.is_none() => scene = Some(PathBuf::from(path)),
                extra => return Err(format!("unexpected argument {}", extra)),
            }
        }

        Ok(Command::Generate { scene, out, name })
    }
}

fn flag_value<'a>(
    iter: &mut impl Iterator<Item = &'a String>,
    flag: &str,
) -> std::result::Result<&'a String, String> {
    iter.next().ok_or_else(|| format!("{} needs a value", flag))
}

/// Build a scene (or the demo) and write its map, creating the output
/// directory if needed. Returns the written path.
pub fn generate(scene: Option<&Path>, out: Option<&Path>, name: Option<&str>) -> Result<PathBuf> {
    let mut scene = match scene {
        Some(path) => {
            log::info!("Loading scene {}", path.display());
            Scene::load(path)?
        }
        None => {
            log::info!("No scene given, generating the demo brush");
            Scene::demo()
        }
    };

    if let Some(dir) = out {
        scene.output.directory = dir.to_path_buf();
    }
    if let Some(name) = name {
        scene.output.file_name = name.to_string();
    }

    // Build before touching the filesystem so a bad brush leaves no trace
    let document = scene.build_document()?;
    fs::create_dir_all(&scene.output.directory)?;
    document.write(&scene.output)
}

/// Parse a map file and describe each brush
pub fn inspect(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    let map = parse_map(&text)?;
    log::info!("Parsed {} brushes from {}", map.brushes.len(), path.display());

    Ok(map
        .brushes
        .iter()
        .enumerate()
        .map(|(i, brush)| brush_summary(i, brush))
        .collect())
}

/// Carry out a command, reporting to `out` and `err`.
///
/// Returns the process exit status. A report that cannot be written (a
/// closed pipe, a full disk) counts as a failure even when the command
/// itself succeeded.
pub fn run<O: Write, E: Write>(command: Command, reporter: &Reporter, out: &mut O, err: &mut E) -> u8 {
    let reported: Result<()> = match command {
        Command::Help => reporter.plain(out, USAGE).map_err(Into::into),
        Command::Generate { scene, out: dir, name } => {
            generate(scene.as_deref(), dir.as_deref(), name.as_deref()).and_then(|path| {
                let message = format!("Successfully created map: {}", path.display());
                Ok(reporter.success(out, &message)?)
            })
        }
        Command::Inspect { map } => inspect(&map).and_then(|lines| {
            lines
                .iter()
                .try_for_each(|line| reporter.plain(out, line))
                .map_err(Into::into)
        }),
    };

    match reported {
        Ok(()) => 0,
        Err(e) => {
            if let Err(write_err) = reporter.failure(err, &e.to_string()) {
                log::error!("Could not report failure: {}", write_err);
            }
            1
        }
    }
}

/// Report a command line that could not be parsed, followed by the usage
pub fn usage_error<E: Write>(reporter: &Reporter, err: &mut E, message: &str) -> io::Result<()> {
    reporter.failure(err, message)?;
    writeln!(err, "\n{}", USAGE)
}
