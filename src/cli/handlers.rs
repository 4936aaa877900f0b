// FILE: src/cli/handlers.rs
use crate::{cli::OutputFormat, PrefixerError, Prefixer, ProcessStats, Result};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Instant;

const STDIN: &str = "-";

// --- PROCESS ---
pub fn handle_process_command(cli: &super::Cli, matches: &clap::ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .map(String::as_str)
        .unwrap_or(STDIN);
    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .or_else(|| cli.output_directory())
        .map(PathBuf::from);

    let prefixer = Prefixer::new(&cli.requirements(matches))?
        .with_options(cli.build_process_options(matches));
    let show_stats = matches.get_flag("stats");

    if input == STDIN {
        return process_stdin(&prefixer, output.as_deref(), show_stats);
    }

    let input = Path::new(input);
    if matches.get_flag("recursive") && input.is_dir() {
        process_directory(&prefixer, input, output.as_deref(), show_stats)
    } else if matches.get_flag("watch") {
        watch_and_process(&prefixer, input, output.as_deref())
    } else {
        let stats = process_single_file(&prefixer, input, output.as_deref())?;
        if show_stats {
            print_stats(&stats);
        }
        Ok(())
    }
}

fn process_stdin(prefixer: &Prefixer, output: Option<&Path>, show_stats: bool) -> Result<()> {
    let mut css = String::new();
    io::stdin().read_to_string(&mut css)?;

    let (result, stats) = prefixer.process_with_stats(&css)?;
    write_output(output, &result)?;
    if show_stats {
        print_stats(&stats);
    }
    Ok(())
}

/// Without an output path the result goes to stdout
fn process_single_file(prefixer: &Prefixer, input: &Path, output: Option<&Path>) -> Result<ProcessStats> {
    match output {
        Some(output) => {
            let output = if output.is_dir() {
                output.join(input.file_name().unwrap_or(input.as_os_str()))
            } else {
                output.to_path_buf()
            };
            prefixer.process_file(input, &output)
        }
        None => {
            let css = fs::read_to_string(input).map_err(|e| PrefixerError::FileNotFound {
                path: format!("{}: {}", input.display(), e),
            })?;
            let mut options = prefixer.options().clone();
            options.filename = Some(input.display().to_string());
            let (result, stats) = crate::transform_with_options(&css, prefixer.plan(), &options)?;
            write_output(None, &result)?;
            Ok(stats)
        }
    }
}

/// Every `*.css` file below `input`, mirrored into `output` or rewritten in place
fn process_directory(
    prefixer: &Prefixer,
    input: &Path,
    output: Option<&Path>,
    show_stats: bool,
) -> Result<()> {
    let start = Instant::now();
    let mut total = ProcessStats::default();
    let files = collect_css_files(input)?;

    for file in &files {
        let target = mirrored_path(input, file, output);
        let stats = prefixer.process_file(file, &target)?;
        println!("✅ {} -> {}", file.display(), target.display());
        total.merge(&stats);
    }

    println!(
        "Processed {} files in {}ms",
        files.len(),
        start.elapsed().as_millis()
    );
    if show_stats {
        print_stats(&total);
    }
    Ok(())
}

fn watch_and_process(prefixer: &Prefixer, input: &Path, output: Option<&Path>) -> Result<()> {
    println!("👀 Watching {} for changes...", input.display());

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if let Err(e) = tx.send(event) {
                    eprintln!("Watch error: {}", e);
                }
            }
        },
        notify::Config::default(),
    )
    .map_err(|e| watch_error("Failed to create file watcher", e))?;

    watcher
        .watch(input, RecursiveMode::NonRecursive)
        .map_err(|e| watch_error("Failed to watch file", e))?;

    if let Err(e) = process_single_file(prefixer, input, output) {
        eprintln!("❌ Initial processing failed: {}", e);
    }

    loop {
        match rx.recv() {
            Ok(event) => {
                if !(event.kind.is_modify() || event.kind.is_create()) {
                    continue;
                }
                log::info!("{} changed, reprocessing", input.display());
                let start = Instant::now();
                match process_single_file(prefixer, input, output) {
                    Ok(stats) => eprintln!(
                        "✅ Reprocessed (+{} -{} declarations, {}ms)",
                        stats.declarations_added,
                        stats.declarations_removed,
                        start.elapsed().as_millis()
                    ),
                    Err(e) => eprintln!("❌ Processing failed: {}", e),
                }
            }
            Err(e) => {
                eprintln!("Watch error: {}", e);
                break;
            }
        }
    }

    Ok(())
}

// --- INFO ---
pub fn handle_info_command(cli: &super::Cli, matches: &clap::ArgMatches) -> Result<()> {
    let prefixer = Prefixer::new(&cli.requirements(matches))?;
    let report = prefixer.info();

    match matches.get_one::<OutputFormat>("format") {
        Some(OutputFormat::Json) => {
            let json = report.to_json().map_err(|e| PrefixerError::InvalidFormat {
                message: format!("JSON serialization error: {}", e),
            })?;
            println!("{}", json);
        }
        _ => print!("{}", report),
    }
    Ok(())
}

// --- CHECK ---
pub fn handle_check_command(cli: &super::Cli, matches: &clap::ArgMatches) -> Result<()> {
    let prefixer = Prefixer::new(&cli.requirements(matches))?;
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();

    let files = if matches.get_flag("recursive") && input.is_dir() {
        collect_css_files(&input)?
    } else {
        vec![input]
    };

    let mut outdated = 0;
    let mut failed = 0;
    for file in &files {
        match check_single_file(&prefixer, file) {
            Ok(true) => {}
            Ok(false) => outdated += 1,
            Err(e) => {
                println!("❌ {}", e);
                failed += 1;
            }
        }
    }

    println!("\n📊 Check Summary:");
    println!("   Total files: {}", files.len());
    println!("   Need changes: {}", outdated);
    println!("   Failed: {}", failed);

    if outdated + failed > 0 {
        Err(PrefixerError::InvalidFormat {
            message: format!("{} of {} files are not up to date", outdated + failed, files.len()),
        })
    } else {
        Ok(())
    }
}

/// Whether the file is already prefixed for the selected browsers
fn check_single_file(prefixer: &Prefixer, path: &Path) -> Result<bool> {
    let css = fs::read_to_string(path).map_err(|e| PrefixerError::FileNotFound {
        path: format!("{}: {}", path.display(), e),
    })?;
    let mut options = prefixer.options().clone();
    options.filename = Some(path.display().to_string());

    let (_, stats) = crate::transform_with_options(&css, prefixer.plan(), &options)?;
    if stats.is_empty() {
        println!("✅ {} - up to date", path.display());
        Ok(true)
    } else {
        println!(
            "⚠️  {} - {} to add, {} to remove",
            path.display(),
            stats.declarations_added + stats.keyframes_added,
            stats.declarations_removed + stats.keyframes_removed
        );
        Ok(false)
    }
}

// --- HELPERS ---
fn collect_css_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            PrefixerError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("Directory traversal error: {}", e),
            ))
        })?;
        if entry.file_type().is_file() && entry.path().extension().map_or(false, |ext| ext == "css") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn mirrored_path(root: &Path, file: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(output) => output.join(file.strip_prefix(root).unwrap_or(file)),
        None => file.to_path_buf(),
    }
}

fn write_output(output: Option<&Path>, css: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, css)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(css.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn print_stats(stats: &ProcessStats) {
    eprintln!("📊 Statistics:");
    eprintln!("   Declarations added: {}", stats.declarations_added);
    eprintln!("   Declarations removed: {}", stats.declarations_removed);
    eprintln!("   Keyframes added: {}", stats.keyframes_added);
    eprintln!("   Keyframes removed: {}", stats.keyframes_removed);
}

fn watch_error(context: &str, e: notify::Error) -> PrefixerError {
    PrefixerError::Io(io::Error::new(
        io::ErrorKind::Other,
        format!("{}: {}", context, e),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_css_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.css"), "a {}").unwrap();
        fs::write(dir.path().join("nested").join("a.css"), "a {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_css_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("b.css"), dir.path().join("nested").join("a.css")]
        );
    }

    #[test]
    fn test_mirrored_path() {
        let root = Path::new("styles");
        let file = Path::new("styles/nested/a.css");
        assert_eq!(
            mirrored_path(root, file, Some(Path::new("dist"))),
            PathBuf::from("dist/nested/a.css")
        );
        assert_eq!(mirrored_path(root, file, None), file.to_path_buf());
    }

    #[test]
    fn test_check_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("fresh.css");
        let stale = dir.path().join("stale.css");
        fs::write(&fresh, "a { -webkit-transition: all 1s; transition: all 1s }").unwrap();
        fs::write(&stale, "a { transition: all 1s }").unwrap();

        let prefixer = Prefixer::new(&["chrome 25"]).unwrap();
        assert!(check_single_file(&prefixer, &fresh).unwrap());
        assert!(!check_single_file(&prefixer, &stale).unwrap());
        assert!(check_single_file(&prefixer, &dir.path().join("missing.css")).is_err());
    }

    #[test]
    fn test_process_directory_mirrors_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("src");
        let output = dir.path().join("dist");
        fs::create_dir_all(input.join("nested")).unwrap();
        fs::write(input.join("nested").join("a.css"), "a { transition: all 1s }").unwrap();

        let prefixer = Prefixer::new(&["chrome 25"]).unwrap();
        process_directory(&prefixer, &input, Some(&output), false).unwrap();

        let css = fs::read_to_string(output.join("nested").join("a.css")).unwrap();
        assert!(css.contains("-webkit-transition: all 1s;"));
    }
}
