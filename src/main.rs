/*!
 * Command-line interface for snapfs
 */

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use log::debug;
use regex::Regex;

use snapfs::clipboard::copy_to_clipboard;
use snapfs::config::{Args, ProjectConfig};
use snapfs::error::{Result, SnapFsError};
use snapfs::render::RenderOptions;
use snapfs::{generate_snapshot, pathlist};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "snapfs", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let output = match &args.list_paths {
        Some(input_file) => list_paths(args, input_file)?,
        None => snapshot(args)?,
    };

    println!("{}", output);

    if args.clipboard {
        match copy_to_clipboard(&output) {
            Ok(()) => {
                eprintln!("{}", "Output has been copied to the clipboard.".green());
            }
            Err(e) => {
                eprintln!("{} {}", "warning:".yellow().bold(), e);
            }
        }
    }

    Ok(())
}

/// Default mode: render the snapshot described by the configuration file
fn snapshot(args: &Args) -> Result<String> {
    let config = ProjectConfig::load(Path::new(&args.config))?;
    debug!(
        "loaded config: {} dirs, {} files, {} regexfiles",
        config.dirs.len(),
        config.files.len(),
        config.regexfiles.len()
    );

    let options = RenderOptions {
        dir_only: args.dironly,
        no_dir_tree: args.nodirtree,
    };

    Ok(generate_snapshot(&config, &options))
}

/// --list-paths mode: parse a rendered tree back into a YAML-style path list
fn list_paths(args: &Args, input_file: &Path) -> Result<String> {
    let input = fs::read_to_string(input_file).map_err(|e| {
        SnapFsError::Config(format!("cannot read {}: {}", input_file.display(), e))
    })?;

    let pattern = args
        .path_pattern
        .as_deref()
        .map(Regex::new)
        .transpose()?;

    let paths = pathlist::extract_paths(&input, args.path_type, pattern.as_ref())?;
    Ok(pathlist::format_as_yaml(&paths))
}
