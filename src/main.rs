//! gprettier - Auto-formatter for EBNF-style grammar files

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use gprettier::process::format_file;
use gprettier::{parse_args, CliArgs, Config, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

/// Grammar file extensions to process
const GRAMMAR_EXTENSIONS: &[&str] = &["ebnf", "lark", "bnf", "grammar"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin = (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-")
        || (args.inputs.is_empty() && !io::stdin().is_terminal());

    let config = build_config(&args)?;

    if use_stdin {
        return process_stdin(&args);
    }

    if args.inputs.is_empty() {
        // Interactive invocation with no inputs: fall back to the configured
        // default grammar file, matching `gprettier grammar.ebnf`
        let default_path = PathBuf::from(&config.default_file);
        if default_path.is_file() {
            if let Err(e) = process_single_file(&default_path, &args) {
                eprintln!("Error formatting {}: {}", default_path.display(), e);
            }
            return Ok(());
        }
        print_usage();
        return Ok(());
    }

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args, &config);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No grammar files found to format.");
        }
        return Ok(());
    }

    // Process files
    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        // Sequential processing for stdout or --jobs 1
        process_files_sequential(&files, &args);
    } else {
        // Parallel processing for in-place formatting
        process_files_parallel(&files, &args);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
///
/// With an explicit `-c` path that file is used alone; otherwise config
/// files are auto-discovered starting from the first input (or the current
/// directory).
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        // Auto-discover config files from parent directories
        let start = args
            .inputs
            .first()
            .cloned()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    // CLI extensions add to the configured set
    for ext in &args.grammar_extensions {
        if !config.extensions.contains(ext) {
            config.extensions.push(ext.clone());
        }
    }

    // Print final config in debug mode
    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   default_file: {}", config.default_file);
        if !config.extensions.is_empty() {
            eprintln!("[DEBUG]   extensions: {:?}", config.extensions);
        }
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs, config: &Config) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    // Extensions recognized beyond the defaults
    let custom_extensions = &config.extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal
                // Note: WalkDir detects symlink loops when follow_links(true) and
                // returns errors for them. We skip errors via filter_map(ok).
                // max_depth prevents runaway traversal in pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_grammar_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_grammar_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a grammar extension
/// Checks against both default extensions and any custom extensions provided
fn is_grammar_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if GRAMMAR_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files sequentially (for stdout output)
fn process_files_sequential(files: &[PathBuf], args: &CliArgs) {
    for path in files {
        if let Err(e) = process_single_file(path, args) {
            eprintln!("Error formatting {}: {}", path.display(), e);
        }
    }
}

/// Process files in parallel using Rayon
fn process_files_parallel(files: &[PathBuf], args: &CliArgs) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match process_single_file(path, args) {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Formatted {success} files successfully.");
        } else {
            eprintln!("Formatted {success} files, {errors} errors.");
        }
    }
}

/// Process a single file
fn process_single_file(path: &Path, args: &CliArgs) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                size_mb,
                limit_mb
            );
        }
        return Ok(());
    }

    if !args.silent && !args.stdout {
        eprintln!("Formatting: {}", path.display());
    }

    // Format the file
    let reader = File::open(path)?;
    let mut output = Vec::new();
    format_file(reader, &mut output)?;

    // Output results
    if args.stdout {
        io::stdout().write_all(&output)?;
    } else {
        // Write back to file (in-place)
        std::fs::write(path, &output)?;
    }

    Ok(())
}

/// Process input from stdin, output to stdout
fn process_stdin(args: &CliArgs) -> Result<()> {
    // Read all input from stdin
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Format the input
    let mut output = Vec::new();
    format_file(Cursor::new(&stdin_contents), &mut output)?;

    // Always output to stdout when reading from stdin
    io::stdout().write_all(&output)?;

    if !args.silent {
        eprintln!("Formatted stdin successfully.");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "gprettier v{} - grammar file formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Aligns `|` alternation lines under their rule headers.");
    println!();
    println!("Usage:");
    println!("  gprettier [OPTIONS] <FILE>...");
    println!("  gprettier [OPTIONS] -r <DIRECTORY>");
    println!("  gprettier [OPTIONS] -             # Read from stdin");
    println!("  cat lang.lark | gprettier         # Pipe input");
    println!("  gprettier                         # Format grammar.ebnf in place");
    println!();
    println!("Examples:");
    println!("  gprettier grammar.ebnf            # Format single file in-place");
    println!("  gprettier *.lark                  # Format multiple files");
    println!("  gprettier -r grammars/            # Recursively format directory");
    println!("  gprettier --stdout grammar.ebnf   # Output to stdout");
    println!();
    println!("Options:");
    println!("  -s, --stdout                    Output to stdout");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -g, --grammar <EXT>             Additional grammar extension (repeatable)");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -S, --silent                    Silent mode");
    println!("  -D, --debug                     Enable debug output");
    println!("  -h, --help                      Print help");
    println!();
    println!("Supported extensions: .ebnf, .lark, .bnf, .grammar");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for gprettier.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks gprettier.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
}
