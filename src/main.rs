//! preflight - input preprocessing CLI
use preflight::repl;
use preflight::repl::StringTracker;
use preflight::splitline::classify;
use preflight::transform::Pipeline;
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("preflight v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    preflight [OPTIONS] <INPUT>");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help           Print this help message");
    eprintln!("    -v, --version        Print version information");
    eprintln!("    -o, --output <FILE>  Write output to FILE (default: stdout)");
    eprintln!("    --classify           Print per-line classification instead of rewriting");
    eprintln!("    --repl               Start the interactive driver");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    <INPUT>              Input file of raw shell input (use '-' for stdin)");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    preflight session.txt");
    eprintln!("    preflight --repl");
    eprintln!("    preflight --classify session.txt");
    eprintln!("    cat session.txt | preflight -");
}

fn print_version() {
    println!("preflight {}", VERSION);
}

struct Options {
    input: Option<String>,
    output: Option<String>,
    show_classify: bool,
    repl_mode: bool,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut output = None;
    let mut show_classify = false;
    let mut repl_mode = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing output file after -o".to_string());
                }
                output = Some(args[i].clone());
            }
            "--classify" => {
                show_classify = true;
            }
            "--repl" => {
                repl_mode = true;
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if input.is_some() {
                    return Err("Multiple input files specified".to_string());
                }
                input = Some(arg.to_string());
            }
        }
        i += 1;
    }

    Ok(Options {
        input,
        output,
        show_classify,
        repl_mode,
    })
}

fn read_input(input: &str) -> Result<String, String> {
    if input == "-" {
        // Read from stdin
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        // Read from file
        let path = Path::new(input);
        if !path.exists() {
            return Err(format!("Input file not found: {}", input));
        }
        fs::read_to_string(path).map_err(|e| format!("Failed to read file '{}': {}", input, e))
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), String> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .map_err(|e| format!("Failed to create output file '{}': {}", path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| format!("Failed to write to output file '{}': {}", path, e))?;
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

/// Rewrite a whole pasted block to canonical source. The block is treated as
/// one logical entry, so pasted prompts and uniform indentation are detected
/// from its first lines.
fn transform_source(source: &str) -> Result<String, String> {
    let mut pipeline = Pipeline::standard()?;
    let mut tracker = StringTracker::new();
    let mut out = String::new();

    for line in source.lines() {
        if let Some(rewritten) = pipeline.push_line(line, tracker.within_string()) {
            tracker.feed(&rewritten);
            out.push_str(&rewritten);
            out.push('\n');
        }
    }

    if pipeline.has_pending() {
        return Err("Incomplete input: stream ended inside a continuation".to_string());
    }
    Ok(out)
}

fn classify_source(source: &str) -> String {
    let mut out = String::new();
    for line in source.lines() {
        let info = classify(line);
        out.push_str(&format!(
            "{:<12} indent={:?} symbol={:?} rest={:?}\n",
            format!("{:?}", info.escape),
            info.indent,
            info.symbol,
            info.rest
        ));
    }
    out
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    // REPL mode
    if options.repl_mode {
        if let Err(e) = repl::run() {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        return;
    }

    // No input file and not REPL mode - show usage
    if options.input.is_none() {
        eprintln!("Error: Missing input file");
        eprintln!();
        print_usage();
        process::exit(1);
    }

    let source = match read_input(options.input.as_deref().unwrap_or("-")) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = if options.show_classify {
        Ok(classify_source(&source))
    } else {
        transform_source(&source)
    };

    let content = match result {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = write_output(options.output.as_deref(), &content) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
