//! Interactive driver for the preprocessing pipeline
//!
//! A thin rustyline loop that feeds each typed line through the standard
//! pipeline and echoes the canonical rewritten source. The evaluator that
//! would normally receive that source is out of scope; the driver exists to
//! exercise the pipeline interactively:
//! - continuation prompt while any stage is buffering or a string is open
//! - Ctrl-C aborts the current entry (pipeline reset), Ctrl-D exits
//! - history persisted under the user data directory

pub mod config;
pub mod tracker;

// Re-exports for convenience
pub use config::ReplConfig;
pub use tracker::StringTracker;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::transform::Pipeline;

/// Run the interactive driver with configuration from the default location.
pub fn run() -> Result<(), String> {
    run_with_config(ReplConfig::load())
}

/// Run the interactive driver.
pub fn run_with_config(config: ReplConfig) -> Result<(), String> {
    let mut pipeline = Pipeline::standard()?;
    let mut tracker = StringTracker::new();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.history_size)
        .map_err(|e| format!("invalid history size: {}", e))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| format!("failed to initialize line editor: {}", e))?;

    let history_path = ReplConfig::history_path();
    if let Some(path) = &history_path {
        // Missing history is fine on first run.
        let _ = editor.load_history(path);
    }

    println!("preflight v{}", env!("CARGO_PKG_VERSION"));
    println!("Lines are rewritten to canonical source and echoed back.");
    println!("Type 'exit' or 'quit' to exit.\n");

    let mut entry = 1usize;
    loop {
        let prompt = if pipeline.has_pending() || tracker.within_string() {
            config.continuation_prompt.clone()
        } else {
            config.prompt(entry)
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let at_top_level = !pipeline.has_pending() && !tracker.within_string();
                if at_top_level && matches!(line.trim(), "exit" | "quit") {
                    break;
                }
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }

                match pipeline.push_line(&line, tracker.within_string()) {
                    Some(rewritten) => {
                        tracker.feed(&rewritten);
                        println!("{}", rewritten);
                        if !tracker.within_string() {
                            // Completed logical entry: fresh detection for
                            // the next one, so a later paste is re-detected.
                            pipeline.reset();
                            entry += 1;
                        }
                    }
                    None => {
                        debug!("pipeline buffering, prompting for more input");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                debug!("entry aborted, resetting pipeline");
                pipeline.reset();
                tracker.reset();
                println!("(aborted)");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("readline error: {}", e)),
        }
    }

    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = editor.save_history(path);
    }
    println!("Goodbye!");
    Ok(())
}
