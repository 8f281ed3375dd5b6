//! preflight - interactive-shell input preprocessing
//!
//! Rewrites raw lines typed at a line-oriented prompt into canonical
//! executable source before they reach an evaluator. The pipeline
//! recognizes shell-escape syntax, help queries, cell-magic blocks, pasted
//! foreign prompts, inconsistent indentation, and assignment-from-shell
//! forms, and normalizes all of them into plain statements - while handling
//! input that arrives incrementally, one line at a time.
//!
//! # Architecture
//!
//! 1. **Line classification** (`splitline` module)
//!    - Splits a raw line into (indent, escape, symbol, rest)
//!    - Assigns each line an escape kind: `!`, `!!`, `?`, `??`, `%`, `%%`,
//!      `,`, `;`, `/`, or none
//!    - Pure and stateless; any string classifies
//!
//! 2. **Transformation** (`transform` module)
//!    - A [`Transformer`] is an incremental state machine: fed one line per
//!      `push`, it emits a rewritten logical line or buffers for more input
//!    - A [`Pipeline`] composes transformers in order; one stage buffering
//!      stops the descent for that line
//!
//! 3. **Interactive driver** (`repl` module)
//!    - rustyline loop, string-continuation tracking, configuration
//!
//! # Example
//!
//! ```rust
//! use preflight::transform::Pipeline;
//!
//! let mut pipeline = Pipeline::standard().unwrap();
//! assert_eq!(
//!     pipeline.push("!!ls -la"),
//!     Some("get_ipython().getoutput('ls -la')".to_string())
//! );
//! assert_eq!(pipeline.push("x = 1"), Some("x = 1".to_string()));
//! ```

pub mod repl;
pub mod splitline;
pub mod transform;

pub use splitline::{classify, has_comment, EscapeKind, LineInfo};
pub use transform::{
    AssignmentRewriter, CellBlockCollector, EscapeDispatcher, IndentNormalizer, Pipeline,
    PromptStripper, StatelessTransformer, Transformer,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_smoke() {
        let info = classify("!ls");
        assert_eq!(info.escape, EscapeKind::Shell);
    }

    #[test]
    fn test_pipeline_smoke() {
        let mut pipeline = Pipeline::standard().unwrap();
        assert_eq!(
            pipeline.push("result = !ls"),
            Some("result = get_ipython().getoutput('ls')".to_string())
        );
    }

    #[test]
    fn test_transformer_trait_object() {
        let mut stages: Vec<Box<dyn Transformer>> = vec![
            Box::new(EscapeDispatcher::new()),
            Box::new(StatelessTransformer::new(|line| line.to_string())),
        ];
        for stage in &mut stages {
            assert_eq!(stage.push("x = 1"), Some("x = 1".to_string()));
        }
    }
}
