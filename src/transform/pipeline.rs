//! Transformer pipeline
//!
//! An ordered sequence of stages sharing no state. Each physical line is fed
//! through every stage in order; a stage that returns `None` stops the
//! descent for that line, and the next typed line is pushed again from the
//! first stage. Stages whose `look_in_string` flag is unset are skipped for
//! lines lexically inside an open string literal.

use tracing::trace;

use super::assign::AssignmentRewriter;
use super::cellmagic::CellBlockCollector;
use super::escape::EscapeDispatcher;
use super::help::help_end;
use super::indent::IndentNormalizer;
use super::prompts::PromptStripper;
use super::transformer::Transformer;

pub struct Pipeline {
    stages: Vec<Box<dyn Transformer>>,
    pending: bool,
}

impl Pipeline {
    /// Compose a pipeline from an ordered list of stages.
    pub fn new(stages: Vec<Box<dyn Transformer>>) -> Self {
        Self {
            stages,
            pending: false,
        }
    }

    /// The standard stage order: physical-line cleanup (indent, pasted
    /// prompts) ahead of logical-line rewriting (cell magic, help suffix,
    /// escapes, assignments).
    pub fn standard() -> Result<Self, String> {
        Ok(Self::new(vec![
            Box::new(IndentNormalizer::new()),
            Box::new(PromptStripper::classic()?),
            Box::new(PromptStripper::numbered()?),
            Box::new(CellBlockCollector::new()),
            Box::new(help_end()),
            Box::new(EscapeDispatcher::new()),
            Box::new(AssignmentRewriter::from_system()?),
            Box::new(AssignmentRewriter::from_magic()?),
        ]))
    }

    /// Push one physical line assumed to be outside any string literal.
    pub fn push(&mut self, line: &str) -> Option<String> {
        self.push_line(line, false)
    }

    /// Push one physical line. `within_string` marks lines the driver's
    /// string tracker classified as lexically inside an unterminated string
    /// literal; stages that must not look inside strings are skipped for
    /// such lines.
    pub fn push_line(&mut self, line: &str, within_string: bool) -> Option<String> {
        let mut current = line.to_string();
        for (idx, stage) in self.stages.iter_mut().enumerate() {
            if within_string && !stage.look_in_string() {
                continue;
            }
            match stage.push(&current) {
                Some(out) => current = out,
                None => {
                    trace!(stage = idx, "stage buffering, waiting for more input");
                    self.pending = true;
                    return None;
                }
            }
        }
        self.pending = false;
        Some(current)
    }

    /// Whether the last push left some stage waiting for more input. A
    /// stream that ends while this is set is incomplete input.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Abort the current logical entry: reset every stage and drop any
    /// buffered partial input.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.pending = false;
    }
}
