//! The shared transformer contract
//!
//! Every pipeline stage is a small incremental machine: fed one physical line
//! per `push`, it either emits a (possibly rewritten) logical line or returns
//! `None` to signal that it is buffering and needs more input.

/// Contract implemented by every pipeline stage.
///
/// `push` is the only way data enters the machine. A `None` result means
/// "more input required before an output line exists"; a returned string is
/// the transformed logical line, ready for the next stage. A stage that
/// returns `None` for line N must accept the next pushed line (or a `reset`)
/// before producing output; it never silently drops lines.
pub trait Transformer {
    /// Feed one physical line; `None` means the stage is buffering.
    fn push(&mut self, line: &str) -> Option<String>;

    /// Discard any buffered partial input and return to the just-constructed
    /// state. Idempotent; safe to call with nothing buffered.
    fn reset(&mut self);

    /// Whether this stage must still run on lines lexically inside an open
    /// string literal. Most stages must not touch such lines.
    fn look_in_string(&self) -> bool {
        false
    }
}

/// Adapter wrapping a pure `line -> line` function as a stage with no state.
pub struct StatelessTransformer {
    func: Box<dyn Fn(&str) -> String + Send>,
}

impl StatelessTransformer {
    /// Wrap a pure function over single lines.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str) -> String + Send + 'static,
    {
        Self {
            func: Box::new(func),
        }
    }
}

impl Transformer for StatelessTransformer {
    fn push(&mut self, line: &str) -> Option<String> {
        Some((self.func)(line))
    }

    fn reset(&mut self) {}
}
