use crate::{
    config::HarnessConfig,
    plan::{DataEntry, TestRoutine},
};

const INDENT: &str = "    ";

/// Line-oriented C++ source builder with brace-aware indentation.
#[derive(Debug, Default)]
pub struct SourceWriter {
    buffer: String,
    depth: usize,
}

impl SourceWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buffer.push_str(INDENT);
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Writes `header` followed by an opening brace on its own line.
    pub fn open(&mut self, header: &str) -> &mut Self {
        self.line(header);
        self.line("{");
        self.depth += 1;
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.close_with("}")
    }

    /// Closes a block whose brace carries a suffix, e.g. `};`.
    pub fn close_with(&mut self, closing: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(closing)
    }

    /// Emits `body` one level deeper without braces, for single-statement loops.
    pub fn nested(&mut self, body: &str) -> &mut Self {
        self.depth += 1;
        self.line(body);
        self.depth -= 1;
        self
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Name of the generated routine for an operation.
pub fn routine_name(routine: &TestRoutine) -> String {
    format!("test_{}", routine.operation.name())
}

/// Renders one timed routine: start the clock, run every invocation through
/// `test_op`, stop the clock and report mean nanoseconds per call.
pub fn render_routine(out: &mut SourceWriter, routine: &TestRoutine, harness: &HarnessConfig) {
    let name = routine.operation.name();
    if routine.invocations.is_empty() {
        out.open(&format!("void {}(test_context const &)", routine_name(routine)));
        out.line(&format!("std::cout << \"{name}: no test vectors\" << std::endl;"));
        out.close().blank();
        return;
    }

    out.open(&format!("void {}(test_context const & ctx)", routine_name(routine)));
    out.line("auto const chrono_start = std::chrono::steady_clock::now();");
    for call in &routine.invocations {
        out.line(&format!(
            "test_op(\"{name}\", {ns}::{name}, ctx, {}, {}, {});",
            call.lhs,
            call.rhs,
            call.result,
            ns = harness.namespace,
        ));
    }
    out.line("auto const chrono_end = std::chrono::steady_clock::now();");
    out.line("auto const time_ns = std::chrono::duration_cast<std::chrono::nanoseconds>(chrono_end - chrono_start).count();");
    out.line(&format!(
        "std::cout << \"{name}: \" << (time_ns / {}) << \"ns/op\" << std::endl;",
        routine.invocations.len()
    ));
    out.close().blank();
}

/// Allocates and fills one table of the context from its data entries.
pub fn render_table(
    out: &mut SourceWriter,
    field: &str,
    count_field: &str,
    entries: &[DataEntry],
    harness: &HarnessConfig,
) {
    let ns = &harness.namespace;
    out.line(&format!("ctx.{count_field} = {};", entries.len()));
    out.line(&format!("ctx.{field} = new bigint_data[{}];", entries.len()));
    for (index, entry) in entries.iter().enumerate() {
        out.line(&format!("ctx.{field}[{index}].digits = new {ns}::limb_t[{}];", entry.limbs));
        out.line(&format!(
            "ctx.{field}[{index}].size = {ns}::from_base16(ctx.{field}[{index}].digits, \"{}\", {});",
            entry.hex,
            entry.hex.len()
        ));
    }
}
