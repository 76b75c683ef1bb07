use std::{fs, io::Write, path::Path};

use tempfile::NamedTempFile;

use crate::{
    config::HarnessConfig,
    emit::{render_routine, render_table, routine_name, SourceWriter},
    error::GenerateError,
    plan::HarnessPlan,
};

/// Renders the complete harness translation unit.
pub fn compose(plan: &HarnessPlan, harness: &HarnessConfig) -> String {
    let mut out = SourceWriter::new();
    write_preamble(&mut out, harness);
    write_setup(&mut out, plan, harness);
    write_teardown(&mut out);
    for routine in &plan.routines {
        render_routine(&mut out, routine, harness);
    }
    write_main(&mut out, plan);
    out.finish()
}

fn write_preamble(out: &mut SourceWriter, harness: &HarnessConfig) {
    let ns = &harness.namespace;
    out.line("#include <chrono>")
        .line("#include <cstdio>")
        .line("#include <cstdlib>")
        .line("#include <iostream>")
        .line(&format!("#include \"{}\"", harness.header))
        .blank();

    out.open("struct bigint_data");
    out.line(&format!("{ns}::limb_t * digits;"));
    out.line("int size;");
    out.close_with("};").blank();

    out.open("struct test_context");
    out.line("bigint_data * inputs;")
        .line("int input_count;")
        .line("bigint_data * expected_results;")
        .line("int expected_count;");
    out.close_with("};").blank();

    out.line(&format!(
        "typedef int (*bigint_op)({ns}::limb_t *, {ns}::limb_t const *, {ns}::limb_t const *, int, int);"
    ))
    .blank();

    out.open("void test_op(char const * name, bigint_op op, test_context const & ctx, int lhs, int rhs, int expected)");
    out.line(&format!("static {ns}::limb_t result[{}];", harness.result_capacity));
    out.line("bigint_data const & a = ctx.inputs[lhs];")
        .line("bigint_data const & b = ctx.inputs[rhs];")
        .line("bigint_data const & want = ctx.expected_results[expected];")
        .line("int const size = op(result, a.digits, b.digits, a.size, b.size);");
    out.open(&format!("if ({ns}::compare(result, want.digits, size, want.size) != 0)"));
    out.line("std::fprintf(stderr, \"%s mismatch: inputs[%d], inputs[%d] != expected_results[%d]\\n\", name, lhs, rhs, expected);")
        .line("std::abort();");
    out.close();
    out.close().blank();
}

fn write_setup(out: &mut SourceWriter, plan: &HarnessPlan, harness: &HarnessConfig) {
    out.open("test_context generate_test_numbers()");
    out.line("test_context ctx;");
    render_table(out, "inputs", "input_count", &plan.operands, harness);
    out.blank();
    render_table(out, "expected_results", "expected_count", &plan.expected, harness);
    out.line("return ctx;");
    out.close().blank();
}

fn write_teardown(out: &mut SourceWriter) {
    out.open("void free_test_numbers(test_context & ctx)");
    out.line("for (int i = 0; i < ctx.input_count; ++i)")
        .nested("delete[] ctx.inputs[i].digits;");
    out.line("for (int i = 0; i < ctx.expected_count; ++i)")
        .nested("delete[] ctx.expected_results[i].digits;");
    out.line("delete[] ctx.inputs;")
        .line("delete[] ctx.expected_results;")
        .line("ctx = test_context();");
    out.close().blank();
}

fn write_main(out: &mut SourceWriter, plan: &HarnessPlan) {
    out.open("int main()");
    out.line("test_context ctx = generate_test_numbers();");
    for routine in &plan.routines {
        out.line(&format!("{}(ctx);", routine_name(routine)));
    }
    out.line("free_test_numbers(ctx);").line("return 0;");
    out.close();
}

/// Replaces `path` with `contents` by writing a uniquely named temporary
/// file in the same directory, syncing it, and persisting it over the target,
/// so readers never observe a partial harness. The temporary file is removed
/// on every error path.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|source| GenerateError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
            parent
        }
        None => Path::new("."),
    };
    let write_err = |source: std::io::Error| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp.write_all(contents.as_bytes()).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|err| GenerateError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}
