//! gen-test-output CLI entry point

fn main() {
    gen_test_output::cli::run();
}
