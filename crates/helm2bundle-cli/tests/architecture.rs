use std::path::Path;

use arch_lint::rules::{NoErrorSwallowing, NoSilentResultDrop};
use arch_lint::{Analyzer, Severity};

const CRATES: [&str; 3] = ["helm2bundle-core", "helm2bundle-build", "helm2bundle-cli"];

/// Every error raised while scanning a chart must reach the CLI, so no crate
/// may discard a `Result` (AL003 no-error-swallowing, AL013 no-silent-result-drop).
#[test]
fn crates_do_not_swallow_errors() {
    let crates_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("crates directory");

    let mut reports = Vec::new();
    for name in CRATES {
        let src = crates_dir.join(name).join("src");
        let analyzer = Analyzer::builder()
            .root(&src)
            .rule(NoErrorSwallowing::new())
            .rule(NoSilentResultDrop::new())
            .build()
            .expect("build analyzer");

        let result = analyzer.analyze().expect("analyze");
        if result.has_violations_at(Severity::Warning) {
            reports.push(result.format_test_report(Severity::Warning));
        }
    }

    assert!(reports.is_empty(), "{}", reports.join("\n"));
}
