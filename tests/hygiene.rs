//! Hygiene checks over the production sources.
//!
//! Each pattern carries a budget of zero. Test files (`*_test.rs`) are
//! exempt; everything else under `src/` is scanned line by line.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics.
    Budget { pattern: ".unwrap()", max: 0, why: "propagate or default instead" },
    Budget { pattern: ".expect(", max: 0, why: "propagate or default instead" },
    Budget { pattern: "panic!(", max: 0, why: "return an error" },
    Budget { pattern: "unreachable!(", max: 0, why: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, why: "unfinished stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "unfinished stub" },
    // Silent loss.
    Budget { pattern: "let _ =", max: 0, why: "inspect or log the result" },
    Budget { pattern: ".ok()", max: 0, why: "error discarded without a trace" },
    // Structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" },
];

fn production_sources() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    collect(Path::new(env!("CARGO_MANIFEST_DIR")).join("src").as_path(), &mut out);
    out
}

fn collect(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

fn offenders(sources: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    sources
        .iter()
        .flat_map(|(path, content)| {
            content
                .lines()
                .enumerate()
                .filter(|(_, line)| line.contains(pattern))
                .map(move |(n, line)| format!("  {}:{}: {}", path.display(), n + 1, line.trim()))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let sources = production_sources();
    assert!(sources.iter().any(|(path, _)| path.ends_with("engine.rs")));
}

#[test]
fn pattern_budgets() {
    let sources = production_sources();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = offenders(&sources, budget.pattern);
        if hits.len() > budget.max {
            failures.push(format!(
                "`{}` found {} times, max {} ({}):\n{}",
                budget.pattern,
                hits.len(),
                budget.max,
                budget.why,
                hits.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}

#[test]
fn every_module_has_sibling_tests() {
    let sources = production_sources();
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let exempt = ["lib.rs", "main.rs", "consts.rs", "error.rs"];
    let missing: Vec<_> = sources
        .iter()
        .filter_map(|(path, _)| path.file_name().map(|n| n.to_string_lossy().to_string()))
        .filter(|name| !exempt.contains(&name.as_str()))
        .filter(|name| !src.join(name.replace(".rs", "_test.rs")).exists())
        .collect();
    assert!(missing.is_empty(), "modules without a _test.rs sibling: {missing:?}");
}
