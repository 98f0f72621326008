// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use ttp_model::prelude::{DistanceMatrix, Instance, RunLengthBounds};
use ttp_model::problem::r#gen::GridInstanceGenerator;
use ttp_model::problem::loader::InstanceLoader;
use ttp_solver::prelude::{PricingKind, SolverConfig, SolveStatus, TtpSolver};

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

/// Distance matrices from `instances/*.txt`, or a couple of generated grid
/// instances when no such directory exists.
fn instances() -> Vec<(DistanceMatrix<i64>, String)> {
    let Some(inst_dir) = find_instances_dir() else {
        tracing::info!("No instances/ directory found, generating grid instances");
        return [4usize, 6, 8]
            .iter()
            .filter_map(|&n| {
                GridInstanceGenerator::new()
                    .seed(n as u64)
                    .generate(n)
                    .ok()
                    .map(|m| (m, format!("grid-{n}")))
            })
            .collect();
    };

    let mut files: Vec<PathBuf> = std::fs::read_dir(&inst_dir)
        .expect("read_dir(instances) failed")
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && e.path().extension().map(|x| x == "txt").unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();

    files.sort();
    files
        .into_iter()
        .filter_map(|f| {
            let loader = InstanceLoader::default();
            match loader.from_path(&f) {
                Ok(matrix) => {
                    let name = f
                        .file_name()
                        .and_then(|s| s.to_str())
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| f.to_string_lossy().into_owned());
                    Some((matrix, name))
                }
                Err(e) => {
                    tracing::error!("Skipping {}: {}", f.display(), e);
                    None
                }
            }
        })
        .collect()
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Serialize)]
struct RunRecord {
    iteration: usize,
    filename: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    status: String,
    fractional_bound: Option<f64>,
    total_distance: Option<f64>,
    iterations: usize,
    columns: usize,
    schedule: Option<Vec<String>>,
}

fn main() {
    enable_tracing();

    let time_limit = Duration::from_secs(env_u64("TTP_TIME_LIMIT_SECS", 600));
    let lower = env_u64("TTP_LOWER", 1) as usize;
    let upper = env_u64("TTP_UPPER", 3) as usize;
    let seed = env_u64("TTP_SEED", 0);
    let pricing = match std::env::var("TTP_PRICING").as_deref() {
        Ok("milp") => PricingKind::Milp,
        _ => PricingKind::ConstraintSearch,
    };

    let config = SolverConfig::default()
        .with_time_limit(time_limit)
        .with_pricing(pricing)
        .with_rng_seed(seed);
    let solver = TtpSolver::new(config);

    let mut results: Vec<RunRecord> = Vec::new();
    for (iter, (matrix, file)) in instances().into_iter().enumerate() {
        let iteration = iter + 1;
        let bounds = RunLengthBounds::new(lower, upper);
        let instance = match Instance::new(matrix, bounds) {
            Ok(instance) => instance,
            Err(e) => {
                tracing::error!("Rejecting [{}] {}: {}", iteration, file, e);
                continue;
            }
        };

        tracing::info!(
            "Solving [{}] {} with {} teams over {} slots",
            iteration,
            file,
            instance.n_teams(),
            instance.n_slots()
        );

        let start_ts = Utc::now();
        let report = match solver.solve(&instance) {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Failed [{}] {}: {}", iteration, file, e);
                continue;
            }
        };
        let end_ts = Utc::now();

        let status = match report.status {
            SolveStatus::Optimal => "optimal",
            SolveStatus::TimeLimit => "time-limit",
            SolveStatus::Infeasible => "infeasible",
        };
        tracing::info!(
            "Finished [{}] {}: status={}, distance={:?}, runtime={:?}",
            iteration,
            file,
            status,
            report.best_integer_objective,
            report.elapsed
        );

        results.push(RunRecord {
            iteration,
            filename: file,
            start_ts,
            end_ts,
            runtime_ms: report.elapsed.as_millis(),
            status: status.to_string(),
            fractional_bound: report.best_fractional_objective,
            total_distance: report.best_integer_objective,
            iterations: report.iterations,
            columns: report.columns_generated,
            schedule: report
                .schedule
                .as_ref()
                .map(|s| s.patterns().iter().map(|p| p.to_string()).collect()),
        });
    }

    // Persist results
    let out_path = PathBuf::from("ttp_results.json");
    match File::create(&out_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&results).expect("serialize results");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} run record(s) to {}",
                results.len(),
                out_path.display()
            );
        }
        Err(e) => {
            tracing::error!("Failed to write results to {}: {}", out_path.display(), e);
        }
    }
}
