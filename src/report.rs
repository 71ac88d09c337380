//! Console reporting for maintenance runs.
//!
//! Output is for the operator's eyes, not for parsing. Both modes print the
//! same transform previews; only the persistence lines differ.

use crate::geometry::Ground;
use crate::tasks::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    DryRun,
    Apply,
}

impl RunMode {
    pub fn is_apply(self) -> bool {
        matches!(self, RunMode::Apply)
    }

    pub fn label(self) -> &'static str {
        match self {
            RunMode::DryRun => "DRY RUN",
            RunMode::Apply => "APPLY",
        }
    }
}

const RULE: &str = "============================================================";

pub fn banner(title: &str, mode: RunMode, seed: Option<u64>) {
    println!("{RULE}");
    println!("{title}");
    println!(
        "started {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if let Some(seed) = seed {
        println!("seed {seed} (pass --seed {seed} to replay this run)");
    }
    match mode {
        RunMode::DryRun => println!("mode: DRY RUN - no changes will be written"),
        RunMode::Apply => println!("mode: APPLY - the database will be updated"),
    }
    println!("{RULE}");
}

pub fn settlement_header(id: impl std::fmt::Display, name: &str) {
    println!("\n{name} (id {id})");
}

pub fn warn_skip(id: impl std::fmt::Display, name: &str, reason: &str) {
    println!("\n{name} (id {id}): skipped - {reason}");
}

pub fn center_line(label: &str, center: Ground) {
    println!("  {label}: ({:.2}, {:.2})", center.x, center.z);
}

pub fn sample_move(label: &str, before: Ground, after: Ground) {
    println!(
        "  {label}: ({:.1}, {:.1}) -> ({:.1}, {:.1})",
        before.x, before.z, after.x, after.z
    );
}

pub fn batch_result(mode: RunMode, rows: usize, what: &str) {
    match mode {
        RunMode::DryRun => println!("  dry run - would update {rows} {what}"),
        RunMode::Apply => println!("  updated {rows} {what}"),
    }
}

pub fn summary(mode: RunMode, summary: &RunSummary) {
    println!("\n{RULE}");
    println!(
        "{}: {} settlements seen, {} updated, {} skipped, {} rows {}",
        mode.label(),
        summary.settlements_seen,
        summary.settlements_updated,
        summary.settlements_skipped,
        summary.rows,
        if mode.is_apply() { "written" } else { "previewed" },
    );
    if !mode.is_apply() {
        println!("re-run with --apply to write these changes");
    }
    println!("{RULE}");
}
