//! Corpus evaluation binary.
//!
//! Usage:
//!   cargo run --release --bin evaluate -- [OPTIONS]
//!
//! Options:
//!   --set <FILE>         Set rating sheet TSV (required)
//!   --lands <FILE>       Supplementary rating sheet TSV (optional)
//!   --drafts <FILE>      Draft corpus CSV (required)
//!   --config <FILE>      Bot configuration JSON file (optional)
//!   --out-dir <DIR>      Directory for TSV reports (default: .)
//!   --json <FILE>        Also write a JSON run summary
//!   --threads <N>        Number of threads (default: auto)
//!   --seed <N>           Random seed for the random baseline

use std::env;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use draft_eval::bots::{RandomPolicy, RaredraftPolicy, RatingBiasPolicy};
use draft_eval::draft::{
    BotConfig, CardCatalog, Corpus, DraftScorer, EvaluationReport, PackReconstructor, PickPolicy,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut set_file: Option<String> = None;
    let mut lands_file: Option<String> = None;
    let mut drafts_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut out_dir = ".".to_string();
    let mut json_file: Option<String> = None;
    let mut threads: usize = 0;
    let mut seed: u64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--set" => {
                i += 1;
                if i < args.len() {
                    set_file = Some(args[i].clone());
                }
            }
            "--lands" => {
                i += 1;
                if i < args.len() {
                    lands_file = Some(args[i].clone());
                }
            }
            "--drafts" | "-d" => {
                i += 1;
                if i < args.len() {
                    drafts_file = Some(args[i].clone());
                }
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            }
            "--out-dir" | "-o" => {
                i += 1;
                if i < args.len() {
                    out_dir = args[i].clone();
                }
            }
            "--json" => {
                i += 1;
                if i < args.len() {
                    json_file = Some(args[i].clone());
                }
            }
            "--threads" | "-t" => {
                i += 1;
                if i < args.len() {
                    threads = args[i].parse().unwrap_or(0);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().unwrap_or(0);
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    let (Some(set_file), Some(drafts_file)) = (set_file, drafts_file) else {
        eprintln!("Both --set and --drafts are required.");
        print_help();
        process::exit(2);
    };

    println!("=================================================");
    println!("  Draft Bot Evaluation");
    println!("=================================================");
    println!();

    // Load or create configuration
    let config = if let Some(path) = &config_file {
        println!("Loading bot configuration from: {}", path);
        match BotConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                process::exit(1);
            }
        }
    } else {
        BotConfig::default()
    };

    // Load the catalog
    println!("Loading rating sheet: {}", set_file);
    if let Some(lands) = &lands_file {
        println!("Loading supplementary sheet: {}", lands);
    }
    let catalog = match CardCatalog::from_tsv_files(&set_file, lands_file.as_ref()) {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            eprintln!("Error loading rating sheets: {}", e);
            process::exit(1);
        }
    };
    println!(
        "Catalog: {} cards ({} sheet lines skipped)",
        catalog.len(),
        catalog.skipped_lines()
    );
    println!();

    // Reconstruct the corpus
    let corpus = match load_corpus(&drafts_file) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error loading drafts: {}", e);
            process::exit(1);
        }
    };
    println!(
        "Corpus: {} drafts, {} picks ({} malformed rows skipped)",
        corpus.drafts.len(),
        corpus.total_picks(),
        corpus.skipped
    );
    println!();

    if corpus.drafts.is_empty() {
        eprintln!("Nothing to evaluate.");
        process::exit(1);
    }

    if threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            eprintln!("Warning: could not set thread count: {}", e);
        }
    }
    println!(
        "Threads: {}",
        if threads == 0 {
            "auto".to_string()
        } else {
            threads.to_string()
        }
    );
    println!("Seed: {}", seed);
    println!();

    // Evaluate all policies, whole drafts per worker
    println!("Evaluating policies...");
    let start_time = Instant::now();

    let scorer = DraftScorer::new();
    let workers = rayon::current_num_threads().max(1);
    let chunk_size = corpus.drafts.len().div_ceil(workers);

    let results: Result<Vec<EvaluationReport>, _> = corpus
        .drafts
        .par_chunks(chunk_size)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            let mut policies = make_policies(&catalog, &config, seed + chunk_idx as u64);
            scorer.evaluate_with_offset(chunk, &mut policies, chunk_idx * chunk_size)
        })
        .collect();

    let report = match results {
        Ok(parts) => {
            let mut merged = EvaluationReport::default();
            for part in parts {
                merged.merge(part);
            }
            merged
        }
        Err(e) => {
            // A degenerate commitment state is a policy bug, not bad input.
            eprintln!("Evaluation aborted: {}", e);
            process::exit(1);
        }
    };

    let elapsed = start_time.elapsed().as_secs_f64();
    println!("Evaluated {} picks in {:.2}s", report.rows.len(), elapsed);
    println!();

    // Print summary table
    println!("=== Accuracy Summary ===");
    println!();
    println!(
        "{:<14} {:>8} {:>8} {:>8} {:>10}",
        "policy", "picks", "exact", "top-3", "rank-err"
    );
    for stats in &report.accuracy {
        println!(
            "{:<14} {:>8} {:>7.1}% {:>7.1}% {:>10.3}",
            stats.name,
            stats.total,
            stats.exact_rate() * 100.0,
            stats.fuzzy_rate() * 100.0,
            stats.mean_rank_error()
        );
    }
    println!();

    // Write reports
    let out_dir = PathBuf::from(out_dir);
    let writes = [
        ("exact_correct.tsv", report.write_exact_tsv(out_dir.join("exact_correct.tsv"))),
        ("fuzzy_correct.tsv", report.write_fuzzy_tsv(out_dir.join("fuzzy_correct.tsv"))),
        (
            "card_accuracies.tsv",
            report.write_card_accuracy_tsv(out_dir.join("card_accuracies.tsv")),
        ),
    ];
    for (name, result) in writes {
        match result {
            Ok(_) => println!("Wrote {}", out_dir.join(name).display()),
            Err(e) => eprintln!("Error writing {}: {}", name, e),
        }
    }

    // Optional JSON summary
    if let Some(path) = json_file {
        let summary = RunSummary::new(&corpus, &report, elapsed);
        match summary.save(&path) {
            Ok(_) => println!("Wrote {}", path),
            Err(e) => eprintln!("Error writing {}: {}", path, e),
        }
    }

    println!();
    println!("Done!");
}

/// Read and reconstruct the draft corpus with a progress bar.
fn load_corpus(path: &str) -> std::io::Result<Corpus> {
    let text = std::fs::read_to_string(path)?;
    let reconstructor = PackReconstructor::default();

    let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let bar = ProgressBar::new(rows.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("Reconstructing {pos}/{len} drafts [{bar:30}] {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut corpus = Corpus::default();
    for row in rows {
        match reconstructor.parse_row(row) {
            Ok(draft) => corpus.drafts.push(draft),
            Err(_) => corpus.skipped += 1,
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(corpus)
}

/// The evaluation lineup: random floor, rarity heuristic, rating bot.
fn make_policies(
    catalog: &Arc<CardCatalog>,
    config: &BotConfig,
    seed: u64,
) -> Vec<Box<dyn PickPolicy>> {
    vec![
        Box::new(RandomPolicy::seeded(seed)),
        Box::new(RaredraftPolicy::new(Arc::clone(catalog))),
        Box::new(RatingBiasPolicy::new(Arc::clone(catalog), config.clone())),
    ]
}

/// JSON run summary for downstream tooling.
#[derive(Debug, Serialize)]
struct RunSummary {
    drafts: usize,
    picks: usize,
    skipped_rows: usize,
    elapsed_seconds: f64,
    policies: Vec<PolicySummary>,
}

#[derive(Debug, Serialize)]
struct PolicySummary {
    name: String,
    total: usize,
    exact_rate: f64,
    fuzzy_rate: f64,
    mean_rank_error: f64,
}

impl RunSummary {
    fn new(corpus: &Corpus, report: &EvaluationReport, elapsed_seconds: f64) -> Self {
        Self {
            drafts: corpus.drafts.len(),
            picks: report.rows.len(),
            skipped_rows: corpus.skipped,
            elapsed_seconds,
            policies: report
                .accuracy
                .iter()
                .map(|a| PolicySummary {
                    name: a.name.clone(),
                    total: a.total,
                    exact_rate: a.exact_rate(),
                    fuzzy_rate: a.fuzzy_rate(),
                    mean_rank_error: a.mean_rank_error(),
                })
                .collect(),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

fn print_help() {
    println!("Draft Bot Evaluation");
    println!();
    println!("Usage: evaluate [OPTIONS]");
    println!();
    println!("Required:");
    println!("  --set <FILE>             Set rating sheet TSV");
    println!("  -d, --drafts <FILE>      Draft corpus CSV");
    println!();
    println!("Options:");
    println!("  --lands <FILE>           Supplementary rating sheet TSV");
    println!("  -c, --config <FILE>      Bot configuration JSON file");
    println!("  -o, --out-dir <DIR>      Directory for TSV reports (default: .)");
    println!("  --json <FILE>            Also write a JSON run summary");
    println!("  -t, --threads <N>        Number of threads (default: auto)");
    println!("  -s, --seed <N>           Random seed for the random baseline");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # Evaluate the standard lineup over a corpus");
    println!("  evaluate --set ratings.tsv --lands lands.tsv --drafts drafts.csv");
    println!();
    println!("  # Reproducible run with reports in a separate directory");
    println!("  evaluate --set ratings.tsv --drafts drafts.csv --seed 42 -o reports/");
}
