//! SGD rating-training binary.
//!
//! Usage:
//!   cargo run --release --bin train_ratings -- [OPTIONS]
//!
//! Options:
//!   --set <FILE>         Set rating sheet TSV (required)
//!   --lands <FILE>       Supplementary rating sheet TSV (optional)
//!   --drafts <FILE>      Draft corpus CSV (required)
//!   --passes <N>         Optimization passes over the corpus (default: 1)
//!   --lr <RATE>          Learning rate (default: 0.01)
//!   --seed <N>           Shuffle seed for reproducible passes
//!   --out <FILE>         Output rating TSV (default: trained_ratings.tsv)
//!   --loss <FILE>        Also write per-pass loss values

use std::env;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use draft_eval::bots::{RatingDict, SgdTrainer};
use draft_eval::draft::{BotConfig, CardCatalog, Corpus, PackReconstructor};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut set_file: Option<String> = None;
    let mut lands_file: Option<String> = None;
    let mut drafts_file: Option<String> = None;
    let mut passes: usize = 1;
    let mut learning_rate: f64 = 0.01;
    let mut seed: Option<u64> = None;
    let mut out_file = "trained_ratings.tsv".to_string();
    let mut loss_file: Option<String> = None;

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
            "--passes" | "-p" => {
                i += 1;
                if i < args.len() {
                    passes = args[i].parse().unwrap_or(1);
                }
            }
            "--lr" => {
                i += 1;
                if i < args.len() {
                    learning_rate = args[i].parse().unwrap_or(0.01);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--out" | "-o" => {
                i += 1;
                if i < args.len() {
                    out_file = args[i].clone();
                }
            }
            "--loss" => {
                i += 1;
                if i < args.len() {
                    loss_file = Some(args[i].clone());
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
    println!("  SGD Rating Training");
    println!("=================================================");
    println!();

    // Load the catalog
    println!("Loading rating sheet: {}", set_file);
    let catalog = match CardCatalog::from_tsv_files(&set_file, lands_file.as_ref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading rating sheets: {}", e);
            process::exit(1);
        }
    };
    println!("Catalog: {} cards", catalog.len());

    // Reconstruct the corpus
    let corpus = match load_corpus(&drafts_file) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("Error loading drafts: {}", e);
            process::exit(1);
        }
    };
    println!(
        "Corpus: {} drafts ({} malformed rows skipped)",
        corpus.drafts.len(),
        corpus.skipped
    );
    println!();

    if corpus.drafts.is_empty() {
        eprintln!("Nothing to train on.");
        process::exit(1);
    }

    println!("Passes: {}", passes);
    println!("Learning rate: {}", learning_rate);
    if let Some(s) = seed {
        println!("Seed: {}", s);
    }
    println!();

    // Train
    let dict = RatingDict::from_catalog(&catalog);
    let config = BotConfig::default();
    let mut trainer = match seed {
        Some(s) => SgdTrainer::seeded(dict, config, learning_rate, s),
        None => SgdTrainer::new(dict, config, learning_rate),
    };

    let start_time = Instant::now();
    for pass in 1..=passes {
        match trainer.run_pass(&corpus.drafts) {
            Ok(loss) => println!(
                "Pass {:>3}/{} | loss: {:>12.4} | elapsed: {:>6.1}s",
                pass,
                passes,
                loss,
                start_time.elapsed().as_secs_f64()
            ),
            Err(e) => {
                eprintln!("Training aborted: {}", e);
                process::exit(1);
            }
        }
    }
    println!();

    // Export
    match trainer.dict().write_tsv(&out_file) {
        Ok(_) => println!("Wrote rating dict to: {}", out_file),
        Err(e) => eprintln!("Error writing {}: {}", out_file, e),
    }

    if let Some(path) = loss_file {
        let text = trainer
            .loss_history()
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        match std::fs::write(&path, text + "\n") {
            Ok(_) => println!("Wrote loss history to: {}", path),
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

fn print_help() {
    println!("SGD Rating Training");
    println!();
    println!("Usage: train_ratings [OPTIONS]");
    println!();
    println!("Required:");
    println!("  --set <FILE>             Set rating sheet TSV");
    println!("  -d, --drafts <FILE>      Draft corpus CSV");
    println!();
    println!("Options:");
    println!("  --lands <FILE>           Supplementary rating sheet TSV");
    println!("  -p, --passes <N>         Optimization passes (default: 1)");
    println!("  --lr <RATE>              Learning rate (default: 0.01)");
    println!("  -s, --seed <N>           Shuffle seed for reproducible passes");
    println!("  -o, --out <FILE>         Output rating TSV (default: trained_ratings.tsv)");
    println!("  --loss <FILE>            Also write per-pass loss values");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # One reproducible pass");
    println!("  train_ratings --set ratings.tsv --drafts drafts.csv --seed 42");
    println!();
    println!("  # Ten passes with a smaller step");
    println!("  train_ratings --set ratings.tsv --drafts drafts.csv -p 10 --lr 0.001");
}
