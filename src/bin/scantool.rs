use clap::{Parser, Subcommand};
use ean_scan::tools::{
    BatchSummary, bench_limit_from_env, dataset_iter, dataset_root_from_env, load_luma, save_luma,
    scan_batch, smoke_from_env,
};
use ean_scan::utils::synth::synthesize_frame;
use ean_scan::{Frame, ScanConfig, ScanReport, Scanner};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "scantool", version, about = "EAN/UPC scanner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a single image
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a synthetic symbol to an image file
    Synth {
        #[arg(long)]
        code: String,
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 4)]
        module_width: usize,
        #[arg(long, default_value_t = 50)]
        start: usize,
        #[arg(long, default_value_t = 640)]
        width: usize,
        #[arg(long, default_value_t = 480)]
        height: usize,
    },
    /// Compute reading rate on a dataset; expected digits come from file names
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        smoke: bool,
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan { image, json } => scan_cmd(&image, json),
        Command::Synth {
            code,
            out,
            module_width,
            start,
            width,
            height,
        } => synth_cmd(&code, &out, start, module_width, width, height),
        Command::Batch {
            root,
            limit,
            smoke,
            json,
        } => batch_cmd(root, limit, smoke, json),
    }
}

#[cfg(feature = "qr")]
fn scan_frame(config: ScanConfig, frame: &Frame<'_>) -> ScanReport {
    let mut scanner = Scanner::with_config_and_matrix(config, ean_scan::RqrrDecoder);
    log::debug!("scan config: {:?}", scanner.config());
    scanner.scan(frame)
}

#[cfg(not(feature = "qr"))]
fn scan_frame(config: ScanConfig, frame: &Frame<'_>) -> ScanReport {
    let mut scanner = Scanner::with_config(config);
    log::debug!("scan config: {:?}", scanner.config());
    scanner.scan(frame)
}

fn scan_cmd(image: &Path, json: bool) {
    let (gray, width, height) = match load_luma(image) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let start = Instant::now();
    let report = scan_frame(ScanConfig::from_env(), &Frame::grayscale(&gray, width, height));
    let elapsed = start.elapsed();

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("Failed to serialize report: {err}"),
        }
        return;
    }

    println!("Image: {} ({}x{})", image.display(), width, height);
    match (&report.barcode, &report.stats) {
        (Some(code), _) => println!("Found {} ({:.2?})", code, elapsed),
        (None, Some(stats)) => {
            println!(
                "No barcode ({:.2?}): brightness={} contrast={} range={}-{}",
                elapsed,
                stats.avg,
                stats.contrast(),
                stats.min,
                stats.max
            );
            if let Some(hint) = stats.hint() {
                println!("Hint: {}", hint.message());
            }
        }
        (None, None) => println!("Frame rejected"),
    }
    let t = &report.telemetry;
    println!(
        "Rows: {} considered, {} gated, {} mirrored; guards={} candidates={} rejections={}",
        t.rows_considered,
        t.rows_gated,
        t.mirrored_passes,
        t.guards_found,
        t.candidates_tried,
        t.rejections()
    );
}

fn synth_cmd(code: &str, out: &Path, start: usize, module_width: usize, width: usize, height: usize) {
    let Some(gray) = synthesize_frame(code, start, module_width, width, height) else {
        eprintln!("Cannot encode {code:?}: expected 8, 12 or 13 digits");
        return;
    };
    match save_luma(out, gray, width, height) {
        Ok(()) => println!("Wrote {} ({}x{})", out.display(), width, height),
        Err(err) => eprintln!("{err}"),
    }
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>, smoke: bool, json: bool) {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(bench_limit_from_env);
    let smoke = smoke || smoke_from_env();

    if !root.exists() {
        eprintln!("Dataset root not found: {}", root.display());
        return;
    }

    let images: Vec<PathBuf> = dataset_iter(&root, limit, smoke).collect();
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return;
    }

    let start = Instant::now();
    let entries = scan_batch(&images);
    let elapsed = start.elapsed();
    let summary = BatchSummary::from_entries(&entries);

    if json {
        let payload = serde_json::json!({ "summary": summary, "entries": entries });
        match serde_json::to_string_pretty(&payload) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("Failed to serialize batch: {err}"),
        }
        return;
    }

    for entry in &entries {
        let status = if entry.is_correct() {
            "OK"
        } else if entry.error.is_some() {
            "ERR"
        } else if entry.decoded.is_some() {
            "WRONG"
        } else {
            "MISS"
        };
        let decoded = entry
            .decoded
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        println!("  [{}] {} -> {}", status, entry.path.display(), decoded);
    }
    println!(
        "Decoded {}/{} images, {} errors ({:.2?})",
        summary.decoded, summary.total, summary.errors, elapsed
    );
    if summary.labelled > 0 {
        println!(
            "Reading rate: {}/{} = {:.2}%",
            summary.correct,
            summary.labelled,
            summary.reading_rate()
        );
    }
}
