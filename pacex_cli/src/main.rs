use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
struct ActionInfo {
    /// Input .pac path
    #[arg(index = 1)]
    input: String,
}

#[derive(Parser, Debug)]
struct ActionList {
    /// Input .pac path
    #[arg(index = 1)]
    input: String,
}

#[derive(Parser, Debug)]
struct ActionExtract {
    /// Input .pac path
    #[arg(index = 1)]
    input: String,

    /// Output directory. Defaults to the current directory
    #[arg(index = 2)]
    output: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Print .pac info
    Info(ActionInfo),
    /// List .pac partitions
    List(ActionList),
    /// Extract partition images from a .pac file
    Extract(ActionExtract),
}

#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    #[command(subcommand)]
    action: Action,
}

fn main() -> Result<(), pacex::Error> {
    let args = Args::parse();

    match args.action {
        Action::Info(args) => info(args),
        Action::List(args) => list(args),
        Action::Extract(args) => extract(args),
    }
}

fn info(args: ActionInfo) -> Result<(), pacex::Error> {
    let mut file = BufReader::new(File::open(&args.input)?);
    let pac = pacex::PacReader::new(&mut file)?;
    println!("product name: {}", pac.header().product_name);
    println!("firmware name: {}", pac.header().firmware_name);
    println!("partition count: {}", pac.header().partition_count);
    println!(
        "partition list offset: {:#x}",
        pac.header().partitions_list_start
    );
    println!("file size: {} bytes", pac.file_size());
    Ok(())
}

fn list(args: ActionList) -> Result<(), pacex::Error> {
    let mut file = BufReader::new(File::open(&args.input)?);
    let pac = pacex::PacReader::new(&mut file)?;
    for descriptor in pac.partitions(&mut file) {
        match descriptor {
            Ok(d) => println!(
                "{}\t{}\t{} bytes at {:#x}",
                d.partition_name, d.file_name, d.partition_size, d.partition_addr
            ),
            Err(e) => {
                // everything listed before the cut is still valid
                eprintln!("warning: descriptor list cut short: {e}");
                break;
            }
        }
    }
    Ok(())
}

fn extract(args: ActionExtract) -> Result<(), pacex::Error> {
    let mut file = BufReader::new(File::open(&args.input)?);
    let pac = pacex::PacReader::new(&mut file)?;
    println!("firmware name: {}", pac.header().firmware_name);

    let output = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output)?;

    // decode the whole list up front; extraction reuses the same handle
    let mut descriptors = Vec::new();
    for descriptor in pac.partitions(&mut file) {
        match descriptor {
            Ok(d) => descriptors.push(d),
            Err(e) => {
                eprintln!("warning: descriptor list cut short: {e}");
                break;
            }
        }
    }

    let mut extracted = 0;
    for desc in &descriptors {
        println!(
            "{} ({}): {} bytes at {:#x} of {} byte pac",
            desc.partition_name,
            desc.file_name,
            desc.partition_size,
            desc.partition_addr,
            pac.file_size()
        );
        if desc.is_empty() {
            println!("skipping empty partition");
            continue;
        }
        if !plain_file_name(&desc.file_name) {
            eprintln!(
                "skipping: {:?} is not a plain file name",
                desc.file_name
            );
            continue;
        }
        // bounds are checked before the output file is created so a corrupt
        // descriptor cannot leave an empty artifact behind
        if desc.payload_end() > pac.file_size() {
            eprintln!(
                "skipping: {}",
                pacex::Error::PayloadOutOfBounds {
                    name: desc.file_name.clone(),
                    end: desc.payload_end(),
                    file_size: pac.file_size(),
                }
            );
            continue;
        }
        let out_path = output.join(&desc.file_name);
        let mut out = match File::create(&out_path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("skipping: cannot create {}: {e}", out_path.display());
                continue;
            }
        };
        let bar = ProgressBar::new(desc.partition_size as u64)
            .with_style(progress_style())
            .with_message(desc.file_name.clone());
        match pac.extract(desc, &mut file, &mut out, |copied, _| {
            bar.set_position(copied)
        }) {
            Ok(_) => {
                bar.finish();
                extracted += 1;
            }
            Err(e @ pacex::Error::PayloadOutOfBounds { .. }) => {
                bar.finish_and_clear();
                eprintln!("skipping: {e}");
            }
            // read or write failure mid-copy aborts the whole run
            Err(e) => return Err(e),
        }
    }

    println!(
        "Extracted {} partitions to {} from {}",
        extracted,
        output.display(),
        args.input
    );
    Ok(())
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {percent}% ({bytes}/{total_bytes})")
        .expect("valid template")
}

/// Rejects decoded names that would land outside the output directory.
fn plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}
