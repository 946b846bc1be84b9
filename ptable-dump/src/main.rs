mod commands;
mod error;
mod report;

pub use error::Error;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use ptable_gpt::{DEFAULT_ENTRY_COUNT, ENTRY_SIZE};

#[derive(Parser)]
#[command(version, about = "Dumps MBR and GPT structures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Input {
    /// Use file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Dumps an MBR.
    Mbr {
        #[command(flatten)]
        input: Input,

        /// Dump even if the boot signature is wrong
        #[arg(long)]
        force: bool,
    },

    /// Dumps a GPT header.
    GptHeader {
        #[command(flatten)]
        input: Input,

        /// Dump even if the signature is wrong
        #[arg(long)]
        force: bool,
    },

    /// Dumps a GPT partition entry array.
    GptEntries {
        #[command(flatten)]
        input: Input,

        /// Size of a partition entry
        #[arg(short, long, default_value_t = ENTRY_SIZE)]
        size: usize,

        /// Number of partition entries
        #[arg(short, long, default_value_t = DEFAULT_ENTRY_COUNT)]
        count: usize,

        /// Show unused entries too
        #[arg(short, long)]
        all: bool,

        /// Expected CRC32 of the array, in hex
        #[arg(long, value_parser = parse_hex)]
        crc32: Option<u32>,
    },

    /// Dumps the MBR, primary GPT header and partition entries of a disk image.
    Disk {
        image: PathBuf,

        /// Logical block size in bytes
        #[arg(
            short,
            long,
            default_value_t = 512,
            value_parser = clap::value_parser!(u64).range(512..)
        )]
        block_size: u64,

        /// Show unused entries too
        #[arg(short, long)]
        all: bool,

        /// Dump even if a signature is wrong
        #[arg(long)]
        force: bool,
    },
}

fn parse_hex(value: &str) -> Result<u32, std::num::ParseIntError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16)
}

fn read(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    let mut data = Vec::new();
    match path {
        Some(path) => File::open(path)?.read_to_end(&mut data)?,
        None => std::io::stdin().lock().read_to_end(&mut data)?,
    };

    Ok(data)
}

fn run(cli: Cli) -> Result<commands::Dump, Error> {
    match cli.command {
        Command::Mbr { input, force } => commands::mbr(&read(input.file.as_deref())?, force),

        Command::GptHeader { input, force } => {
            commands::gpt_header(&read(input.file.as_deref())?, force)
        }

        Command::GptEntries {
            input,
            size,
            count,
            all,
            crc32,
        } => commands::gpt_entries(&read(input.file.as_deref())?, size, count, all, crc32),

        Command::Disk {
            image,
            block_size,
            all,
            force,
        } => commands::disk(&mut File::open(image)?, block_size, all, force),
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(dump) => {
            for warning in &dump.warnings {
                eprintln!("Warning: {}", warning);
            }

            print!("{}", dump.report);
        }

        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
