//! Paged-memory simulator entry point.
//!
//! Usage: pagesim <physical_mem_size_bytes> <logical_addr_bits> <page_size_bytes> <descriptor>...

use std::env;
use std::io::{self, Write};
use std::process;

use log::LevelFilter;
use pagesim::logging;
use pagesim::mem::frame_allocator::FrameAllocator;
use pagesim::mem::MemoryParams;
use pagesim::registry::ProcessRegistry;
use pagesim::report;

struct Config {
    physical_size: usize,
    logical_addr_bits: usize,
    page_size: usize,
    descriptors: Vec<String>,
}

fn main() {
    logging::init(LevelFilter::Info);

    let config = match parse_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <physical_mem_size_bytes> <logical_addr_bits> <page_size_bytes> <descriptor>...\n\
         \n\
         Arguments:\n\
         \x20 physical_mem_size_bytes - total physical memory, in bytes\n\
         \x20 logical_addr_bits       - logical address width, in bits\n\
         \x20 page_size_bytes         - page/frame size, in bytes\n\
         \x20 descriptor              - one or more process descriptor files"
    )
}

fn parse_size(name: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("{name} must be a non-negative integer, got {value:?}"))
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("pagesim", String::as_str);

    if args.len() < 5 {
        return Err(usage(program));
    }

    Ok(Config {
        physical_size: parse_size("physical memory size", &args[1])?,
        logical_addr_bits: parse_size("logical address size", &args[2])?,
        page_size: parse_size("page size", &args[3])?,
        descriptors: args[4..].to_vec(),
    })
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let params = MemoryParams::new(
        config.physical_size,
        config.logical_addr_bits,
        config.page_size,
    )?;

    println!("Physical Memory Size: {} bytes", params.physical_size);
    println!("Logical Address Size: {} bits", params.logical_addr_bits);
    println!("Page Size: {} bytes", params.page_size);
    println!("Number of Frames: {}", params.num_frames());

    let mut allocator = FrameAllocator::new(params.num_frames(), params.page_size)?;
    let mut registry = ProcessRegistry::new();
    registry.load_batch(&config.descriptors, &mut allocator)?;

    for (ordinal, process) in registry.processes().iter().enumerate() {
        println!(
            "Process {} ({}), PID: {}, Process Size: {} bytes, Number of Pages: {}",
            ordinal + 1,
            process.source.display(),
            process.pid,
            process.size(),
            process.num_pages()
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out)?;
    report::write_dump(&mut out, &registry, &allocator)?;
    writeln!(out)?;
    report::write_free_frames(&mut out, &allocator)?;

    registry.teardown(&mut allocator);
    Ok(())
}
