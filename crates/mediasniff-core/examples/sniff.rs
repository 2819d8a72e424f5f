//! Example: Sniff the format of a file from its first bytes

use mediasniff_core::determine_container_with_trace;
use std::env;
use std::fs::File;
use std::io::Read;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <media_file>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} movie.ts", args[0]);
        std::process::exit(1);
    }

    let path = &args[1];

    let mut head = Vec::new();
    let read = File::open(path).and_then(|file| file.take(8192).read_to_end(&mut head));
    if let Err(e) = read {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    }

    let detection = determine_container_with_trace(&head);
    println!("File: {}", path);
    println!("Read: {} bytes", head.len());
    println!(
        "Container: {} ({}, id {})",
        detection.container,
        detection.container.name(),
        detection.container.id()
    );
    println!("Matched by: {}", detection.stage);
}
