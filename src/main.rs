mod cli;

use mediasniff::{
    config::{self, Config, OutputFormat},
    scan_dir, sniff_file, sniff_reader, MediaContainerName, SniffReport,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediasniff=debug,mediasniff_core=trace".to_string()
        } else {
            "mediasniff=warn,mediasniff_core=warn".to_string()
        }
    });

    // stdout is reserved for reports
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Sniff {
            files,
            json,
            read_limit,
        } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(limit) = read_limit {
                config.sniff.read_limit = limit;
            }
            sniff_files(&files, &config, json)
        }
        Commands::Scan { dir, json } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            scan(&dir, &config, json)
        }
        Commands::List => list_formats(),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("mediasniff {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn wants_json(config: &Config, json_flag: bool) -> bool {
    json_flag || config.output.format == OutputFormat::Json
}

fn sniff_files(files: &[PathBuf], config: &Config, json: bool) -> Result<()> {
    let mut reports = Vec::with_capacity(files.len());
    let mut failures = 0;

    for file in files {
        let result = if file.as_os_str() == mediasniff::sniff::STDIN_PATH {
            sniff_reader(std::io::stdin().lock(), &config.sniff)
        } else {
            sniff_file(file, &config.sniff)
        };
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("{}: {}", file.display(), e);
                failures += 1;
            }
        }
    }

    if wants_json(config, json) {
        let json_str = match reports.as_slice() {
            [single] if files.len() == 1 => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(&reports)?,
        };
        println!("{}", json_str);
    } else {
        print_reports(&reports);
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files could not be read", failures, files.len());
    }
    Ok(())
}

fn scan(dir: &Path, config: &Config, json: bool) -> Result<()> {
    let reports = scan_dir(dir, &config.sniff)
        .with_context(|| format!("Failed to scan directory: {:?}", dir))?;

    if wants_json(config, json) {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
        let known = reports.iter().filter(|r| r.container.is_known()).count();
        println!("\n{} files, {} recognized", reports.len(), known);
    }

    Ok(())
}

fn print_reports(reports: &[SniffReport]) {
    for report in reports {
        println!("{}: {}", report.path.display(), report.container);
    }
}

fn list_formats() -> Result<()> {
    println!("{:>3}  {:<13} Description", "ID", "Name");
    for container in MediaContainerName::ALL {
        println!(
            "{:>3}  {:<13} {}",
            container.id(),
            container.name(),
            container.description()
        );
    }
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Read limit: {} bytes", config.sniff.read_limit);
    println!("  Follow symlinks: {}", config.sniff.follow_symlinks);
    match config.sniff.max_depth {
        Some(depth) => println!("  Max depth: {}", depth),
        None => println!("  Max depth: unlimited"),
    }
    println!("  Output format: {:?}", config.output.format);

    Ok(())
}
