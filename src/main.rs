//! # transfersort CLI
//!
//! Command-line interface for the transfersort library.

use std::io::{self, Read, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use transfersort::cli::{Args, init_logger};
use transfersort::format::{OutputFormat, to_format_string, write_to_format};
use transfersort::parser::TransferParser;
use transfersort::{Result, TransferSortError};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logger(args.verbose);

    let parser = TransferParser::with_config(&args.parser_config());
    let format: OutputFormat = args.format.into();

    eprintln!("📦 transfersort v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "📂 Input:   {}",
        if args.reads_stdin() { "<stdin>" } else { args.input.as_str() }
    );
    eprintln!(
        "💾 Output:  {}",
        args.output.as_deref().unwrap_or("<stdout>")
    );
    eprintln!("📄 Format:  {}", format);
    eprintln!("🏪 Shops:   {}", parser.shops().len());
    eprintln!();

    if parser.shops().is_empty() {
        return Err(TransferSortError::empty_branch_map());
    }

    let input = read_input(&args)?;

    let (result, stats) = parser.parse_with_stats(&input);

    match &args.output {
        Some(path) => {
            write_to_format(&result, path, format, &args.report_config())?;
            eprintln!("✅ Done! Output saved to {}", path);
        }
        None => {
            let text = to_format_string(&result, format, &args.report_config())?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;
        }
    }

    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   Transfers:   {}", stats.transfers);
    eprintln!("   Directions:  {}", stats.directions);
    eprintln!("   Categories:  {}", stats.categories);
    eprintln!("   Unparsed:    {}", stats.unparsed);
    eprintln!("   Success:     {:.1}%", stats.success_rate());
    eprintln!(
        "⚡ Total time:  {:.3}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Reads the whole message from the input file or stdin.
fn read_input(args: &Args) -> Result<String> {
    let mut bytes = Vec::new();
    if args.reads_stdin() {
        io::stdin().lock().read_to_end(&mut bytes)?;
    } else {
        bytes = std::fs::read(&args.input)?;
    }

    String::from_utf8(bytes).map_err(|e| TransferSortError::utf8("reading input", e))
}
