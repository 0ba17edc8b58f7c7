mod config;
mod error;
mod msg;

use color_print::{ceprintln, cformat};
use indexmap::IndexMap;
use optable::{Format, Handler, OpcodeTable, Reason, Report};
use std::fs::File;
use std::io::Write;

use config::Config;
use error::Error;
use msg::{Msg, Source};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Handler source file
    #[clap(default_value = "chip8_impl.h")]
    input: String,

    /// Output file (stdout if omitted)
    #[clap(short, long)]
    output: Option<String>,

    /// Output format: c, rust
    #[clap(short, long)]
    format: Option<String>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<String>,

    /// Handler for unclaimed opcodes
    #[clap(short, long)]
    sentinel: Option<String>,

    /// Report skipped comments and a summary
    #[clap(short, long)]
    verbose: bool,

    /// Report opcodes claimed by more than one pattern
    #[clap(long)]
    collisions: bool,
}

fn main() {
    use clap::Parser;
    use std::error::Error as _;

    let args: Args = Args::parse();
    if let Err(err) = run(&args, &mut std::io::stdout().lock()) {
        Msg::Error(err.to_string()).print();
        let mut source = err.source();
        while let Some(cause) = source {
            Msg::Note(cause.to_string()).print();
            source = cause.source();
        }
        std::process::exit(1);
    }
}

/// Defaults, then the config file, then command line flags.
fn settings(args: &Args) -> Result<Config, Error> {
    let mut cfg = Config::load(args.config.as_deref())?;
    if let Some(fmt) = &args.format {
        cfg.format = Format::parse(fmt).map_err(Error::UnknownFormat)?;
    }
    if let Some(sentinel) = &args.sentinel {
        cfg.sentinel = sentinel.clone();
    }
    Ok(cfg)
}

/// Writes the table to `-o`, or to `out` when no output file is given.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), Error> {
    let cfg = settings(args)?;

    if args.verbose {
        eprintln!("1. Scan Comments");
        eprintln!("  < {}", args.input);
    }
    let lines = optable::read_lines(&args.input)?;
    let src = Source {
        path: &args.input,
        lines: &lines,
    };
    let mut table = OpcodeTable::new(&cfg.sentinel);
    if args.collisions {
        table = table.track_collisions();
    }
    let report = optable::build(&lines, &mut table);

    if args.verbose {
        report_skipped(&src, &report);
    }
    if args.collisions {
        report_collisions(&src, &report, &table);
    }

    let text = optable::render(&table, cfg.format, &cfg.layout);
    match &args.output {
        Some(path) => {
            if args.verbose {
                eprintln!("2. Write Table");
                eprintln!("  > {}", path);
            }
            let mut file = File::create(path)
                .map_err(|e| optable::Error::FileCreate(path.clone(), e))?;
            file.write_all(text.as_bytes())
                .map_err(|e| optable::Error::FileWrite(path.clone(), e))?;
        }
        None => out
            .write_all(text.as_bytes())
            .map_err(|e| optable::Error::FileWrite("<stdout>".to_string(), e))?,
    }

    if args.verbose {
        summary(&report, &table);
    }
    Ok(())
}

fn report_skipped(src: &Source, report: &Report) {
    for (entry, err) in &report.rejected {
        Msg::Warn(format!("Skipped `{}`: {}", entry.handler, err)).at(src, entry.line);
    }
    for block in &report.incomplete {
        let why = match block.reason {
            Reason::NoPattern => "comment closed before a pattern line",
            Reason::NoHandler => "no handler declaration follows",
            Reason::Interrupted => "another comment opened first",
            Reason::Unterminated => "input ended",
        };
        Msg::Note(format!("Comment ignored: {}", why)).at(src, block.line);
    }
}

fn report_collisions(src: &Source, report: &Report, table: &OpcodeTable) {
    let mut pairs: IndexMap<(Handler, Handler), Vec<u16>> = IndexMap::new();
    for c in table.collisions() {
        pairs
            .entry((c.previous.clone(), c.current.clone()))
            .or_default()
            .push(c.code);
    }
    for ((previous, current), codes) in &pairs {
        let first = codes.first().copied().unwrap_or_default();
        Msg::Warn(cformat!(
            "`{}` overrides `{}` on {} opcode(s), first <s>0x{:04X}</>",
            current,
            previous,
            codes.len(),
            first
        ))
        .print();
        for (entry, _) in report.accepted.iter().filter(|(e, _)| e.handler == *current) {
            Msg::Note(format!("`{}` declared here", current)).at(src, entry.line);
        }
    }
}

fn summary(report: &Report, table: &OpcodeTable) {
    let mut claimed: IndexMap<&Handler, usize> = IndexMap::new();
    for code in table.assigned() {
        *claimed.entry(table.get(code)).or_default() += 1;
    }
    eprintln!("-------------------+-----------------------------------------------------");
    for (handler, count) in &claimed {
        ceprintln!(" <g>{:>17}</> | {}", count, handler);
    }
    eprintln!("-------------------+-----------------------------------------------------");
    eprintln!(
        " {} patterns, {} skipped, {} / {} opcodes assigned",
        report.accepted.len(),
        report.rejected.len() + report.incomplete.len(),
        table.assigned_count(),
        table.len()
    );
}
