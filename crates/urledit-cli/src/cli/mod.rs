//! Flag surface and driver loop for the urledit binary.
//!
//! The driver builds one base variant from the flags, expands it over an
//! optional `--iterate` directive, then processes every URL (argv order,
//! or file line order) through each variant in chain order.

mod input;

use clap::Parser;
use std::io::Write;
use urledit_core::engine;
use urledit_core::error::Error;
use urledit_core::pipeline;
use urledit_core::qpairs::QueryPairs;
use urledit_core::variant::{Variant, VariantChain};

/// Edit, pick apart and reassemble URLs by component.
#[derive(Debug, Parser)]
#[command(name = "urledit", version)]
#[command(about = "urledit: edit and reformat URLs by component", long_about = None)]
pub struct Cli {
    /// URL to work with (repeatable).
    #[arg(long = "url", value_name = "URL")]
    pub url: Vec<String>,

    /// Read URLs from a file, or "-" for stdin.
    #[arg(short = 'f', long = "url-file", value_name = "FILE")]
    pub url_file: Vec<String>,

    /// Append data to a component: path=SEGMENT or query=NAME=VALUE.
    #[arg(short = 'a', long = "append", value_name = "COMPONENT=DATA")]
    pub append: Vec<String>,

    /// Set component content; COMPONENT:=DATA skips encoding, empty DATA clears.
    #[arg(short = 's', long = "set", value_name = "COMPONENT=DATA")]
    pub set: Vec<String>,

    /// Redirect the URL to this reference before other edits.
    #[arg(long, value_name = "URL")]
    pub redirect: Vec<String>,

    /// Remove query pairs by name; a trailing * makes it a prefix match.
    #[arg(long, value_name = "COMPONENT=WHAT")]
    pub trim: Vec<String>,

    /// Output according to a format string of {component} references.
    #[arg(short = 'g', long = "get", value_name = "FORMAT")]
    pub get: Vec<String>,

    /// Output each URL as a JSON object, wrapped in a top-level array.
    #[arg(long)]
    pub json: bool,

    /// Run once per value: "hosts=a b c", "ports=..." or "schemes=...".
    #[arg(long, value_name = "COMPONENT=VALUES")]
    pub iterate: Vec<String>,

    /// Exit with an error on the first URL that does not parse.
    #[arg(long)]
    pub verify: bool,

    /// Accept spaces in input URLs (they are encoded while parsing).
    #[arg(long = "accept-space")]
    pub accept_space: bool,

    /// URLs to work with.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,
}

/// Parse argv and run the driver against stdout.
pub fn run_from_args() -> Result<(), Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_clap_error(err),
    };
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Map clap's own failures onto the exit-code taxonomy. Help and version
/// are not errors.
fn handle_clap_error(err: clap::Error) -> Result<(), Error> {
    use clap::error::ErrorKind;
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            std::process::exit(0);
        }
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => Err(Error::Arg(clap_message(&err))),
        _ => Err(Error::Flag(clap_message(&err))),
    }
}

fn clap_message(err: &clap::Error) -> String {
    err.to_string()
        .lines()
        .next()
        .unwrap_or("invalid command line")
        .trim_start_matches("error: ")
        .to_string()
}

/// Build the variant chain and process every URL in supplied order.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<(), Error> {
    let url_file = exclusive(&cli.url_file, "--url-file")?.map(str::to_string);
    let iterate = match cli.iterate.as_slice() {
        [] => None,
        [one] => Some(one.clone()),
        _ => return Err(Error::Iterate("only one --iterate is supported".to_string())),
    };

    let base = build_base(&cli)?;
    let mut chain = match iterate.as_deref() {
        Some(directive) => VariantChain::expand(base, directive)?,
        None => VariantChain::single(base),
    };

    // The URL file is opened before any output so a missing file cannot
    // leave half a JSON frame behind.
    let reader = match url_file.as_deref() {
        Some(path) => Some(input::open(path)?),
        None => None,
    };

    if cli.json {
        emit(out, "[\n");
    }

    if let Some(reader) = reader {
        input::for_each_line(reader, &mut |line| process_url(&mut chain, Some(line), out))?;
    } else if !cli.url.is_empty() || !cli.urls.is_empty() {
        for url in cli.url.iter().chain(cli.urls.iter()) {
            process_url(&mut chain, Some(url), out)?;
        }
    } else {
        process_url(&mut chain, None, out)?;
    }

    if cli.json {
        emit(out, "\n]\n");
    }
    Ok(())
}

/// Run one URL through every variant, in chain order.
fn process_url(chain: &mut VariantChain, url: Option<&str>, out: &mut dyn Write) -> Result<(), Error> {
    for variant in chain.iter_mut() {
        if let Some(rendered) = pipeline::process(variant, url)? {
            emit(out, &rendered);
        }
    }
    Ok(())
}

/// Write rendered output. A failed write (closed pipe) is not recoverable
/// mid-stream and is dropped.
fn emit(out: &mut dyn Write, text: &str) {
    if let Err(e) = out.write_all(text.as_bytes()) {
        tracing::debug!("stdout write failed: {e}");
    }
}

/// Build the base variant from the flag values.
fn build_base(cli: &Cli) -> Result<Variant, Error> {
    let mut base = Variant {
        json: cli.json,
        verify: cli.verify,
        accept_space: cli.accept_space,
        redirect: exclusive(&cli.redirect, "--redirect")?.map(str::to_string),
        format: exclusive(&cli.get, "--get")?.map(str::to_string),
        set_list: cli.set.clone(),
        trim_list: cli.trim.clone(),
        ..Variant::default()
    };
    for entry in &cli.append {
        // Appended data is encoded here, at insertion time.
        if let Some(rest) = strip_prefix_ci(entry, "path=") {
            base.append_path.push(engine::escape(rest));
        } else if let Some(rest) = strip_prefix_ci(entry, "query=") {
            base.append_query.push(QueryPairs::encode_pair(rest));
        } else {
            return Err(Error::Append(format!(
                "--append unsupported component: {entry}"
            )));
        }
    }
    Ok(base)
}

/// At most one occurrence of an exclusive flag.
fn exclusive<'a>(values: &'a [String], flag: &str) -> Result<Option<&'a str>, Error> {
    match values {
        [] => Ok(None),
        [one] => Ok(Some(one.as_str())),
        _ => Err(Error::Flag(format!("only one {flag} is supported"))),
    }
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests;
