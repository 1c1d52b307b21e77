//! Decode tool: reads `|`-delimited FIX lines from the command line or
//! stdin and prints the decoded, named, typed field list plus any
//! structural validation findings.
//!
//! Set `FIX_DICT_DIR` to a directory of QuickFIX XML dictionaries to get
//! field names, dictionary types, and structural validation; without it
//! frames still decode as raw string values.
use ferrofix_decoder::{DecodedMessage, FixDecoder};
use std::io::BufRead;
use tracing::{info, warn};
mod common;
use common::init_logging;

fn print_decoded(line: &str, decoded: &DecodedMessage) {
    info!(
        "{} {} ({} fields, structurally_valid={})",
        decoded.begin_string,
        decoded.msg_type,
        decoded.fields.len(),
        decoded.structurally_valid
    );

    for field in &decoded.fields {
        let name = if field.name.is_empty() { "?" } else { &field.name };
        let type_name = if field.type_name.is_empty() {
            "?"
        } else {
            &field.type_name
        };
        info!(
            "  {:>5} {:<24} {:<12} raw={:<20} typed={}",
            field.tag,
            name,
            type_name,
            field.raw_str(),
            field.typed
        );
    }

    for error in &decoded.validation_errors {
        warn!("  validation: {error} in {line}");
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let mut decoder = FixDecoder::new();
    match std::env::var("FIX_DICT_DIR") {
        Ok(dir) if !dir.is_empty() => {
            decoder.load_dictionaries_from_directory(&dir)?;
            info!(
                "loaded {} dictionaries from {dir}",
                decoder.dictionaries().len()
            );
        }
        _ => info!("FIX_DICT_DIR not set, decoding without a schema"),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            print_decoded(&line, &decoder.decode(line.as_bytes()));
        }
    } else {
        for line in &args {
            print_decoded(line, &decoder.decode(line.as_bytes()));
        }
    }

    Ok(())
}
