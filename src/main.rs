use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;

use reduced_model::cli::{CliArgs, RunConfig};
use reduced_model::config::OutputFormat;
use reduced_model::debug_dump::{CaretDump, ModelDump};
use reduced_model::{rescan, Document, HighlightSpan};

fn main() -> Result<()> {
    reduced_model::tracing::init();

    let args = CliArgs::parse();
    let defaults = args.load_defaults();
    let config = args.into_config(defaults).map_err(anyhow::Error::msg)?;

    let text = read_input(&config)?;

    // Typed one character at a time, the way an editor feeds the model
    let mut document = Document::new();
    for ch in text.chars() {
        document.type_char(ch);
    }
    document.file_path = config.input.clone();
    tracing::info!(
        chars = document.len_chars(),
        tokens = document.model().token_count(),
        "typed document"
    );

    if let Some(caret) = config.caret {
        document
            .set_caret(caret)
            .with_context(|| format!("caret {caret} is outside the document"))?;
    }

    let highlights = if config.highlight {
        Some(document.highlight(0..document.len_chars())?)
    } else {
        None
    };

    match config.format {
        OutputFormat::Json => {
            let mut dump = ModelDump::new(&document);
            if let Some(spans) = highlights {
                dump = dump.with_highlights(spans);
            }
            if config.caret.is_some() {
                dump = dump.with_caret(CaretDump::new(&document));
            }
            println!("{}", dump.to_json());
        }
        OutputFormat::Text => {
            print_text(&document, highlights.as_deref(), config.caret.is_some());
        }
    }

    if config.verify {
        if !document.is_consistent() {
            let expected = rescan::lex(&document.text());
            bail!(
                "model diverged from a full rescan: {} tokens, expected {}",
                document.model().token_count(),
                expected.len()
            );
        }
        eprintln!("verified {} tokens", document.model().token_count());
    }

    Ok(())
}

fn read_input(config: &RunConfig) -> Result<String> {
    match &config.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_text(document: &Document, highlights: Option<&[HighlightSpan]>, caret: bool) {
    println!("{}", document.model().dump());

    if let Some(spans) = highlights {
        println!();
        for span in spans {
            println!("{:>6}..{:<6} {:?}", span.start, span.end, span.kind);
        }
    }

    if caret {
        let info = CaretDump::new(document);
        println!();
        println!("caret:    {} ({})", info.offset, info.state);
        println!("line:     {}..{}", info.line_start, info.line_end);
        match info.matching_braces {
            Some((open, close)) => println!("match:    {open} <-> {close}"),
            None => println!("match:    none"),
        }
        match info.enclosing_brace {
            Some(enclosing) => println!("inside:   `{}` at {}", enclosing.brace, enclosing.offset),
            None => println!("inside:   top level"),
        }
    }
}
