use anyhow::Result;
use retrace_model::{HistoryEntry, QuerySuggestions, ScoredWord, codec};

use super::args::OutputFormat;
use crate::workflow::SearchReport;

/// Print a search report in the chosen format.
pub(crate) fn print_search(report: &SearchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Plain => {
            if let Some(query) = &report.query {
                println!("query: {}", codec::encode(query));
            }
            if let Some(index) = report.history_index {
                println!("recorded as history entry {index}");
            }
            println!();
            for (rank, row) in report.results.iter().enumerate() {
                println!(
                    "{:>3}. [{:.1}] {}  {}",
                    rank + 1,
                    row.score,
                    row.detail.title,
                    row.detail.url
                );
            }
            if report.results.is_empty() {
                println!("no results");
            }
            Ok(())
        }
    }
}

/// Print recorded history entries in the chosen format.
pub(crate) fn print_history(entries: &[HistoryEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&entries),
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("no recorded searches");
                return Ok(());
            }
            for entry in entries {
                println!(
                    "{}  {:<8}  {} ({} engaged)",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    format!("{:?}", entry.kind()).to_lowercase(),
                    codec::encode(&entry.query),
                    entry.webpages.len()
                );
            }
            Ok(())
        }
    }
}

/// Print suggestion lists in the chosen format.
pub(crate) fn print_suggestions(suggestions: &QuerySuggestions, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(suggestions),
        OutputFormat::Plain => {
            if suggestions.is_empty() {
                println!("no suggestions");
                return Ok(());
            }
            if let Some(queries) = &suggestions.similar_queries {
                println!("similar queries:");
                for (text, score) in queries {
                    println!("  {text} ({score:.2})");
                }
            }
            print_word_list("fuzzy-matched words", suggestions.fuzzy_matched_words.as_deref());
            print_word_list("relevant words", suggestions.relevant_words.as_deref());
            print_word_list("co-occurring words", suggestions.co_occurring_words.as_deref());
            Ok(())
        }
    }
}

fn print_word_list(heading: &str, words: Option<&[ScoredWord]>) {
    let Some(words) = words else {
        return;
    };
    println!("{heading}:");
    for (text, first, second) in words {
        println!("  {text} ({first:.2}, {second:.2})");
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
