use std::path::Path;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::document_io::{self, atomic_write};
use crate::model::config::Config;
use crate::model::document::Document;
use crate::model::fragment::Fragment;
use crate::model::heading::IdAllocator;
use crate::model::timestamp::Timestamp;
use crate::ops::clocking::{self, ClockTotals};
use crate::ops::completion::{self, CompletionSources};
use crate::ops::{filter, outline};
use crate::parse::{parse_filter, render_fragments_with_width, render_timestamp, serialize_document};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let json = cli.json || config.output.json;

    match cli.command {
        Commands::Parse(args) => cmd_parse(args, &config, json),
        Commands::Export(args) => cmd_export(args, &config),
        Commands::Filter(args) => cmd_filter(args, &config, json),
        Commands::Complete(args) => cmd_complete(args, &config, json),
        Commands::Clock(args) => cmd_clock(args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_parse(args: ParseArgs, config: &Config, json: bool) -> CmdResult {
    let (_, doc) = load(&args.file, config)?;
    let totals = clocking::clock_totals(&doc.headings);

    if json {
        let headings: Vec<HeadingJson> = doc
            .headings
            .iter()
            .zip(totals)
            .map(|(h, t)| heading_to_json(h, Some(t)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&headings)?);
        return Ok(());
    }

    for (heading, totals) in doc.headings.iter().zip(totals) {
        println!("{}", format_heading_line(heading));
        let indent = " ".repeat(heading.nesting_level + 1);
        for item in &heading.planning_items {
            let label = item.kind.keyword().unwrap_or("AT");
            println!("{}{}: {}", indent, label, render_timestamp(&item.timestamp));
        }
        for property in &heading.property_list_items {
            println!(
                "{}:{}: {}",
                indent,
                property.property,
                render_fragments_with_width(&property.value, 1)
            );
        }
        if totals.recursive > 0 {
            println!(
                "{}clocked {} ({} with subtree)",
                indent,
                clocking::format_duration(totals.own),
                clocking::format_duration(totals.recursive)
            );
        }
        for fragment in &heading.description {
            if let Fragment::Table(_) = fragment {
                let table = render_fragments_with_width(
                    std::slice::from_ref(fragment),
                    config.table.min_column_width,
                );
                for line in table.lines() {
                    println!("{}{}", indent, line);
                }
            }
        }
    }
    Ok(())
}

fn cmd_export(args: ExportArgs, config: &Config) -> CmdResult {
    let (source, doc) = load(&args.file, config)?;
    let output = serialize_document(&doc);

    if args.check {
        if output != source {
            let line = first_difference(&source, &output);
            return Err(format!(
                "{}: output differs from input at line {}",
                args.file.display(),
                line
            )
            .into());
        }
        println!("{}: round trip ok", args.file.display());
        return Ok(());
    }

    match args.output {
        Some(path) => atomic_write(&path, output.as_bytes())
            .map_err(|e| format!("could not write {}: {}", path.display(), e))?,
        None => print!("{}", output),
    }
    Ok(())
}

fn cmd_filter(args: FilterArgs, config: &Config, json: bool) -> CmdResult {
    let (_, doc) = load(&args.file, config)?;
    let groups = parse_filter(&args.query)
        .map_err(|e| format!("filter string has a syntax error: {}", e))?;
    let matches = filter::filter_headings(&doc.headings, &groups);

    if json {
        let headings: Vec<HeadingJson> = matches
            .iter()
            .map(|&i| heading_to_json(&doc.headings[i], None))
            .collect();
        println!("{}", serde_json::to_string_pretty(&headings)?);
    } else {
        for &i in &matches {
            println!("{}", format_heading_line(&doc.headings[i]));
        }
    }
    Ok(())
}

fn cmd_complete(args: CompleteArgs, config: &Config, json: bool) -> CmdResult {
    let (_, doc) = load(&args.file, config)?;
    let sources = completion_sources(&doc);
    let cursor = args.cursor.unwrap_or_else(|| args.query.chars().count());

    let completions = if args.datalist {
        completion::compute_completions_for_datalist(&sources, &args.query, cursor)
    } else {
        completion::compute_completions(&sources, &args.query, cursor)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&completions)?);
    } else {
        for completion in completions {
            println!("{}", completion);
        }
    }
    Ok(())
}

fn cmd_clock(args: ClockArgs, config: &Config, json: bool) -> CmdResult {
    let (_, doc) = load(&args.file, config)?;
    let from = args.from.as_deref().map(parse_date).transpose()?;
    let to = args.to.as_deref().map(parse_date).transpose()?;

    let totals = if from.is_some() || to.is_some() {
        let in_window = |ts: &Timestamp| {
            ts.date().is_some_and(|d| {
                from.is_none_or(|f| d >= f) && to.is_none_or(|t| d <= t)
            })
        };
        clocking::clock_totals_filtered(&doc.headings, in_window)
    } else {
        clocking::clock_totals(&doc.headings)
    };

    let rows: Vec<(usize, ClockTotals)> = totals
        .into_iter()
        .enumerate()
        .filter(|(_, t)| t.recursive > 0)
        .collect();

    if json {
        let json_rows: Vec<ClockRowJson> = rows
            .iter()
            .map(|&(i, t)| ClockRowJson {
                level: doc.headings[i].nesting_level,
                title: display_title(&doc.headings[i]),
                totals: clock_to_json(t),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("no clocked time");
        return Ok(());
    }
    let width = rows
        .iter()
        .map(|&(i, _)| format_heading_line(&doc.headings[i]).chars().count())
        .max()
        .unwrap_or(0);
    for (i, t) in rows {
        println!("{}", format_clock_row(&doc.headings[i], t, width));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load(path: &Path, config: &Config) -> Result<(String, Document), document_io::DocumentError> {
    let fallback = [config.keywords.default_set()];
    document_io::read_document(path, &fallback, &mut IdAllocator::new())
}

fn completion_sources(doc: &Document) -> CompletionSources {
    CompletionSources::new(
        outline::all_todo_keywords(doc),
        outline::all_tags(&doc.headings),
        outline::all_properties(&doc.headings),
    )
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

/// 1-based line number of the first line that differs
fn first_difference(a: &str, b: &str) -> usize {
    a.split('\n')
        .zip(b.split('\n'))
        .position(|(x, y)| x != y)
        .unwrap_or_else(|| a.split('\n').count().min(b.split('\n').count()))
        + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference("a\nb\nc", "a\nx\nc"), 2);
        assert_eq!(first_difference("a\nb", "a\nb\n"), 3);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-01"), Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(parse_date("03/01/2024").is_err());
    }
}
