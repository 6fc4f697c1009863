use colored::Colorize;
use newscols::api::{CmdMessage, CmdResult, MessageLevel};
use newscols::commands::{AttributeInfo, BlockStyle, BlockSummary};
use newscols::config::{NewscolsConfig, CONFIG_KEYS};
use newscols::document::DriftReport;
use newscols::error::Result;
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";

pub(super) fn print_json(result: &CmdResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

/// Print every non-empty part of `result`, data first, messages last.
pub(super) fn print_result(result: &CmdResult) {
    print_documents(&result.documents);
    print_blocks(&result.blocks);
    print_styles(&result.styles);
    print_drift(&result.drift);
    print_schema(&result.attributes);
    if let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn block_header(index: usize, block_name: &str) -> String {
    format!("{} {}", format!("#{}", index + 1).yellow(), block_name.bold())
}

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn print_documents(documents: &[String]) {
    for name in documents {
        println!("{}", name);
    }
}

fn print_blocks(blocks: &[BlockSummary]) {
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            block_header(block.index, block.block_name),
            format!("({} children)", block.children).dimmed()
        );
        let width = block
            .attributes
            .iter()
            .map(|(name, _)| name.width())
            .max()
            .unwrap_or(0);
        for (name, value) in &block.attributes {
            println!("{}{}  {}", INDENT, pad_to(name, width), value);
        }
    }
}

fn print_styles(styles: &[BlockStyle]) {
    for (i, entry) in styles.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", block_header(entry.index, entry.block_name));
        if entry.style.is_empty() {
            println!("{}{}", INDENT, "(no properties)".dimmed());
            continue;
        }
        let width = entry.style.iter().map(|p| p.name.width()).max().unwrap_or(0);
        for prop in entry.style.iter() {
            println!("{}{}  {}", INDENT, pad_to(&format!("{}:", prop.name), width + 1), prop.value);
        }
    }
}

fn print_drift(reports: &[DriftReport]) {
    for report in reports {
        let status = if report.style_in_sync() {
            "in sync".green()
        } else {
            "drifted".yellow()
        };
        println!("{} {}", block_header(report.index, report.block_name), status);
        if !report.style_in_sync() {
            println!(
                "{}stored:  {}",
                INDENT,
                report.stored_style.as_deref().unwrap_or("(none)").dimmed()
            );
            println!("{}derived: {}", INDENT, report.derived_style);
        }
    }
}

fn print_schema(attributes: &[AttributeInfo]) {
    if attributes.is_empty() {
        return;
    }
    let rows: Vec<[String; 5]> = attributes
        .iter()
        .map(|a| {
            let allowed = match a.range {
                Some((min, max)) => format!("{}..={}", min, max),
                None if !a.options.is_empty() => a.options.join("|"),
                None => String::new(),
            };
            [
                a.name.to_string(),
                a.kind.to_string(),
                allowed,
                a.default.unwrap_or("-").to_string(),
                a.block_types.join(", "),
            ]
        })
        .collect();
    let header = ["attribute", "kind", "allowed", "default", "block types"];
    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].width())
                .chain(std::iter::once(header[col].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_to(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    println!("{}", line(&header_cells[..]).bold());
    for row in &rows {
        println!("{}", line(&row[..]));
    }
}

fn print_config(config: &NewscolsConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}
