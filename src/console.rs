//! Line-oriented front ends standing in for the windows.
//!
//! Each input line is one UI action (button click, text edit, menu item).
//! Parsing is pure; the binaries own the read loop.

use crate::browser::{CannedQuery, Grid, Surface};
use crate::converter::Currency;
use crate::notice::Notice;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(tokio::io::stdin()).lines()
}

pub fn print_notices(notices: &[Notice]) {
    for n in notices {
        println!("{n}");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConverterCommand {
    /// Text typed into one field; may be anything, including empty.
    Edit { field: Currency, text: String },
    Clear,
    Refresh,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_converter(line: &str) -> Option<ConverterCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = split_head(line);
    let cmd = match head.to_ascii_lowercase().as_str() {
        "clear" => ConverterCommand::Clear,
        "refresh" => ConverterCommand::Refresh,
        "show" => ConverterCommand::Show,
        "help" | "?" => ConverterCommand::Help,
        "quit" | "exit" => ConverterCommand::Quit,
        _ => match Currency::from_code(head) {
            Some(field) => ConverterCommand::Edit {
                field,
                text: rest.to_string(),
            },
            None => ConverterCommand::Unknown(line.to_string()),
        },
    };
    Some(cmd)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserCommand {
    Open(PathBuf),
    Close,
    Run(CannedQuery),
    /// Dropdown entry by position (0 is the placeholder) or by column name.
    Select(ColumnChoice),
    Show(Option<Surface>),
    Columns,
    Help,
    Quit,
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnChoice {
    Index(usize),
    Name(String),
}

pub fn parse_browser(line: &str) -> Option<BrowserCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = split_head(line);
    let cmd = match head.to_ascii_lowercase().as_str() {
        "open" | "connect" => BrowserCommand::Open(PathBuf::from(rest)),
        "close" | "disconnect" => BrowserCommand::Close,
        "b1" => BrowserCommand::Run(CannedQuery::ListNames),
        "b2" => BrowserCommand::Run(CannedQuery::FirstFiveTables),
        "b3" => BrowserCommand::Run(CannedQuery::FirstThreeSchemas),
        "run" => match CannedQuery::from_id(rest) {
            Some(q) => BrowserCommand::Run(q),
            None => BrowserCommand::Unknown(line.to_string()),
        },
        "select" => match rest.parse::<usize>() {
            Ok(i) => BrowserCommand::Select(ColumnChoice::Index(i)),
            Err(_) => BrowserCommand::Select(ColumnChoice::Name(rest.to_string())),
        },
        "show" => {
            if rest.is_empty() {
                BrowserCommand::Show(None)
            } else {
                match parse_surface(rest) {
                    Some(s) => BrowserCommand::Show(Some(s)),
                    None => BrowserCommand::Unknown(line.to_string()),
                }
            }
        }
        "columns" => BrowserCommand::Columns,
        "help" | "?" => BrowserCommand::Help,
        "quit" | "exit" => BrowserCommand::Quit,
        _ => BrowserCommand::Unknown(line.to_string()),
    };
    Some(cmd)
}

fn parse_surface(text: &str) -> Option<Surface> {
    Surface::ALL
        .into_iter()
        .find(|s| s.title().eq_ignore_ascii_case(text.trim()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    ToggleLabel,
    Load(PathBuf),
    Paint { width: u32, height: u32 },
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_viewer(line: &str) -> Option<ViewerCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (head, rest) = split_head(line);
    let cmd = match head.to_ascii_lowercase().as_str() {
        "button1" | "toggle" => ViewerCommand::ToggleLabel,
        "button2" | "load" => ViewerCommand::Load(PathBuf::from(rest)),
        "paint" => {
            let mut dims = rest.split_whitespace().map(str::parse::<u32>);
            match (dims.next(), dims.next(), dims.next()) {
                (Some(Ok(width)), Some(Ok(height)), None) => ViewerCommand::Paint { width, height },
                _ => ViewerCommand::Unknown(line.to_string()),
            }
        }
        "help" | "?" => ViewerCommand::Help,
        "quit" | "exit" => ViewerCommand::Quit,
        _ => ViewerCommand::Unknown(line.to_string()),
    };
    Some(cmd)
}

fn split_head(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

/// Plain-text table for a grid, columns padded to their widest cell.
pub fn format_grid(grid: &Grid) -> String {
    if grid.is_empty() {
        return "(empty)".to_string();
    }
    let mut widths: Vec<usize> = grid.headers.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(&grid.headers)];
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.extend(grid.rows.iter().map(|r| line(r)));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converter_edit_keeps_raw_text() {
        assert_eq!(
            parse_converter("usd 12.5"),
            Some(ConverterCommand::Edit {
                field: Currency::Usd,
                text: "12.5".to_string()
            })
        );
        assert_eq!(
            parse_converter("RUB"),
            Some(ConverterCommand::Edit {
                field: Currency::Rub,
                text: String::new()
            })
        );
        assert_eq!(parse_converter("   "), None);
        assert!(matches!(
            parse_converter("gbp 3"),
            Some(ConverterCommand::Unknown(_))
        ));
    }

    #[test]
    fn browser_buttons_map_to_queries() {
        assert_eq!(
            parse_browser("b2"),
            Some(BrowserCommand::Run(CannedQuery::FirstFiveTables))
        );
        assert_eq!(
            parse_browser("run column-limit-10"),
            Some(BrowserCommand::Run(CannedQuery::ColumnLimit10))
        );
        assert_eq!(
            parse_browser("select 2"),
            Some(BrowserCommand::Select(ColumnChoice::Index(2)))
        );
        assert_eq!(
            parse_browser("select email"),
            Some(BrowserCommand::Select(ColumnChoice::Name("email".into())))
        );
        assert_eq!(
            parse_browser("open /tmp/my db.sqlite"),
            Some(BrowserCommand::Open(PathBuf::from("/tmp/my db.sqlite")))
        );
        assert_eq!(
            parse_browser("show tab3"),
            Some(BrowserCommand::Show(Some(Surface::Tab3)))
        );
    }

    #[test]
    fn viewer_paint_needs_two_dimensions() {
        assert_eq!(
            parse_viewer("paint 600 400"),
            Some(ViewerCommand::Paint {
                width: 600,
                height: 400
            })
        );
        assert!(matches!(
            parse_viewer("paint 600"),
            Some(ViewerCommand::Unknown(_))
        ));
    }

    #[test]
    fn grid_formatting_pads_columns() {
        let grid = Grid {
            headers: vec!["id".into(), "name".into()],
            rows: vec![vec!["1".into(), "a".into()], vec!["22".into(), "NULL".into()]],
        };
        let text = format_grid(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id | name");
        assert_eq!(lines[1], "---+-----");
        assert_eq!(lines[2], "1  | a");
        assert_eq!(lines[3], "22 | NULL");
    }
}
