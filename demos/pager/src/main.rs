//! Print a text pager.
//!
//! ```text
//! $ pager 95 10 5
//! < 4 [5] 6 ... 10 >
//! ```

use tracing::info;
use usekit::prelude::*;

struct PagerArgs {
    total_count: i64,
    page_size: i64,
    current_page: i64,
}

fn print_usage() {
    println!("usage: pager TOTAL PAGE_SIZE CURRENT");
}

fn parse_number(name: &str, value: Option<String>) -> Result<i64, Box<dyn std::error::Error>> {
    let value = value.ok_or_else(|| format!("missing {name}"))?;
    value
        .parse()
        .map_err(|err| format!("invalid {name} {value:?}: {err}").into())
}

fn parse_cli_args(
    args: impl IntoIterator<Item = String>,
) -> Result<Option<PagerArgs>, Box<dyn std::error::Error>> {
    let mut args = args.into_iter().peekable();
    if args
        .peek()
        .is_some_and(|first| first == "-h" || first == "--help")
    {
        return Ok(None);
    }

    let parsed = PagerArgs {
        total_count: parse_number("TOTAL", args.next())?,
        page_size: parse_number("PAGE_SIZE", args.next())?,
        current_page: parse_number("CURRENT", args.next())?,
    };
    if let Some(extra) = args.next() {
        return Err(format!("unexpected argument {extra:?}").into());
    }
    Ok(Some(parsed))
}

/// The pager as one line: disabled arrows become spaces, the current page
/// is bracketed.
fn pager(args: &PagerArgs) -> Result<String, PaginationError> {
    let range = use_pagination(args.total_count, args.page_size, args.current_page)?;

    let mut cells = Vec::with_capacity(range.items.len() + 2);
    cells.push(if range.has_previous_page { "<" } else { " " }.to_owned());
    for item in &range.items {
        cells.push(match item {
            PageItem::Page(page) if i64::try_from(*page).ok() == Some(args.current_page) => {
                format!("[{page}]")
            }
            item => item.to_string(),
        });
    }
    cells.push(if range.has_next_page { ">" } else { " " }.to_owned());

    info!(
        total_page_count = range.total_page_count,
        items = range.items.len(),
        "rendered pager"
    );
    Ok(cells.join(" "))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    let parsed = parse_cli_args(std::env::args().skip(1)).inspect_err(|_| print_usage())?;
    let Some(args) = parsed else {
        print_usage();
        return Ok(());
    };

    let line = render(|| pager(&args))?;
    println!("{}", line.trim_end());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn line(total_count: i64, page_size: i64, current_page: i64) -> String {
        let args = PagerArgs {
            total_count,
            page_size,
            current_page,
        };
        render(|| pager(&args)).unwrap()
    }

    #[test]
    fn marks_current_page_and_arrows() {
        assert_eq!(line(95, 10, 5), "< 4 [5] 6 ... 10 >");
    }

    #[test]
    fn disabled_arrows_become_spaces() {
        assert_eq!(line(50, 10, 1), "  [1] 2 3 4 5 >");
        assert_eq!(line(100, 10, 10), "< 6 7 8 9 [10]  ");
    }

    #[test]
    fn empty_pager_has_no_items() {
        assert_eq!(line(0, 10, 1), "   ");
    }

    #[test]
    fn invalid_page_size_is_an_error() {
        let args = PagerArgs {
            total_count: 10,
            page_size: 0,
            current_page: 1,
        };
        assert!(render(|| pager(&args)).is_err());
    }

    #[test]
    fn parses_three_numbers() {
        let parsed = parse_cli_args(args(&["95", "10", "5"])).unwrap().unwrap();
        assert_eq!(
            (parsed.total_count, parsed.page_size, parsed.current_page),
            (95, 10, 5)
        );
    }

    #[test]
    fn help_flag_skips_parsing() {
        assert!(parse_cli_args(args(&["--help"])).unwrap().is_none());
        assert!(parse_cli_args(args(&["-h", "junk"])).unwrap().is_none());
    }

    #[test]
    fn missing_and_extra_arguments_are_rejected() {
        let missing = parse_cli_args(args(&["95", "10"])).err().unwrap();
        assert_eq!(missing.to_string(), "missing CURRENT");

        let extra = parse_cli_args(args(&["95", "10", "5", "6"])).err().unwrap();
        assert_eq!(extra.to_string(), "unexpected argument \"6\"");

        let invalid = parse_cli_args(args(&["lots", "10", "5"])).err().unwrap();
        assert!(invalid.to_string().starts_with("invalid TOTAL \"lots\""));
    }
}
