use std::{
    collections::HashMap,
    io::{self, Write},
};

use colored::Colorize;
use log::debug;

use crate::types::Warning;

pub fn print_clean_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("No issues detected");
    writeln!(writer, "{} No testing-library issues found.", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

pub fn print_warnings<W: Write>(writer: &mut W, warnings: &[Warning]) -> io::Result<()> {
    debug!("Printing {} warnings", warnings.len());
    let mut by_file: HashMap<&str, Vec<&Warning>> = HashMap::new();
    for w in warnings {
        by_file.entry(w.file.as_str()).or_default().push(w);
    }

    writeln!(
        writer,
        "{} {} testing-library issue(s) found\n",
        "⚠".yellow().bold(),
        warnings.len().to_string().yellow()
    )?;

    let mut files: Vec<&str> = by_file.keys().copied().collect();
    files.sort_unstable();

    for file in files {
        let mut file_warnings = by_file.remove(file).unwrap_or_default();
        file_warnings.sort_by_key(|w| (w.line, w.column));

        writeln!(writer, "{}", file.blue())?;
        for (idx, w) in file_warnings.iter().enumerate() {
            let prefix = if idx == file_warnings.len() - 1 { "└──" } else { "├──" };
            writeln!(
                writer,
                "{}  {}:{}  {}  {}",
                prefix.dimmed(),
                w.line,
                w.column,
                w.rule.yellow(),
                w.message
            )?;
        }
        writeln!(writer)?;
    }

    print_summary(writer, warnings)?;
    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, warnings: &[Warning]) -> io::Result<()> {
    let mut per_rule: HashMap<&str, usize> = HashMap::new();
    for w in warnings {
        *per_rule.entry(w.rule).or_default() += 1;
    }

    writeln!(writer, "{}", "─".repeat(60).dimmed())?;
    writeln!(writer, "{}", "Summary".bold())?;

    let mut rules: Vec<(&str, usize)> = per_rule.into_iter().collect();
    rules.sort_unstable();
    for (rule, count) in rules {
        writeln!(writer, "  {}: {}", rule, count.to_string().yellow().bold())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(file: &str, line: usize, rule: &'static str) -> Warning {
        Warning {
            file: file.to_string(),
            line,
            column: 1,
            rule,
            message: "something is off".to_string(),
        }
    }

    #[test]
    fn test_clean_message_mentions_no_issues() {
        let mut out = Vec::new();
        print_clean_message(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No testing-library issues"));
    }

    #[test]
    fn test_warnings_grouped_by_file_in_order() {
        let mut out = Vec::new();
        let warnings = vec![
            warning("b.test.ts", 3, "await-async-query"),
            warning("a.test.ts", 1, "render-result-naming"),
            warning("a.test.ts", 9, "await-async-query"),
        ];
        print_warnings(&mut out, &warnings).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("3 testing-library issue(s)"));
        let a = text.find("a.test.ts").unwrap();
        let b = text.find("b.test.ts").unwrap();
        assert!(a < b);
        assert!(text.contains("Summary"));
    }
}
