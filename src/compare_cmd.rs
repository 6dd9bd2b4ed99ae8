use std::io::{self, Write};

use anyhow::Result;
use computus::{DateRange, EasterResult, Summary, YearResults};
use serde::Serialize;

use crate::cli::CompareArgs;
use crate::config::Config;
use crate::dataset;

#[derive(Serialize)]
struct JsonReport<'a> {
    start_year: i32,
    end_year: i32,
    results: Vec<&'a EasterResult>,
    out_of_range: Vec<i32>,
    summary: Summary,
}

/// Compare both methods over a range of years.
pub fn run(args: CompareArgs, config: &Config) -> Result<()> {
    let path = args.dataset.as_deref().or(config.dataset.path.as_deref());
    let comparison = dataset::comparison(path)?;
    let range = comparison.range();

    let first = args
        .from
        .or(config.range.first_year)
        .unwrap_or(range.start_year());
    let last = args
        .to
        .or(config.range.last_year)
        .unwrap_or(range.end_year());
    if first > last {
        anyhow::bail!("first year {first} is after last year {last}");
    }

    let results = comparison.compare_range_parallel(first, last)?;
    let summary = Summary::from_results(&results);

    if args.json {
        let report = JsonReport {
            start_year: range.start_year(),
            end_year: range.end_year(),
            results: results.values().filter_map(|r| r.as_ref().ok()).collect(),
            out_of_range: out_of_range_years(&results),
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stdout = io::stdout();
    write_report(&mut stdout.lock(), range, &results, args.all, &summary)?;
    Ok(())
}

/// Plain-text report: banner, supported range, one line per diverging year, then totals.
/// With `all`, agreeing and out-of-range years get a line too.
fn write_report<W: Write>(
    out: &mut W,
    range: &DateRange,
    results: &YearResults,
    all: bool,
    summary: &Summary,
) -> io::Result<()> {
    writeln!(out, "We're live.")?;
    writeln!(
        out,
        "Start Year: {}, End Year: {}",
        range.start_year(),
        range.end_year()
    )?;
    writeln!(out, "Years which differ:")?;
    writeln!(out, "YYYY - Astronomy vs. The Church (DD/MM)")?;
    for result in results.values() {
        match result {
            Ok(result) => match result.report_line() {
                Some(line) => writeln!(out, "{line}")?,
                None if all => writeln!(
                    out,
                    "{} - {} vs. {} - Easter agrees.",
                    result.year,
                    result.astronomical.day_month(),
                    result.ecclesiastical.day_month()
                )?,
                None => {}
            },
            Err(err) if all => writeln!(out, "{} - {err}", err.year)?,
            Err(_) => {}
        }
    }
    writeln!(out, "{summary}")
}

fn out_of_range_years(results: &YearResults) -> Vec<i32> {
    results
        .iter()
        .filter(|(_, result)| result.is_err())
        .map(|(&year, _)| year)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use computus::{Date, Instant, YearClassification, YearOutOfRange};

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    fn sample() -> (DateRange, YearResults) {
        let range = DateRange::from_coverage(
            Instant::from_date(date(2018, 6, 1)),
            Instant::from_date(date(2026, 2, 1)),
        )
        .unwrap();
        let mut results = YearResults::new();
        results.insert(2019, Ok(EasterResult::new(2019, date(2019, 4, 21), date(2019, 4, 21))));
        results.insert(2025, Ok(EasterResult::new(2025, date(2025, 4, 13), date(2025, 4, 20))));
        results.insert(
            2026,
            Err(YearOutOfRange {
                year: 2026,
                classification: YearClassification::AfterRange,
                start_year: 2019,
                end_year: 2025,
            }),
        );
        (range, results)
    }

    fn render(all: bool) -> Vec<String> {
        let (range, results) = sample();
        let summary = Summary::from_results(&results);
        let mut out = Vec::new();
        write_report(&mut out, &range, &results, all, &summary).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_owned).collect()
    }

    #[test]
    fn test_report_starts_with_banner() {
        assert_eq!(
            render(false),
            [
                "We're live.",
                "Start Year: 2019, End Year: 2025",
                "Years which differ:",
                "YYYY - Astronomy vs. The Church (DD/MM)",
                "2025 - 13/04 vs. 20/04 - Easter is a week late.",
                "3 years: 1 agree, 0 early, 1 late, 1 out of range",
            ]
        );
    }

    #[test]
    fn test_report_all_years() {
        let lines = render(true);
        assert_eq!(lines[0], "We're live.");
        assert_eq!(
            &lines[4..7],
            [
                "2019 - 21/04 vs. 21/04 - Easter agrees.",
                "2025 - 13/04 vs. 20/04 - Easter is a week late.",
                "2026 - year 2026 falls after the supported range 2019-2025",
            ]
        );
        assert_eq!(lines.len(), 8);
    }
}
