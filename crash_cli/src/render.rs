use std::io::Write;

use crash_core::{RoundRecord, RoundSummary};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
pub struct RoundReport<'a> {
    pub client_seed: &'a str,
    pub round: &'a RoundRecord,
    pub previous_rounds: &'a [RoundRecord],
    pub summary: Option<&'a RoundSummary>,
}

const HEADER: [&str; 3] = ["crash_point", "seed", "hash"];

fn write_table<W: Write>(out: &mut W, rounds: &[RoundRecord]) -> anyhow::Result<()> {
    writeln!(out, "{:>12}  {:<64}  {}", "Crash point", "Seed", "Hash (hmac with client seed)")?;
    for r in rounds {
        writeln!(out, "{:>11}x  {:<64}  {}", r.multiplier.to_string(), r.seed, r.hash)?;
    }
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    report: &RoundReport<'_>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "Client seed: {}", report.client_seed)?;
            writeln!(out)?;
            writeln!(out, "Inputted round")?;
            write_table(out, std::slice::from_ref(report.round))?;
            if !report.previous_rounds.is_empty() {
                writeln!(out)?;
                writeln!(out, "Previous {} rounds", report.previous_rounds.len())?;
                write_table(out, report.previous_rounds)?;
            }
            if let Some(s) = report.summary {
                writeln!(out)?;
                writeln!(
                    out,
                    "rounds={} instant_crashes={} min={} median={} max={}",
                    s.count,
                    s.instant_crashes,
                    fmt_opt(s.min),
                    fmt_opt(s.median),
                    fmt_opt(s.max)
                )?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            // inputted round first, then history in chain order
            let mut wtr = csv::Writer::from_writer(&mut *out);
            wtr.write_record(HEADER)?;
            for r in std::iter::once(report.round).chain(report.previous_rounds) {
                wtr.write_record([r.multiplier.to_string(), r.seed.clone(), r.hash.clone()])?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

fn fmt_opt(m: Option<crash_core::CrashMultiplier>) -> String {
    m.map(|m| format!("{m}x")).unwrap_or_else(|| "-".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crash_core::{format_round, previous_rounds, summarize, DEFAULT_CLIENT_SEED};

    fn render(format: OutputFormat, with_history: bool) -> String {
        let round = format_round(DEFAULT_CLIENT_SEED).unwrap();
        let history = if with_history {
            previous_rounds(DEFAULT_CLIENT_SEED).unwrap()
        } else {
            Vec::new()
        };
        let summary = summarize(&history).unwrap();
        let report = RoundReport {
            client_seed: DEFAULT_CLIENT_SEED,
            round: &round,
            previous_rounds: &history,
            summary: with_history.then_some(&summary),
        };
        let mut buf = Vec::new();
        write_report(&mut buf, format, &report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_report() {
        let text = render(OutputFormat::Text, true);
        assert!(text.contains("Inputted round"));
        assert!(text.contains("Previous 100 rounds"));
        assert!(text.contains("1.06x"));
        assert!(text.contains("0fa5125a577b5765e8733c26d6ec3ed13b264bf2dd395b3cdcfd8193a1f391bb"));
        assert!(text.contains("rounds=100"));
    }

    #[test]
    fn test_text_report_without_history() {
        let text = render(OutputFormat::Text, false);
        assert!(text.contains("Inputted round"));
        assert!(!text.contains("Previous"));
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json, true)).unwrap();
        assert_eq!(json["round"]["multiplier"], serde_json::json!(1.06));
        assert_eq!(json["previous_rounds"].as_array().unwrap().len(), 100);
        assert_eq!(json["summary"]["count"], 100);
    }

    #[test]
    fn test_csv_report() {
        let csv = render(OutputFormat::Csv, true);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 102);
        assert_eq!(lines[0], "crash_point,seed,hash");
        assert!(lines[1].starts_with("1.06,0x3b2d4aa9"));
    }
}
