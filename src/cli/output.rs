use std::fmt::Write as FmtWrite;

use crate::services::IngestStats;

/// Render the end-of-run summary.
pub fn format_ingest_stats(stats: &IngestStats) -> Result<String, std::fmt::Error> {
    let mut output = String::new();
    writeln!(output, "Upload Summary")?;
    writeln!(output, "--------------")?;
    writeln!(output, "Rows in file:    {}", stats.rows_total)?;
    writeln!(output, "Start line:      {}", stats.start_line)?;
    writeln!(output, "Rows processed:  {}", stats.rows_attempted)?;
    writeln!(output, "Rows embedded:   {}", stats.rows_embedded)?;
    writeln!(output, "Rows skipped:    {}", stats.skipped.len())?;
    writeln!(output, "Points upserted: {}", stats.points_upserted)?;
    if stats.batches_failed > 0 {
        writeln!(
            output,
            "Failed batches:  {} ({} points dropped)",
            stats.batches_failed, stats.points_dropped
        )?;
    }
    writeln!(output, "Dimension:       {}", stats.dimension)?;
    writeln!(output, "Duration:        {}ms", stats.duration_ms)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SkippedRow;

    #[test]
    fn test_format_ingest_stats() {
        let stats = IngestStats {
            rows_total: 10,
            start_line: 2,
            rows_attempted: 8,
            rows_embedded: 7,
            skipped: vec![SkippedRow {
                index: 4,
                id: Some(44),
                reason: "timeout".to_string(),
            }],
            upsert_calls: 1,
            points_upserted: 7,
            dimension: 1536,
            duration_ms: 1200,
            ..Default::default()
        };
        let output = format_ingest_stats(&stats).unwrap();
        assert!(output.contains("Rows processed:  8"));
        assert!(output.contains("Rows skipped:    1"));
        assert!(output.contains("Points upserted: 7"));
        assert!(output.contains("Dimension:       1536"));
        assert!(!output.contains("Failed batches"));
    }

    #[test]
    fn test_format_failed_batches() {
        let stats = IngestStats {
            batches_failed: 2,
            points_dropped: 256,
            ..Default::default()
        };
        let output = format_ingest_stats(&stats).unwrap();
        assert!(output.contains("Failed batches:  2 (256 points dropped)"));
    }
}
