use crate::error::ReorderError;
use crate::types::Orientation;
use anyhow::Result;

// Tabular (-outfmt 6) columns, zero-based.
const QUERY_ID: usize = 0;
const SUBJECT_ID: usize = 1;
const SUBJECT_START: usize = 8;
const SUBJECT_END: usize = 9;

/// One line of blastn tabular output. Only the subject id and the subject
/// coordinates drive the pipeline; the query id is kept for log messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentHit {
    pub query_id: String,
    pub subject_id: String,
    /// 1-based, inclusive.
    pub subject_start: usize,
    /// 1-based, inclusive.
    pub subject_end: usize,
}

impl AlignmentHit {
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() <= SUBJECT_END {
            return Err(format!(
                "expected at least {} fields, found {}",
                SUBJECT_END + 1,
                fields.len()
            ));
        }

        let coordinate = |idx: usize, name: &str| {
            fields[idx]
                .parse::<usize>()
                .map_err(|_| format!("{} '{}' is not a position", name, fields[idx]))
        };

        Ok(AlignmentHit {
            query_id: fields[QUERY_ID].to_string(),
            subject_id: fields[SUBJECT_ID].to_string(),
            subject_start: coordinate(SUBJECT_START, "subject start")?,
            subject_end: coordinate(SUBJECT_END, "subject end")?,
        })
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_coordinates(self.subject_start, self.subject_end)
    }
}

/// Parses every hit in `text`. Blank lines and `#` comment lines are skipped.
/// `first_line` is the 1-based line number of the first line of `text`
/// within the results file, used for error messages.
pub fn parse_hits(text: &str, first_line: usize) -> Result<Vec<AlignmentHit>> {
    let mut hits = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let hit = AlignmentHit::parse_line(trimmed).map_err(|reason| ReorderError::MalformedHit {
            line: first_line + idx,
            reason,
        })?;
        hits.push(hit);
    }
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVERSE_HIT: &str =
        "NC_012920.1\tgenome_a\t99.85\t16569\t20\t3\t1\t16569\t2741\t2740\t0.0\t30421";
    const FORWARD_HIT: &str =
        "NC_012920.1\tgenome_b\t99.10\t16560\t140\t6\t1\t16560\t9021\t9022\t0.0\t29877";

    #[test]
    fn reads_subject_fields() {
        let hit = AlignmentHit::parse_line(REVERSE_HIT).unwrap();
        assert_eq!(hit.query_id, "NC_012920.1");
        assert_eq!(hit.subject_id, "genome_a");
        assert_eq!(hit.subject_start, 2741);
        assert_eq!(hit.subject_end, 2740);
        assert_eq!(hit.orientation(), Orientation::Reverse);

        let hit = AlignmentHit::parse_line(FORWARD_HIT).unwrap();
        assert_eq!(hit.orientation(), Orientation::Forward);
    }

    #[test]
    fn space_separated_lines_are_accepted() {
        let hit = AlignmentHit::parse_line("ref g 100 10 0 0 1 10 4 13 1e-5 20.1").unwrap();
        assert_eq!((hit.subject_start, hit.subject_end), (4, 13));
    }

    #[test]
    fn short_line_is_rejected() {
        let err = AlignmentHit::parse_line("ref\tg\t100\t10").unwrap_err();
        assert!(err.contains("found 4"), "{}", err);
    }

    #[test]
    fn non_numeric_coordinate_is_rejected() {
        let err = AlignmentHit::parse_line("ref g 100 10 0 0 1 10 x 13 0.0 20").unwrap_err();
        assert!(err.contains("subject start"), "{}", err);
    }

    #[test]
    fn parse_hits_skips_comments_and_reports_line_numbers() {
        let text = format!("# BLASTN 2.15.0+\n{}\n\n{}\nbroken line\n", REVERSE_HIT, FORWARD_HIT);
        let err = parse_hits(&text, 10).unwrap_err();
        match err.downcast_ref::<ReorderError>() {
            Some(ReorderError::MalformedHit { line, .. }) => assert_eq!(*line, 14),
            other => panic!("unexpected error: {:?}", other),
        }

        let hits = parse_hits(&format!("# comment\n{}\n{}\n", REVERSE_HIT, FORWARD_HIT), 1).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].subject_id, "genome_b");
    }
}
