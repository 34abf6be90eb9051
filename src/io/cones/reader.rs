//! Reader for `.cones` files describing hydrogen-bond acceptor and donor cones.
//!
//! A cone file starts with free-form header lines terminated by a line beginning with
//! `CONES:`. Every following non-blank line holds at least six numeric tokens (apex `x y z`,
//! orientation `x y z`) followed by tool-specific text carrying the atom label. Acceptor and
//! donor exports embed the label differently, so each kind has its own key sub-grammar.

use crate::io::error::Error;
use crate::model::cone::{Cone, ConeKey};
use crate::model::table::ConeTable;
use crate::model::types::{ConeKind, Orientation, Point};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const FORMAT: &str = "cone";

/// Header terminator; data rows start on the following line.
const SECTION_MARKER: &str = "CONES:";

/// Fixed-width trailer that follows the label in acceptor exports.
const ACCEPTOR_SUFFIX_LEN: usize = 14;

/// Marker preceding the label in donor exports.
const DONOR_MARKER: &str = "180.0";

/// Width of the field between [`DONOR_MARKER`] and the donor label.
const DONOR_LABEL_OFFSET: usize = 12;

/// Parses a cone stream into a fresh table.
///
/// # Arguments
///
/// * `reader` - Buffered source positioned at the start of the file.
/// * `kind` - Selects the key sub-grammar and the key prefix.
///
/// # Returns
///
/// The parsed [`ConeTable`]. Duplicate labels keep the last cone read.
///
/// # Errors
///
/// Returns [`Error::Parse`] for the first malformed data row and [`Error::Io`] for read
/// failures. No partial table is returned.
pub fn read<R: BufRead>(reader: R, kind: ConeKind) -> Result<ConeTable, Error> {
    let mut table = ConeTable::new();
    let mut saw_marker = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_num = idx + 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;
        let trimmed = line.trim();

        if !saw_marker {
            saw_marker = trimmed.starts_with(SECTION_MARKER);
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let (key, cone) = parse_cone_record(trimmed, line_num, kind)?;
        if table.insert(key.clone(), cone).is_some() {
            log::warn!("duplicate {kind} cone '{key}' on line {line_num}; keeping the later one");
        }
    }

    if !saw_marker {
        log::warn!("no '{SECTION_MARKER}' marker found in {kind} cone input; table is empty");
    }

    log::debug!("parsed {} {kind} cones", table.len());
    Ok(table)
}

/// Parses a cone stream and merges the result into an existing table.
///
/// The whole stream is parsed before anything is inserted, so `table` is untouched when an
/// error is returned. Used to assemble one interface half from separate acceptor and donor
/// files.
///
/// # Returns
///
/// The number of cones read from the stream.
pub fn read_into<R: BufRead>(
    reader: R,
    kind: ConeKind,
    table: &mut ConeTable,
) -> Result<usize, Error> {
    let parsed = read(reader, kind)?;
    let count = parsed.len();
    let replaced = table.merge(parsed);
    if replaced > 0 {
        log::warn!("{replaced} {kind} cones replaced existing entries while merging");
    }
    Ok(count)
}

/// Opens and parses a cone file.
///
/// # Errors
///
/// [`Error::NotFound`] when `path` does not exist; otherwise the errors of [`read`] with the
/// path attached.
pub fn read_path(path: &Path, kind: ConeKind) -> Result<ConeTable, Error> {
    let file = File::open(path).map_err(|e| Error::from_io(e, Some(path.to_path_buf())))?;
    read(BufReader::new(file), kind).map_err(|e| e.with_path(path))
}

fn parse_cone_record(line: &str, line_num: usize, kind: ConeKind) -> Result<(ConeKey, Cone), Error> {
    let mut values = [0.0_f64; 6];
    let mut tokens = line.split_whitespace();

    for (slot, value) in values.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("expected 6 numeric tokens, found {slot}"),
            )
        })?;
        *value = token.parse::<f64>().map_err(|_| {
            Error::parse(
                FORMAT,
                None,
                line_num,
                format!("invalid numeric token '{token}' at position {}", slot + 1),
            )
        })?;
    }

    let label = match kind {
        ConeKind::Acceptor => acceptor_label(line),
        ConeKind::Donor => donor_label(line),
    }
    .ok_or_else(|| {
        Error::parse(
            FORMAT,
            None,
            line_num,
            format!("missing {kind} label delimiter"),
        )
    })?;

    let apex = Point::new(values[0], values[1], values[2]);
    let orientation = Orientation::new(values[3], values[4], values[5]);

    Ok((ConeKey::new(kind, label), Cone::new(apex, orientation)))
}

/// Extracts the atom label of an acceptor row.
///
/// The label is the text between the first `[` and the next `[` (or the end of the line) with
/// the fixed-width trailer of [`ACCEPTOR_SUFFIX_LEN`] characters removed. Rows whose segment is
/// shorter than the trailer yield an empty label. Returns `None` when the row has no `[`.
///
/// The trailer width matches the acceptor export this reader was written against; a different
/// exporter version may need a different width.
fn acceptor_label(line: &str) -> Option<&str> {
    let segment = line.split('[').nth(1)?;
    let keep = segment.chars().count().saturating_sub(ACCEPTOR_SUFFIX_LEN);
    let end = segment
        .char_indices()
        .nth(keep)
        .map_or(segment.len(), |(i, _)| i);
    Some(&segment[..end])
}

/// Extracts the atom label of a donor row.
///
/// The label starts [`DONOR_LABEL_OFFSET`] characters after the first occurrence of
/// [`DONOR_MARKER`] and runs to the next occurrence of the marker or the end of the line.
/// Returns `None` when the marker is absent.
fn donor_label(line: &str) -> Option<&str> {
    let segment = line.split(DONOR_MARKER).nth(1)?;
    Some(
        segment
            .char_indices()
            .nth(DONOR_LABEL_OFFSET)
            .map_or("", |(i, _)| &segment[i..]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    // Label "A ASP 25 OD1" followed by a 14-character trailer "] 3.200 60.000".
    const ACCEPTOR_ROW: &str = "1.250 -2.500 3.750 0.000 0.000 1.000 [A ASP 25 OD1] 3.200 60.000";
    // 12-character field "  2.50  1.00" between the marker and the label "B LYS 12 NZ".
    const DONOR_ROW: &str = "4.000 5.000 6.000 1.000 0.000 0.000 180.0  2.50  1.00B LYS 12 NZ";

    fn parse(text: &str, kind: ConeKind) -> Result<ConeTable, Error> {
        read(Cursor::new(text.as_bytes()), kind)
    }

    fn with_header(rows: &[&str]) -> String {
        let mut text = String::from("# cone export\nPARAMS: 3.5 60\nCONES: 2\n");
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn acceptor_row_parses_key_and_exact_coordinates() {
        let table = parse(&with_header(&[ACCEPTOR_ROW]), ConeKind::Acceptor).unwrap();

        assert_eq!(table.len(), 1);
        let (key, cone) = table.iter().next().unwrap();
        assert_eq!(key, "ACCEP A ASP 25 OD1");
        assert_eq!(cone.apex, Point::new(1.25, -2.5, 3.75));
        assert_eq!(cone.orientation, Orientation::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn donor_row_parses_key_and_exact_coordinates() {
        let table = parse(&with_header(&[DONOR_ROW]), ConeKind::Donor).unwrap();

        assert_eq!(table.len(), 1);
        let cone = table.get("DONOR B LYS 12 NZ").expect("donor key present");
        assert_eq!(cone.apex, Point::new(4.0, 5.0, 6.0));
        assert_eq!(cone.orientation, Orientation::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn header_lines_before_marker_are_ignored() {
        let text = format!("{ACCEPTOR_ROW}\nCONES:\n{ACCEPTOR_ROW}\n");
        let table = parse(&text, ConeKind::Acceptor).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn indented_marker_is_recognized() {
        let text = format!("header\n   CONES: 1\n{DONOR_ROW}\n");
        let table = parse(&text, ConeKind::Donor).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_marker_yields_empty_table() {
        let table = parse(&format!("{ACCEPTOR_ROW}\n"), ConeKind::Acceptor).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn blank_data_lines_are_skipped() {
        let table = parse(&with_header(&["", ACCEPTOR_ROW, "   "]), ConeKind::Acceptor).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn short_row_aborts_with_line_number() {
        let text = with_header(&[ACCEPTOR_ROW, "1.0 2.0 3.0 0.0 0.0"]);
        let err = parse(&text, ConeKind::Acceptor).unwrap_err();

        match err {
            Error::Parse {
                format,
                line_number,
                details,
                ..
            } => {
                assert_eq!(format, "cone");
                assert_eq!(line_number, 5);
                assert!(details.contains("found 5"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_token_aborts() {
        let text = with_header(&["1.0 2.0 abc 0.0 0.0 1.0 [A ASP 25 OD1] 3.200 60.000"]);
        let err = parse(&text, ConeKind::Acceptor).unwrap_err();
        assert!(err.to_string().contains("'abc'"), "{err}");
    }

    #[test]
    fn acceptor_row_without_bracket_is_malformed() {
        let text = with_header(&["1.0 2.0 3.0 0.0 0.0 1.0 A ASP 25 OD1"]);
        let err = parse(&text, ConeKind::Acceptor).unwrap_err();
        assert!(err.to_string().contains("missing acceptor label delimiter"));
    }

    #[test]
    fn donor_row_without_marker_is_malformed() {
        let err = parse(&with_header(&[ACCEPTOR_ROW]), ConeKind::Donor).unwrap_err();
        assert!(matches!(err, Error::Parse { line_number: 4, .. }));
    }

    #[test]
    fn duplicate_labels_keep_last_cone() {
        let second = ACCEPTOR_ROW.replacen("1.250", "9.000", 1);
        let table = parse(&with_header(&[ACCEPTOR_ROW, &second]), ConeKind::Acceptor).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ACCEP A ASP 25 OD1").unwrap().apex.x, 9.0);
    }

    #[test]
    fn acceptor_label_strips_fixed_trailer() {
        assert_eq!(acceptor_label(ACCEPTOR_ROW), Some("A ASP 25 OD1"));
        assert_eq!(acceptor_label("x [short]"), Some(""));
        assert_eq!(acceptor_label("x [first 12345678901234[second"), Some("first "));
        assert_eq!(acceptor_label("no delimiter"), None);
    }

    #[test]
    fn donor_label_skips_fixed_field() {
        assert_eq!(donor_label(DONOR_ROW), Some("B LYS 12 NZ"));
        assert_eq!(donor_label("180.0 short"), Some(""));
        assert_eq!(donor_label("no marker"), None);
    }

    #[test]
    fn read_into_merges_both_kinds() {
        let mut half = ConeTable::new();
        read_into(
            Cursor::new(with_header(&[ACCEPTOR_ROW]).into_bytes()),
            ConeKind::Acceptor,
            &mut half,
        )
        .unwrap();
        let added = read_into(
            Cursor::new(with_header(&[DONOR_ROW]).into_bytes()),
            ConeKind::Donor,
            &mut half,
        )
        .unwrap();

        assert_eq!(added, 1);
        let keys: Vec<&str> = half.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["ACCEP A ASP 25 OD1", "DONOR B LYS 12 NZ"]);
    }

    #[test]
    fn read_into_leaves_table_untouched_on_error() {
        let mut half = ConeTable::new();
        let text = with_header(&[ACCEPTOR_ROW, "broken"]);
        assert!(read_into(Cursor::new(text.into_bytes()), ConeKind::Acceptor, &mut half).is_err());
        assert!(half.is_empty());
    }

    #[test]
    fn read_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.cones");
        let err = read_path(&missing, ConeKind::Acceptor).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn read_path_attaches_path_to_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "CONES:\n1.0 2.0\n").unwrap();

        let err = read_path(file.path(), ConeKind::Donor).unwrap_err();
        match err {
            Error::Parse { path, line_number, .. } => {
                assert_eq!(path.as_deref(), Some(file.path()));
                assert_eq!(line_number, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn read_path_parses_file_on_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(with_header(&[DONOR_ROW]).as_bytes()).unwrap();

        let table = read_path(file.path(), ConeKind::Donor).unwrap();
        assert!(table.contains_key("DONOR B LYS 12 NZ"));
    }
}
