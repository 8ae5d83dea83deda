//! CSV fixture reading and typed record parsing
//!
//! Fixtures are small comma-separated files with a header row. Each record
//! type knows its default file name and how to build itself from a row;
//! `load_csv` parses a whole file before anything is written to the store, so
//! a malformed file never produces a partial insert.

use chrono::NaiveTime;
use std::path::Path;
use tracing::debug;

use crate::errors::{SeedError, SeedResult};

/// Literal used in timezone fixtures for "no daylight saving"
pub const DST_NULL_SENTINEL: &str = "NULL";

pub const COUNTRIES_FILE: &str = "countries.csv";
pub const TIMEZONES_FILE: &str = "timezones.csv";
pub const GENRE_COLORS_FILE: &str = "color.csv";
pub const GENRES_FILE: &str = "genre.csv";
pub const CATEGORIES_FILE: &str = "categories.csv";
pub const RATING_VALUES_FILE: &str = "ratings.csv";
pub const RATING_SYSTEMS_FILE: &str = "ratingsystems.csv";
pub const EVENT_TEMPLATE_FILE: &str = "events_template.csv";

/// One data row of a fixture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRow {
    pub file: String,
    /// 1-based line number in the source file
    pub line: usize,
    pub fields: Vec<String>,
}

impl FixtureRow {
    fn malformed(&self, column: usize, value: &str, reason: impl Into<String>) -> SeedError {
        SeedError::MalformedField {
            file: self.file.clone(),
            line: self.line,
            column,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Raw field content, untrimmed
    pub fn raw(&self, column: usize) -> SeedResult<&str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| SeedError::MissingColumn {
                file: self.file.clone(),
                line: self.line,
                column,
            })
    }

    pub fn text(&self, column: usize) -> SeedResult<String> {
        Ok(self.raw(column)?.trim().to_string())
    }

    /// Strict integer field
    pub fn int(&self, column: usize) -> SeedResult<i32> {
        let value = self.raw(column)?.trim();
        value
            .parse::<i32>()
            .map_err(|e| self.malformed(column, value, e.to_string()))
    }

    pub fn boolean(&self, column: usize) -> SeedResult<bool> {
        let value = self.raw(column)?.trim();
        parse_bool(value).ok_or_else(|| self.malformed(column, value, "invalid boolean"))
    }

    /// Lenient integer: unparsable or negative values read as 0
    pub fn lenient_int(&self, column: usize) -> SeedResult<i32> {
        let value = self.raw(column)?.trim();
        Ok(value.parse::<i32>().ok().filter(|v| *v >= 0).unwrap_or(0))
    }

    pub fn dst(&self, column: usize) -> SeedResult<DstTransition> {
        let value = self.raw(column)?;
        parse_dst_field(value).map_err(|reason| self.malformed(column, value.trim(), reason))
    }
}

/// Parse the boolean spellings accepted in fixtures
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Day/month/time at which daylight saving starts or ends
///
/// The zero value (day 0, month 0, 00:00) means "not observed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstTransition {
    pub day: i32,
    pub month: i32,
    pub time: NaiveTime,
}

impl Default for DstTransition {
    fn default() -> Self {
        Self {
            day: 0,
            month: 0,
            time: NaiveTime::MIN,
        }
    }
}

/// Parse a `"D/M HH:MM"` DST field, or the `NULL` sentinel
///
/// Day and month are taken as written; no calendar range check is applied.
pub fn parse_dst_field(raw: &str) -> Result<DstTransition, String> {
    let raw = raw.trim();
    if raw == DST_NULL_SENTINEL {
        return Ok(DstTransition::default());
    }

    let (date, time) = raw
        .split_once(' ')
        .ok_or_else(|| "expected 'D/M HH:MM'".to_string())?;
    let (day, month) = date
        .split_once('/')
        .ok_or_else(|| "expected day/month".to_string())?;

    let day = day
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid day: {}", e))?;
    let month = month
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid month: {}", e))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|e| format!("invalid time of day: {}", e))?;

    Ok(DstTransition { day, month, time })
}

/// Split one CSV record into fields
///
/// Fields may be wrapped in double quotes, inside which commas and line
/// breaks are literal and `""` is an escaped quote.
pub fn split_record(record: &str) -> Vec<String> {
    scan_record(record).0
}

/// Fields of `record`, and whether it ended inside an open quote
fn scan_record(record: &str) -> (Vec<String>, bool) {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    (fields, in_quotes)
}

/// Parse fixture text, discarding the header row and blank lines
///
/// A quoted field may span several lines; the row keeps the line number it
/// starts on.
pub fn parse_rows(file: &str, contents: &str) -> SeedResult<Vec<FixtureRow>> {
    let mut records: Vec<(usize, String, Vec<String>)> = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        let (start, text) = match pending.take() {
            Some((start, mut text)) => {
                text.push('\n');
                text.push_str(line);
                (start, text)
            }
            None => (index + 1, line.to_string()),
        };

        let (fields, open) = scan_record(&text);
        if open {
            pending = Some((start, text));
        } else {
            records.push((start, text, fields));
        }
    }

    // An unterminated quote runs to the end of the file
    if let Some((start, text)) = pending {
        let fields = split_record(&text);
        records.push((start, text, fields));
    }

    let mut records = records.into_iter();
    if records.next().is_none() {
        return Err(SeedError::EmptyFixture {
            file: file.to_string(),
        });
    }

    Ok(records
        .filter(|(_, text, _)| !text.trim().is_empty())
        .map(|(line, _, fields)| FixtureRow {
            file: file.to_string(),
            line,
            fields,
        })
        .collect())
}

/// Read a fixture file from `dir`
pub fn read_rows(dir: &Path, filename: &str) -> SeedResult<Vec<FixtureRow>> {
    let path = dir.join(filename);
    let contents = std::fs::read_to_string(&path).map_err(|source| SeedError::Fixture {
        path: path.display().to_string(),
        source,
    })?;
    parse_rows(filename, &contents)
}

/// A typed record that can be built from a fixture row
pub trait FixtureRecord: Sized {
    /// Default file name under the fixtures directory
    const FILE: &'static str;

    fn from_row(row: &FixtureRow) -> SeedResult<Self>;
}

/// Read and parse every row of `filename` into `T`
///
/// The first malformed row aborts the load.
pub fn load_csv<T: FixtureRecord>(dir: &Path, filename: &str) -> SeedResult<Vec<T>> {
    let rows = read_rows(dir, filename)?;
    let records = rows.iter().map(T::from_row).collect::<SeedResult<Vec<T>>>()?;
    debug!("Parsed {} records from {}", records.len(), filename);
    Ok(records)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub code: String,
    pub name: String,
    pub region: String,
}

impl FixtureRecord for CountryRecord {
    const FILE: &'static str = COUNTRIES_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            code: row.text(0)?,
            name: row.text(1)?,
            region: row.text(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneRecord {
    pub country_code: String,
    pub timezone_name: String,
    pub standard_offset: i32,
    pub dst_offset: i32,
    pub dst_start: DstTransition,
    pub dst_end: DstTransition,
    pub is_default: bool,
}

impl FixtureRecord for TimezoneRecord {
    const FILE: &'static str = TIMEZONES_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            country_code: row.text(0)?,
            timezone_name: row.text(1)?,
            standard_offset: row.int(2)?,
            dst_offset: row.int(3)?,
            dst_start: row.dst(4)?,
            dst_end: row.dst(5)?,
            is_default: row.boolean(6)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreColorRecord {
    pub nibble_level_1: i32,
    pub color_hex: String,
}

impl FixtureRecord for GenreColorRecord {
    const FILE: &'static str = GENRE_COLORS_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            nibble_level_1: row.int(0)?,
            color_hex: row.text(1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreRecord {
    pub nibble_level_1: i32,
    pub nibble_level_2: i32,
    pub description: String,
}

impl FixtureRecord for GenreRecord {
    const FILE: &'static str = GENRES_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            nibble_level_1: row.int(0)?,
            nibble_level_2: row.int(1)?,
            description: row.text(2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRecord {
    pub id: i32,
    pub description: String,
}

impl FixtureRecord for CategoryRecord {
    const FILE: &'static str = CATEGORIES_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            id: row.int(0)?,
            description: row.text(1)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingValueRecord {
    pub id: i32,
    pub rating_system_id: i32,
    pub value: String,
    pub min_age: i32,
    pub description: String,
}

impl FixtureRecord for RatingValueRecord {
    const FILE: &'static str = RATING_VALUES_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            id: row.int(0)?,
            rating_system_id: row.int(1)?,
            value: row.text(2)?,
            min_age: row.int(3)?,
            description: row.text(4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSystemRecord {
    pub id: i32,
    pub country_code: String,
    pub description: String,
}

impl FixtureRecord for RatingSystemRecord {
    const FILE: &'static str = RATING_SYSTEMS_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            id: row.int(0)?,
            country_code: row.text(1)?,
            description: row.text(2)?,
        })
    }
}

/// One slot of the daily event template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTemplateRecord {
    pub title: String,
    /// Offset from the start of the day
    pub start_minute: i32,
    pub category_id: i32,
    pub genre_id: i32,
    pub rating_value_id: i32,
}

impl FixtureRecord for EventTemplateRecord {
    const FILE: &'static str = EVENT_TEMPLATE_FILE;

    fn from_row(row: &FixtureRow) -> SeedResult<Self> {
        Ok(Self {
            title: row.text(0)?,
            start_minute: row.lenient_int(1)?,
            category_id: row.lenient_int(2)?,
            genre_id: row.lenient_int(3)?,
            rating_value_id: row.lenient_int(4)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(fields: &str) -> FixtureRow {
        FixtureRow {
            file: "test.csv".to_string(),
            line: 2,
            fields: split_record(fields),
        }
    }

    #[test]
    fn test_timezone_row_round_trip() {
        let record =
            TimezoneRecord::from_row(&row("US, Eastern, -300, -240, 2/3 02:00, 1/11 02:00, true"))
                .unwrap();

        let two_am = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        assert_eq!(record.country_code, "US");
        assert_eq!(record.timezone_name, "Eastern");
        assert_eq!(record.standard_offset, -300);
        assert_eq!(record.dst_offset, -240);
        assert_eq!(
            record.dst_start,
            DstTransition { day: 2, month: 3, time: two_am }
        );
        assert_eq!(
            record.dst_end,
            DstTransition { day: 1, month: 11, time: two_am }
        );
        assert!(record.is_default);
    }

    #[test]
    fn test_null_dst_sentinel_is_zero() {
        let record =
            TimezoneRecord::from_row(&row("JP, Asia/Tokyo, 540, 540, NULL, NULL, true")).unwrap();

        assert_eq!(record.dst_start, DstTransition::default());
        assert_eq!(record.dst_end.day, 0);
        assert_eq!(record.dst_end.month, 0);
        assert_eq!(record.dst_end.time, NaiveTime::MIN);
    }

    #[rstest]
    #[case("null")]
    #[case("Null")]
    #[case("2-3 02:00")]
    #[case("2/3")]
    #[case("2/3 2am")]
    fn test_malformed_dst_field_is_rejected(#[case] raw: &str) {
        assert!(parse_dst_field(raw).is_err());
    }

    #[test]
    fn test_dst_day_is_not_calendar_checked() {
        let transition = parse_dst_field("31/2 01:00").unwrap();
        assert_eq!(transition.day, 31);
        assert_eq!(transition.month, 2);
    }

    #[test]
    fn test_malformed_offset_names_the_failure() {
        let err = TimezoneRecord::from_row(&row("US, Eastern, abc, -240, NULL, NULL, true"))
            .err()
            .unwrap();

        match err {
            SeedError::MalformedField {
                file, line, column, value, ..
            } => {
                assert_eq!(file, "test.csv");
                assert_eq!(line, 2);
                assert_eq!(column, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_missing_column() {
        let err = CountryRecord::from_row(&row("GB, United Kingdom")).err().unwrap();
        assert!(matches!(err, SeedError::MissingColumn { column: 2, .. }));
    }

    #[rstest]
    #[case("a,b,c", vec!["a", "b", "c"])]
    #[case("a,,c", vec!["a", "", "c"])]
    #[case(r#""Smith, John",42"#, vec!["Smith, John", "42"])]
    #[case(r#"say ""hi"",x"#, vec![r#"say ""hi"""#, "x"])]
    #[case(r#""say ""hi""",x"#, vec![r#"say "hi""#, "x"])]
    fn test_split_record(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_record(line), expected);
    }

    #[test]
    fn test_parse_rows_skips_header_and_blank_lines() {
        let rows = parse_rows("countries.csv", "code,name,region\r\nGB,UK,Europe\r\n\r\nUS,USA,Americas\n")
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].fields, vec!["US", "USA", "Americas"]);
    }

    #[test]
    fn test_quoted_field_spans_lines() {
        let rows = parse_rows(
            "events_template.csv",
            "title,start_minute,category_id,genre_id,rating_value_id\n\"Late\nFilm\",1380,5,2,4\nArts Review,1425,4,8,1\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].fields, vec!["Late\nFilm", "1380", "5", "2", "4"]);
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].fields[0], "Arts Review");
    }

    #[test]
    fn test_empty_fixture_is_an_error() {
        assert!(matches!(
            parse_rows("genre.csv", ""),
            Err(SeedError::EmptyFixture { .. })
        ));
    }

    #[rstest]
    #[case("News, 30, 2, 3, 4", 30, 2, 3, 4)]
    #[case("News, -15, 2, 3, 4", 0, 2, 3, 4)]
    #[case("News, soon, x, 3, -1", 0, 0, 3, 0)]
    fn test_template_numbers_are_lenient(
        #[case] line: &str,
        #[case] start_minute: i32,
        #[case] category_id: i32,
        #[case] genre_id: i32,
        #[case] rating_value_id: i32,
    ) {
        let record = EventTemplateRecord::from_row(&row(line)).unwrap();
        assert_eq!(record.title, "News");
        assert_eq!(record.start_minute, start_minute);
        assert_eq!(record.category_id, category_id);
        assert_eq!(record.genre_id, genre_id);
        assert_eq!(record.rating_value_id, rating_value_id);
    }

    #[test]
    fn test_load_csv_reads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("color.csv"),
            "nibble_level_1,color_hex\n1,#FF0000\n2,\n",
        )
        .unwrap();

        let colors: Vec<GenreColorRecord> = load_csv(dir.path(), GenreColorRecord::FILE).unwrap();

        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].color_hex, "#FF0000");
        assert_eq!(colors[1].color_hex, "");
    }

    #[test]
    fn test_missing_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_csv::<CountryRecord>(dir.path(), COUNTRIES_FILE).err().unwrap();
        assert!(matches!(err, SeedError::Fixture { .. }));
    }
}
