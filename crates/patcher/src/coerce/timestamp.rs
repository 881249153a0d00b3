//! Permissive, locale-independent timestamp parsing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

/// Offset-bearing forms not covered by RFC 3339 / RFC 2822.
const OFFSET_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S%.f%:z",
	"%Y-%m-%d %H:%M:%S%.f %:z",
	"%Y-%m-%dT%H:%M:%S%.f%z",
	"%Y-%m-%d %H:%M:%S%.f%z",
	"%Y-%m-%d %H:%M:%S%.f %z",
	// Hour-only offsets such as `+01`.
	"%Y-%m-%dT%H:%M:%S%.f%#z",
	"%Y-%m-%d %H:%M:%S%.f%#z",
];

/// Naive date-times, taken as UTC.
const DATETIME_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M",
	"%Y/%m/%d %H:%M:%S%.f",
	"%m/%d/%Y %H:%M:%S%.f",
	"%m/%d/%Y %I:%M:%S %p",
	"%m/%d/%Y %H:%M",
	"%d %B %Y %H:%M:%S",
	"%B %d, %Y %H:%M:%S",
];

/// Bare dates, taken as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %B %Y", "%B %d, %Y", "%d %b %Y", "%b %d, %Y"];

/// Parses timestamps from the built-in formats plus configured extras.
#[derive(Debug, Clone, Default)]
pub struct TimestampParser {
	extra: Vec<String>,
}

impl TimestampParser {
	/// A parser that also tries `extra` strftime formats, after the built-ins.
	pub fn new(extra: Vec<String>) -> Self {
		Self { extra }
	}

	/// Parses `input`, ignoring surrounding whitespace.
	pub fn parse(&self, input: &str) -> Result<DateTime<FixedOffset>, String> {
		let s = input.trim();
		if s.is_empty() {
			return Err("empty timestamp".to_string());
		}

		if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
			return Ok(ts);
		}
		if let Ok(ts) = DateTime::parse_from_rfc2822(s) {
			return Ok(ts);
		}
		if let Some(ts) = OFFSET_FORMATS
			.iter()
			.find_map(|f| DateTime::parse_from_str(s, f).ok())
		{
			return Ok(ts);
		}

		let extra = || self.extra.iter().map(String::as_str);
		if let Some(naive) = DATETIME_FORMATS
			.iter()
			.copied()
			.chain(extra())
			.find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
		{
			return Ok(naive.and_utc().fixed_offset());
		}
		if let Some(date) = DATE_FORMATS
			.iter()
			.copied()
			.chain(extra())
			.find_map(|f| NaiveDate::parse_from_str(s, f).ok())
		{
			return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
		}

		Err(format!("unrecognised date/time format: '{s}'"))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	fn utc(s: &str) -> String {
		TimestampParser::default().parse(s).unwrap().to_rfc3339()
	}

	#[rstest]
	#[case::rfc3339("2023-04-05T06:07:08Z", "2023-04-05T06:07:08+00:00")]
	#[case::rfc3339_offset("2023-04-05T06:07:08.250-03:00", "2023-04-05T06:07:08.250-03:00")]
	#[case::rfc2822("Wed, 05 Apr 2023 06:07:08 +0000", "2023-04-05T06:07:08+00:00")]
	#[case::space_offset("2023-04-05 06:07:08+01:00", "2023-04-05T06:07:08+01:00")]
	#[case::hour_offset("2023-04-05T06:07:08+01", "2023-04-05T06:07:08+01:00")]
	#[case::hour_offset_space("2023-04-05 06:07:08.5-05", "2023-04-05T06:07:08.500-05:00")]
	#[case::naive_t("2023-04-05T06:07:08", "2023-04-05T06:07:08+00:00")]
	#[case::naive_space("2023-04-05 06:07", "2023-04-05T06:07:00+00:00")]
	#[case::us_clock("04/05/2023 06:07:08 PM", "2023-04-05T18:07:08+00:00")]
	#[case::iso_date("2023-04-05", "2023-04-05T00:00:00+00:00")]
	#[case::long_date("5 April 2023", "2023-04-05T00:00:00+00:00")]
	#[case::padded("  2023-04-05  ", "2023-04-05T00:00:00+00:00")]
	fn parses_common_forms(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(utc(input), expected);
	}

	#[rstest]
	#[case("")]
	#[case("yesterday")]
	#[case("2023-13-01")]
	#[case("2023-02-30T00:00:00")]
	fn rejects_malformed(#[case] input: &str) {
		assert!(TimestampParser::default().parse(input).is_err());
	}

	#[test]
	fn extra_formats_are_tried_last() {
		let parser = TimestampParser::new(vec!["%d.%m.%Y".to_string()]);
		assert_eq!(
			parser.parse("05.04.2023").unwrap().to_rfc3339(),
			"2023-04-05T00:00:00+00:00"
		);
		assert!(TimestampParser::default().parse("05.04.2023").is_err());
	}
}
