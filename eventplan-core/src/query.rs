//! Query construction for the sessions list endpoint.
//!
//! Blank inputs never become parameters: the backend reads an absent key as
//! "no filter", while an empty value would be a filter on the empty string.

use chrono::{Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use crate::error::{EventPlanError, EventPlanResult};

pub const DEFAULT_SORT: &str = "startDateTime";

/// Instant at the start (`00:00:00`) or end (`23:59:59`) of `date` in zone
/// `tz`, as an ISO-8601 UTC timestamp with millisecond precision.
///
/// A boundary that falls into a DST gap moves forward to the first valid
/// wall-clock time; an ambiguous one resolves to the earlier instant.
pub fn day_boundary_timestamp<Tz: TimeZone>(
    date: Option<NaiveDate>,
    end_of_day: bool,
    tz: &Tz,
) -> Option<String> {
    let date = date?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::MIN
    };
    let naive = date.and_time(time);

    let instant = tz
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())?;

    Some(
        instant
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Filters accepted by the list endpoint. `None` means "do not filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub speaker: Option<String>,
    pub priority: Option<i32>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.speaker.is_none()
            && self.priority.is_none()
            && self.start_date_time.is_none()
            && self.end_date_time.is_none()
    }

    pub fn params(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("speaker", self.speaker.clone()),
            ("priority", self.priority.map(|p| p.to_string())),
            ("startDateTime", self.start_date_time.clone()),
            ("endDateTime", self.end_date_time.clone()),
        ]
    }
}

/// Build the filter set from user-entered fields, keeping only the
/// non-blank ones.
///
/// `priority` is free text; anything that does not parse as an integer is
/// treated as blank.
pub fn build_filter_set<Tz: TimeZone>(
    speaker: &str,
    priority: &str,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    tz: &Tz,
) -> FilterSet {
    let speaker = speaker.trim();
    let priority = priority.trim();

    FilterSet {
        speaker: (!speaker.is_empty()).then(|| speaker.to_string()),
        priority: if priority.is_empty() {
            None
        } else {
            match priority.parse::<i32>() {
                Ok(p) => Some(p),
                Err(_) => {
                    tracing::warn!(priority, "ignoring non-numeric priority filter");
                    None
                }
            }
        },
        start_date_time: day_boundary_timestamp(start_date, false, tz),
        end_date_time: day_boundary_timestamp(end_date, true, tz),
    }
}

/// Parse a `YYYY-MM-DD` field. Blank input is `Ok(None)`.
pub fn parse_date_input(input: &str) -> EventPlanResult<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| {
            EventPlanError::InvalidInput(format!(
                "Invalid date format '{}'. Expected YYYY-MM-DD",
                input
            ))
        })
}

/// Serialize parameters into a query string, skipping absent and empty
/// values. Returns `""` (no `?`) when nothing is left.
pub fn encode_query_string<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<String>)>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    for (key, value) in params {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            serializer.append_pair(key, &value);
            any = true;
        }
    }

    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

/// A full list request: paging, sort key and filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuery {
    pub page: u32,
    pub size: u32,
    pub sort_by: String,
    pub filters: FilterSet,
}

impl SessionQuery {
    pub fn new(page: u32, size: u32, filters: FilterSet) -> Self {
        SessionQuery {
            page,
            size,
            sort_by: DEFAULT_SORT.to_string(),
            filters,
        }
    }

    pub fn params(&self) -> Vec<(&'static str, Option<String>)> {
        let mut params = vec![
            ("page", Some(self.page.to_string())),
            ("size", Some(self.size.to_string())),
            ("sortBy", Some(self.sort_by.clone())),
        ];
        params.extend(self.filters.params());
        params
    }

    pub fn to_query_string(&self) -> String {
        encode_query_string(self.params())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_and_end_of_day_in_utc() {
        assert_eq!(
            day_boundary_timestamp(Some(date(2025, 10, 15)), false, &UTC).as_deref(),
            Some("2025-10-15T00:00:00.000Z")
        );
        assert_eq!(
            day_boundary_timestamp(Some(date(2025, 10, 15)), true, &UTC).as_deref(),
            Some("2025-10-15T23:59:59.000Z")
        );
    }

    #[test]
    fn boundaries_follow_the_zone() {
        // EDT is UTC-4 in October.
        assert_eq!(
            day_boundary_timestamp(Some(date(2025, 10, 15)), false, &New_York).as_deref(),
            Some("2025-10-15T04:00:00.000Z")
        );
    }

    #[test]
    fn absent_date_is_absent() {
        assert_eq!(day_boundary_timestamp(None, true, &UTC), None);
    }

    #[test]
    fn speaker_only_filter() {
        let filters = build_filter_set("Jane", "", None, None, &UTC);
        assert_eq!(
            filters,
            FilterSet {
                speaker: Some("Jane".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn blank_and_padded_inputs() {
        let filters = build_filter_set("   ", " 2 ", None, Some(date(2025, 1, 31)), &UTC);
        assert_eq!(filters.speaker, None);
        assert_eq!(filters.priority, Some(2));
        assert_eq!(filters.start_date_time, None);
        assert_eq!(filters.end_date_time.as_deref(), Some("2025-01-31T23:59:59.000Z"));
    }

    #[test]
    fn non_numeric_priority_is_dropped() {
        assert!(build_filter_set("", "high", None, None, &UTC).is_empty());
    }

    #[test]
    fn encode_skips_empty_values() {
        let qs = encode_query_string(vec![
            ("speaker", Some("Jane Doe".to_string())),
            ("priority", None),
            ("sortBy", Some(String::new())),
            ("page", Some("0".to_string())),
        ]);
        assert_eq!(qs, "?speaker=Jane+Doe&page=0");
    }

    #[test]
    fn encode_all_empty_is_empty_string() {
        let qs = encode_query_string(vec![("a", None), ("b", Some(String::new()))]);
        assert_eq!(qs, "");
    }

    #[test]
    fn session_query_merges_paging_and_filters() {
        let query = SessionQuery::new(
            2,
            10,
            FilterSet {
                priority: Some(1),
                ..Default::default()
            },
        );
        assert_eq!(
            query.to_query_string(),
            "?page=2&size=10&sortBy=startDateTime&priority=1"
        );
    }

    #[test]
    fn date_input_parsing() {
        assert_eq!(parse_date_input("").unwrap(), None);
        assert_eq!(parse_date_input("2025-10-01").unwrap(), Some(date(2025, 10, 1)));

        let err = parse_date_input("10/01/2025").unwrap_err();
        assert!(matches!(err, EventPlanError::InvalidInput(_)));
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}
