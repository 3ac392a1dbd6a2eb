use chrono::NaiveDate;

/// Date format accepted in filter values: `DD/MM/YYYY`.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Separator between alternative field paths of one term (`title|subtitle`).
pub const FIELD_SEPARATOR: &str = "|";

/// Separator between segments of a related field path (`author__name`).
pub const PATH_SEPARATOR: &str = "__";

pub fn str_as_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parses `"DD/MM/YYYY, DD/MM/YYYY"`. Bounds are returned in the given order.
pub fn str_as_date_range(value: &str) -> Option<(NaiveDate, NaiveDate)> {
    let mut parts = value.split(',');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };

    Some((str_as_date(start)?, str_as_date(end)?))
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fields whose path mentions `date` carry `DD/MM/YYYY` values.
///
/// This is a plain substring match anywhere in the path, so `candidate__name`
/// and `update_count` count as date fields too.
pub fn is_date_field(field: &str) -> bool {
    field.to_lowercase().contains("date")
}

pub fn split_fields(path: &str) -> Vec<String> {
    path.split(FIELD_SEPARATOR)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}
