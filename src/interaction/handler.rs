//! Handlers for the registered slash-commands.

use chrono::NaiveDate;

use crate::{prelude::*, runtime::Runtime};

use super::resolve;

/// Handles `/timeat <query>`: reply with the current time in the resolved timezone.
#[instrument(skip(runtime, timezones))]
pub async fn time_at(runtime: &Runtime, query: &str, chat_id: i64, username: &str, timezones: &[String]) -> Void {
    let Some(timezone) = resolve::resolve_exact(query, timezones) else {
        runtime.chat.send_message(chat_id, &format!("@{username}: unknown timezone {query}")).await?;

        return Ok(());
    };

    let result = match runtime.tz.time_at(timezone).await {
        Ok(result) => result,
        Err(err) => {
            warn!("Time lookup for `{}` failed: {}", timezone, err);

            runtime
                .chat
                .send_message(chat_id, &format!("@{username}: timezones service is currently unavailable, please try again later"))
                .await?;

            return Ok(());
        }
    };

    // Canonical name first, then the abbreviation.
    runtime.store.increment(&result.timezone).await?;
    runtime.store.increment(&result.abbreviation).await?;

    let formatted = format_datetime(&result.datetime)?;

    runtime.chat.send_message(chat_id, &format!("@{username}: {query} timeat is {formatted}")).await?;

    Ok(())
}

/// Handles `/timepopularity <query>`: reply with the lookup count under the resolved prefix.
#[instrument(skip(runtime, timezones))]
pub async fn time_popularity(runtime: &Runtime, query: &str, chat_id: i64, username: &str, timezones: &[String]) -> Void {
    let key = resolve::resolve_popularity_key(query, timezones);

    let sum = runtime.store.sum_by_prefix(&key).await?;

    runtime.chat.send_message(chat_id, &format!("@{username}: {query} have been called {sum} times")).await?;

    Ok(())
}

/// Format a service-supplied ISO-8601 datetime as `19 May 2021 14:25`.
///
/// The string is taken apart on `T`, `-`, and `:` as a local calendar
/// datetime; the UTC-offset suffix is deliberately ignored since the service
/// already reports wall-clock time for the requested timezone.
fn format_datetime(datetime: &str) -> Res<String> {
    let malformed = || anyhow!("Malformed datetime `{}` from the timezone service.", datetime);

    let (date, time) = datetime.split_once('T').ok_or_else(malformed)?;

    let mut date_parts = date.split('-');
    let year: i32 = date_parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let month: u32 = date_parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let day: u32 = date_parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;

    let mut time_parts = time.split(':');
    let hour: u32 = time_parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let minute: u32 = time_parts.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;

    let formatted = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .ok_or_else(malformed)?
        .format("%-d %b %Y %H:%M")
        .to_string();

    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_datetime_ignoring_offset_suffix() {
        let formatted = format_datetime("2021-05-19T14:25:14.654676+00:00").unwrap();

        assert_eq!(formatted, "19 May 2021 14:25");
    }

    #[test]
    fn formats_single_digit_day_without_padding() {
        let formatted = format_datetime("2022-01-03T09:05:00.000000-04:00").unwrap();

        assert_eq!(formatted, "3 Jan 2022 09:05");
    }

    #[test]
    fn rejects_datetime_without_time_part() {
        assert!(format_datetime("2021-05-19").is_err());
    }

    #[test]
    fn rejects_non_numeric_datetime_fields() {
        assert!(format_datetime("2021-xx-19T14:25:14+00:00").is_err());
    }
}
