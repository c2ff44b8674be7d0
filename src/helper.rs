// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use chrono::{Local, TimeZone};

pub const TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Shown in place of timestamps that are not epoch seconds.
pub const INVALID_DATE: &str = "Invalid date";

/// Format an epoch-seconds string as `MM/DD/YYYY HH:mm:ss` in local time.
pub fn format_time(timestamp: &str) -> String {
    let secs = match timestamp.trim().parse::<i64>() {
        Ok(secs) => secs,
        Err(_) => return INVALID_DATE.to_string(),
    };

    match Local.timestamp_opt(secs, 0).single() {
        Some(time) => time.format(TIME_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}
