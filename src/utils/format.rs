use chrono::{DateTime, NaiveDate};

use crate::models::Link;

pub fn summary_line(link: &Link) -> String {
    let star = if link.is_starred { "★ " } else { "" };
    let title = if link.title.trim().is_empty() {
        link.url.as_str()
    } else {
        link.title.as_str()
    };

    let mut line = format!("{}{}", star, title);
    if !link.host.is_empty() {
        line.push_str(&format!(" ({})", link.host));
    }
    if !link.tags.is_empty() {
        let tags: Vec<&str> = link
            .tags
            .iter()
            .map(|tag| {
                if tag.original_name.is_empty() {
                    tag.name.as_str()
                } else {
                    tag.original_name.as_str()
                }
            })
            .collect();
        line.push_str(&format!(" [{}]", tags.join(", ")));
    }
    line
}

/// `dateAdded` as a calendar date, if Anybox sent RFC 3339.
pub fn added_on(link: &Link) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(&link.date_added)
        .ok()
        .map(|dt| dt.date_naive())
}
