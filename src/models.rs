use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::config::Preferences;

/// Bookmarks returned per request. 50 is both the default and the maximum.
pub const MAX_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Search keyword
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,

    /// Identifier of a Smart List; limits the search to that list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Identifier of a tag; limits the search to that tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<YesNo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_descriptions: Option<YesNo>,

    pub pinyin: YesNo,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn new(pinyin: YesNo) -> Self {
        Self {
            q: None,
            filter: None,
            tag: None,
            starred: None,
            link_descriptions: None,
            pinyin,
            limit: None,
        }
    }

    /// Empty query whose Pinyin flag follows the user's preference.
    pub fn for_preferences(preferences: &Preferences) -> Self {
        Self::new(YesNo::from(preferences.use_pinyin))
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.q = Some(keyword.into());
        self
    }

    pub fn with_smart_list(mut self, id: impl Into<String>) -> Self {
        self.filter = Some(id.into());
        self
    }

    pub fn with_tag(mut self, id: impl Into<String>) -> Self {
        self.tag = Some(id.into());
        self
    }

    pub fn with_starred(mut self, starred: YesNo) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn with_link_descriptions(mut self, value: YesNo) -> Self {
        self.link_descriptions = Some(value);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns a copy with preference-driven fields applied. An enabled
    /// `search_link_descriptions` always wins over the caller's value.
    pub fn merge_preferences(&self, preferences: &Preferences) -> SearchQuery {
        let mut merged = self.clone();
        if preferences.search_link_descriptions {
            merged.link_descriptions = Some(YesNo::Yes);
        }
        merged
    }

    /// Wire-format query parameters. Absent fields produce no pair.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(7);
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(filter) = &self.filter {
            pairs.push(("filter", filter.clone()));
        }
        if let Some(tag) = &self.tag {
            pairs.push(("tag", tag.clone()));
        }
        if let Some(starred) = self.starred {
            pairs.push(("starred", starred.as_str().to_string()));
        }
        if let Some(link_descriptions) = self.link_descriptions {
            pairs.push(("linkDescriptions", link_descriptions.as_str().to_string()));
        }
        pairs.push(("pinyin", self.pinyin.as_str().to_string()));
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Treats an explicit JSON `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tag {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
}

/// A bookmark as returned by Anybox. Fields default when absent or `null`
/// so that records from older app versions still decode. Keys Anybox adds
/// beyond these are ignored and do not survive re-serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(deserialize_with = "null_as_default")]
    pub date_last_opened: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_added: String,
    #[serde(deserialize_with = "null_as_default")]
    pub preferred_browser: String,
    #[serde(deserialize_with = "null_as_default")]
    pub host: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_starred: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub comment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_link_image: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn prefs(search_link_descriptions: bool) -> Preferences {
        Preferences {
            api_key: "key".to_string(),
            use_pinyin: false,
            search_tags: false,
            search_link_descriptions,
        }
    }

    #[test]
    fn bare_query_only_sends_pinyin() {
        let pairs = SearchQuery::new(YesNo::No).query_pairs();
        assert_eq!(pairs, vec![("pinyin", "no".to_string())]);
    }

    #[test]
    fn every_field_uses_its_wire_name() {
        let query = SearchQuery::new(YesNo::Yes)
            .with_keyword("rust book")
            .with_smart_list("list-1")
            .with_tag("tag-9")
            .with_starred(YesNo::No)
            .with_link_descriptions(YesNo::No)
            .with_limit(20);

        let keys: Vec<&str> = query.query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["q", "filter", "tag", "starred", "linkDescriptions", "pinyin", "limit"]
        );
        assert!(query
            .query_pairs()
            .contains(&("q", "rust book".to_string())));
    }

    #[rstest]
    #[case(None, true, Some(YesNo::Yes))]
    #[case(Some(YesNo::No), true, Some(YesNo::Yes))]
    #[case(Some(YesNo::Yes), true, Some(YesNo::Yes))]
    #[case(None, false, None)]
    #[case(Some(YesNo::No), false, Some(YesNo::No))]
    fn preference_forces_link_descriptions(
        #[case] requested: Option<YesNo>,
        #[case] enabled: bool,
        #[case] expected: Option<YesNo>,
    ) {
        let mut query = SearchQuery::new(YesNo::No);
        query.link_descriptions = requested;

        let merged = query.merge_preferences(&prefs(enabled));

        assert_eq!(merged.link_descriptions, expected);
        assert_eq!(query.link_descriptions, requested);
    }

    #[test]
    fn for_preferences_follows_pinyin_setting() {
        let mut preferences = prefs(false);
        preferences.use_pinyin = true;
        assert_eq!(SearchQuery::for_preferences(&preferences).pinyin, YesNo::Yes);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(1), true)]
    #[case(Some(MAX_LIMIT), true)]
    #[case(Some(0), false)]
    #[case(Some(51), false)]
    fn limit_is_bounded(#[case] limit: Option<u32>, #[case] valid: bool) {
        let mut query = SearchQuery::new(YesNo::No);
        query.limit = limit;
        assert_eq!(query.validate().is_ok(), valid);
    }

    #[test]
    fn partial_link_records_decode() {
        let links: Vec<Link> =
            serde_json::from_str(r#"[{"id":"1","title":"Example","isStarred":true,
                "tags":[{"name":"r","originalName":"Rust"}]}]"#)
                .unwrap();

        assert_eq!(links[0].id, "1");
        assert!(links[0].is_starred);
        assert_eq!(links[0].tags[0].original_name, "Rust");
        assert!(links[0].url.is_empty());
    }

    #[test]
    fn null_fields_do_not_drop_the_response() {
        let links: Vec<Link> = serde_json::from_str(
            r#"[{"id":"1","title":"Example","comment":null,"tags":null,"isStarred":null},
                {"id":"2","title":"Other","tags":[{"name":"n","icon":null}]}]"#,
        )
        .unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].comment, "");
        assert!(links[0].tags.is_empty());
        assert!(!links[0].is_starred);
        assert_eq!(links[1].id, "2");
        assert_eq!(links[1].tags[0].icon, "");
    }
}
