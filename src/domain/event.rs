//! Event record
//!
//! A scheduled sport contest. Identity is `(home_team, event_date)`.

use serde::{Deserialize, Serialize};

/// A scheduled contest between a home and an away team.
///
/// `home_team` is the partition key and `event_date` (epoch millis) the sort
/// key; together they identify the record. `away_team` and `city` are the
/// partition keys of the two secondary indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Informational only, not part of any key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    pub event_date: i64,
    #[serde(default)]
    pub sport: String,
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl Event {
    /// Create an event with only its key set
    pub fn new(home_team: impl Into<String>, event_date: i64) -> Self {
        Self {
            event_id: None,
            event_date,
            sport: String::new(),
            home_team: home_team.into(),
            away_team: String::new(),
            city: String::new(),
            country: String::new(),
        }
    }

    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }

    pub fn with_sport(mut self, sport: impl Into<String>) -> Self {
        self.sport = sport.into();
        self
    }

    pub fn with_away_team(mut self, away_team: impl Into<String>) -> Self {
        self.away_team = away_team.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Primary key of this record
    pub fn key(&self) -> EventKey {
        EventKey::new(self.home_team.clone(), self.event_date)
    }

    /// Value this record carries for a secondary index, if it is indexed there.
    ///
    /// Empty attributes are not indexed.
    pub fn index_value(&self, index: SecondaryIndex) -> Option<&str> {
        let value = match index {
            SecondaryIndex::AwayTeam => self.away_team.as_str(),
            SecondaryIndex::City => self.city.as_str(),
        };
        (!value.is_empty()).then_some(value)
    }
}

/// Primary key: partition `home_team`, sort `event_date`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventKey {
    pub home_team: String,
    pub event_date: i64,
}

impl EventKey {
    pub fn new(home_team: impl Into<String>, event_date: i64) -> Self {
        Self {
            home_team: home_team.into(),
            event_date,
        }
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.home_team, self.event_date)
    }
}

/// Store-maintained secondary access paths on the events table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryIndex {
    AwayTeam,
    City,
}

impl SecondaryIndex {
    /// Index name as registered in the store
    pub fn name(&self) -> &'static str {
        match self {
            SecondaryIndex::AwayTeam => "AwayTeam-Index",
            SecondaryIndex::City => "City-Index",
        }
    }

    /// Attribute the index is keyed on
    pub fn attribute(&self) -> &'static str {
        match self {
            SecondaryIndex::AwayTeam => "awayTeam",
            SecondaryIndex::City => "city",
        }
    }
}

impl std::fmt::Display for SecondaryIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_camel_case() {
        let event = Event::new("Lions", 100)
            .with_event_id(7)
            .with_away_team("Bears")
            .with_city("Detroit");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["homeTeam"], "Lions");
        assert_eq!(json["eventDate"], 100);
        assert_eq!(json["awayTeam"], "Bears");
        assert_eq!(json["eventId"], 7);
    }

    #[test]
    fn test_event_deserializes_with_missing_optional_fields() {
        let event: Event =
            serde_json::from_str(r#"{"homeTeam":"Lions","eventDate":100}"#).unwrap();

        assert_eq!(event.key(), EventKey::new("Lions", 100));
        assert!(event.event_id.is_none());
        assert!(event.away_team.is_empty());
    }

    #[test]
    fn test_empty_attribute_is_not_indexed() {
        let event = Event::new("Lions", 100).with_city("Detroit");

        assert_eq!(event.index_value(SecondaryIndex::City), Some("Detroit"));
        assert_eq!(event.index_value(SecondaryIndex::AwayTeam), None);
    }

    #[test]
    fn test_event_keys_order_by_team_then_date() {
        let mut keys = vec![
            EventKey::new("Lions", 100),
            EventKey::new("Bears", 200),
            EventKey::new("Lions", 50),
        ];
        keys.sort();

        assert_eq!(
            keys,
            vec![
                EventKey::new("Bears", 200),
                EventKey::new("Lions", 50),
                EventKey::new("Lions", 100),
            ]
        );
    }

    #[test]
    fn test_index_names() {
        assert_eq!(SecondaryIndex::AwayTeam.name(), "AwayTeam-Index");
        assert_eq!(SecondaryIndex::City.attribute(), "city");
    }
}
