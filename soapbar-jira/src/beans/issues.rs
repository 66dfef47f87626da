use chrono::{DateTime, FixedOffset};
use soapbar_core::bean;
use soapbar_core::qname::xsd;

use super::array_type;
use super::base::NamedRemoteEntity;
use crate::consts::BEANS_NS;

bean! {
  /// A saved search
  pub struct Filter in BEANS_NS => "RemoteFilter" extends named: NamedRemoteEntity {
    pub author: Option<String> => "author" as xsd::STRING;
    pub description: Option<String> => "description" as xsd::STRING;
    pub project: Option<String> => "project" as xsd::STRING;
    /// The search request, serialised by the server
    pub xml: Option<String> => "xml" as xsd::STRING;
  }
}

bean! {
  /// Field id and values, as used when updating issues
  pub struct FieldValue in BEANS_NS => "RemoteFieldValue" {
    pub id: Option<String> => "id" as xsd::STRING;
    pub values: Option<Vec<String>> => "values" as array_type("ArrayOf_xsd_string");
  }
}

bean! {
  pub struct Worklog in BEANS_NS => "RemoteWorklog" {
    pub author: Option<String> => "author" as xsd::STRING;
    pub comment: Option<String> => "comment" as xsd::STRING;
    pub created: Option<DateTime<FixedOffset>> => "created" as xsd::DATE_TIME;
    pub group_level: Option<String> => "groupLevel" as xsd::STRING;
    pub id: Option<String> => "id" as xsd::STRING;
    pub role_level_id: Option<String> => "roleLevelId" as xsd::STRING;
    pub start_date: Option<DateTime<FixedOffset>> => "startDate" as xsd::DATE_TIME;
    /// Duration in JIRA notation, e.g. `1h 30m`
    pub time_spent: Option<String> => "timeSpent" as xsd::STRING;
    pub time_spent_in_seconds: Option<i64> => "timeSpentInSeconds" as xsd::LONG, required;
    pub update_author: Option<String> => "updateAuthor" as xsd::STRING;
    pub updated: Option<DateTime<FixedOffset>> => "updated" as xsd::DATE_TIME;
  }
}

impl FieldValue {
  pub fn new(id: &str, values: &[&str]) -> Self {
    Self {
      id: Some(id.to_string()),
      values: Some(values.iter().map(|value| value.to_string()).collect()),
    }
  }
}

impl Worklog {
  /// A new entry to submit: the server fills in ids, authors and
  /// timestamps.
  pub fn new(start_date: DateTime<FixedOffset>, time_spent: &str, seconds: i64, comment: Option<&str>) -> Self {
    Self {
      comment: comment.map(str::to_string),
      start_date: Some(start_date),
      time_spent: Some(time_spent.to_string()),
      time_spent_in_seconds: Some(seconds),
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use soapbar_core::{EntityCodec, WireElement};

  use super::*;

  #[test]
  fn test_worklog_decodes_server_timestamps() {
    let xml = r#"<multiRef xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                          xmlns:xsd="http://www.w3.org/2001/XMLSchema">
        <author xsi:type="xsd:string">fred</author>
        <comment xsi:type="xsd:string">Fixed the build</comment>
        <created xsi:type="xsd:dateTime">2011-03-14T09:30:00.000Z</created>
        <groupLevel xsi:type="xsd:string" xsi:nil="true"/>
        <id xsi:type="xsd:string">10100</id>
        <roleLevelId xsi:type="xsd:string" xsi:nil="true"/>
        <startDate xsi:type="xsd:dateTime">2011-03-14T08:00:00.000+10:00</startDate>
        <timeSpent xsi:type="xsd:string">1h 30m</timeSpent>
        <timeSpentInSeconds xsi:type="xsd:long">5400</timeSpentInSeconds>
        <updateAuthor xsi:type="xsd:string">fred</updateAuthor>
        <updated xsi:type="xsd:dateTime">2011-03-14T09:30:00.000Z</updated>
      </multiRef>"#;

    let worklog: Worklog = EntityCodec::decode(&WireElement::parse(xml).unwrap()).unwrap();
    assert_eq!(worklog.time_spent_in_seconds, Some(5400));
    assert_eq!(worklog.group_level, None);
    let start = worklog.start_date.unwrap();
    assert_eq!(start.offset().local_minus_utc(), 10 * 3600);
    assert_eq!(start.to_rfc3339(), "2011-03-14T08:00:00+10:00");
  }

  #[test]
  fn test_field_value_keeps_empty_values_distinct_from_none() {
    let empty = FieldValue::new("labels", &[]);
    let decoded: FieldValue = EntityCodec::decode(&EntityCodec::encode(&empty, "value").unwrap()).unwrap();
    assert_eq!(decoded.values, Some(vec![]));

    let unset = FieldValue {
      id: Some("labels".to_string()),
      values: None,
    };
    let decoded: FieldValue = EntityCodec::decode(&EntityCodec::encode(&unset, "value").unwrap()).unwrap();
    assert_eq!(decoded.values, None);
    assert_ne!(decoded, empty);
  }

  #[test]
  fn test_filter_keeps_xml_text_intact() {
    let filter = Filter {
      xml: Some("<searchrequest name=\"Mine\"><parameter/></searchrequest>".to_string()),
      ..Filter::default()
    };
    let xml = EntityCodec::encode(&filter, "filter").unwrap().to_xml();
    let decoded: Filter = EntityCodec::decode(&WireElement::parse(&xml).unwrap()).unwrap();
    assert_eq!(decoded, filter);
  }
}
