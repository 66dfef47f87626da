use chrono::{DateTime, FixedOffset};
use soapbar_core::qname::xsd;
use soapbar_core::{EntityRef, bean};

use super::bean_type;
use crate::consts::BEANS_NS;

bean! {
  /// Server clock as reported by `getServerInfo`
  pub struct TimeInfo in BEANS_NS => "RemoteTimeInfo" {
    pub server_time: Option<String> => "serverTime" as xsd::STRING;
    pub time_zone_id: Option<String> => "timeZoneId" as xsd::STRING;
  }
}

bean! {
  pub struct ServerInfo in BEANS_NS => "RemoteServerInfo" {
    pub base_url: Option<String> => "baseUrl" as xsd::STRING;
    pub build_date: Option<DateTime<FixedOffset>> => "buildDate" as xsd::DATE_TIME;
    pub build_number: Option<String> => "buildNumber" as xsd::STRING;
    pub edition: Option<String> => "edition" as xsd::STRING;
    pub server_time: Option<EntityRef<TimeInfo>> => "serverTime" as bean_type("RemoteTimeInfo");
    pub version: Option<String> => "version" as xsd::STRING;
  }
}
