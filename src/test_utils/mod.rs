#![allow(missing_docs)]

pub(crate) mod fake_plaid;
pub(crate) mod http;
pub(crate) mod logs;

pub(crate) use fake_plaid::{
    FakePlaid, RunningFakePlaid, TEST_CLIENT_ID, TEST_CLIENT_NAME, TEST_SECRET, test_config,
};
pub(crate) use http::{assert_content_type, assert_status, parse_json_body};
pub(crate) use logs::CapturedLogs;
