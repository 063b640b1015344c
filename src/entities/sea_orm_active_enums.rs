//! `SeaORM` string-backed enums shared by the entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ResultStatus {
    #[sea_orm(string_value = "Pass")]
    Pass,
    #[sea_orm(string_value = "Fail")]
    Fail,
    #[sea_orm(string_value = "Absent")]
    Absent,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Pass => "Pass",
            ResultStatus::Fail => "Fail",
            ResultStatus::Absent => "Absent",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so `pass`, `PASS` and ` Pass ` all parse.
impl FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(ResultStatus::Pass),
            "fail" => Ok(ResultStatus::Fail),
            "absent" => Ok(ResultStatus::Absent),
            other => Err(format!(
                "Invalid status '{}'. Must be one of: Pass, Fail, Absent",
                other
            )),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ExamType {
    #[sea_orm(string_value = "mid-term")]
    #[serde(rename = "mid-term")]
    MidTerm,
    #[sea_orm(string_value = "final")]
    #[serde(rename = "final")]
    Final,
    #[sea_orm(string_value = "sessional")]
    #[serde(rename = "sessional")]
    Sessional,
    #[sea_orm(string_value = "practical")]
    #[serde(rename = "practical")]
    Practical,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum UploadStatus {
    #[sea_orm(string_value = "Processing")]
    Processing,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Completed with errors")]
    #[serde(rename = "Completed with errors")]
    CompletedWithErrors,
    #[sea_orm(string_value = "Failed")]
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_status_parses_case_insensitively() {
        assert_eq!("pass".parse::<ResultStatus>(), Ok(ResultStatus::Pass));
        assert_eq!(" FAIL ".parse::<ResultStatus>(), Ok(ResultStatus::Fail));
        assert_eq!("Absent".parse::<ResultStatus>(), Ok(ResultStatus::Absent));
        assert!("passed".parse::<ResultStatus>().is_err());
    }
}
