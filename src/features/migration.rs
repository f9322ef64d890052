//! Offline re-encoding of historical password columns.
//!
//! Works on user records exported from the legacy store; reading and writing
//! the store itself is left to the caller. Each active record's primary and
//! app password are encoded unless the classifier says they already are.

use serde::{Deserialize, Deserializer, Serialize};

use super::detection::looks_already_encoded;
use crate::encoders::codec::PasswordCodec;

/// A user row as exported from the legacy store.
///
/// The legacy column names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(alias = "CODIGOUSUARIO")]
    pub id: i64,
    #[serde(alias = "LOGIN")]
    pub login: String,
    #[serde(default, alias = "SENHA")]
    pub password: Option<String>,
    #[serde(default, alias = "SENHA_APP")]
    pub app_password: Option<String>,
    /// Disabled rows are left alone (`"S"`/`"N"` or a boolean)
    #[serde(default, alias = "DESATIVADO", deserialize_with = "legacy_flag")]
    pub disabled: bool,
}

fn legacy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_uppercase().as_str() {
            "S" | "Y" | "SIM" | "YES" | "TRUE" | "1" => Ok(true),
            "N" | "NAO" | "NÃO" | "NO" | "FALSE" | "0" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "unrecognised flag value {:?}",
                other
            ))),
        },
    }
}

/// What happens to one password column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FieldAction {
    /// No value stored (missing or empty)
    Absent,
    /// Value left as-is because it looks encoded
    AlreadyEncoded,
    /// Value to be replaced by its encoding
    Encode { from: String, to: String },
}

impl FieldAction {
    fn decide(codec: &PasswordCodec, value: Option<&str>) -> Self {
        match value {
            None | Some("") => FieldAction::Absent,
            Some(v) if looks_already_encoded(v) => FieldAction::AlreadyEncoded,
            Some(v) => FieldAction::Encode {
                from: v.to_string(),
                to: codec.encode(v),
            },
        }
    }

    pub fn changes(&self) -> bool {
        matches!(self, FieldAction::Encode { .. })
    }

    fn new_value(&self) -> Option<&str> {
        match self {
            FieldAction::Encode { to, .. } => Some(to),
            _ => None,
        }
    }
}

/// Planned changes for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPlan {
    /// Index of the record in the planned slice
    pub index: usize,
    pub id: i64,
    pub login: String,
    pub password: FieldAction,
    pub app_password: FieldAction,
}

impl RecordPlan {
    pub fn changes(&self) -> bool {
        self.password.changes() || self.app_password.changes()
    }
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub total: usize,
    pub migrated: usize,
    pub unchanged: usize,
    pub skipped_disabled: usize,
}

/// Full set of planned changes. Nothing is modified until [`apply`](Self::apply).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    pub records: Vec<RecordPlan>,
    pub summary: MigrationSummary,
}

impl MigrationPlan {
    /// Writes the planned values into `records`, which must be the slice the
    /// plan was built from. Returns the number of records changed.
    pub fn apply(&self, records: &mut [UserRecord]) -> usize {
        let mut changed = 0;
        for plan in self.records.iter().filter(|p| p.changes()) {
            let Some(record) = records.get_mut(plan.index) else {
                log::warn!("record {} ({}) missing, not applied", plan.id, plan.login);
                continue;
            };
            if let Some(value) = plan.password.new_value() {
                record.password = Some(value.to_string());
            }
            if let Some(value) = plan.app_password.new_value() {
                record.app_password = Some(value.to_string());
            }
            changed += 1;
        }
        changed
    }
}

/// Builds a migration plan for `records` without modifying them.
pub fn plan(codec: &PasswordCodec, records: &[UserRecord]) -> MigrationPlan {
    let mut summary = MigrationSummary {
        total: records.len(),
        ..Default::default()
    };
    let mut plans = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if record.disabled {
            log::debug!("skipping disabled user {} ({})", record.login, record.id);
            summary.skipped_disabled += 1;
            continue;
        }

        let plan = RecordPlan {
            index,
            id: record.id,
            login: record.login.clone(),
            password: FieldAction::decide(codec, record.password.as_deref()),
            app_password: FieldAction::decide(codec, record.app_password.as_deref()),
        };

        if plan.changes() {
            log::info!("user {} ({}) needs re-encoding", plan.login, plan.id);
            summary.migrated += 1;
        } else {
            summary.unchanged += 1;
        }
        plans.push(plan);
    }

    MigrationPlan {
        records: plans,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, password: Option<&str>, app_password: Option<&str>) -> UserRecord {
        UserRecord {
            id,
            login: format!("user{}", id),
            password: password.map(String::from),
            app_password: app_password.map(String::from),
            disabled: false,
        }
    }

    #[test]
    fn test_plan_encodes_plain_values() {
        let records = vec![record(1, Some("123"), Some("0"))];
        let plan = plan(PasswordCodec::builtin(), &records);

        assert_eq!(
            plan.records[0].password,
            FieldAction::Encode {
                from: "123".into(),
                to: ";4:4=8=9?<@>".into()
            }
        );
        assert_eq!(
            plan.records[0].app_password,
            FieldAction::Encode {
                from: "0".into(),
                to: ";493".into()
            }
        );
        assert_eq!(plan.summary.migrated, 1);
    }

    #[test]
    fn test_plan_leaves_encoded_and_absent_values() {
        let records = vec![
            record(1, Some("?<><"), None),
            record(2, Some(""), Some("QWERTY")),
        ];
        let plan = plan(PasswordCodec::builtin(), &records);

        assert_eq!(plan.records[0].password, FieldAction::AlreadyEncoded);
        assert_eq!(plan.records[0].app_password, FieldAction::Absent);
        assert_eq!(plan.records[1].password, FieldAction::Absent);
        assert_eq!(plan.records[1].app_password, FieldAction::AlreadyEncoded);
        assert_eq!(
            plan.summary,
            MigrationSummary {
                total: 2,
                migrated: 0,
                unchanged: 2,
                skipped_disabled: 0,
            }
        );
    }

    #[test]
    fn test_plan_skips_disabled() {
        let mut disabled = record(7, Some("123"), None);
        disabled.disabled = true;
        let plan = plan(PasswordCodec::builtin(), &[disabled]);
        assert!(plan.records.is_empty());
        assert_eq!(plan.summary.skipped_disabled, 1);
        assert_eq!(plan.summary.total, 1);
    }

    #[test]
    fn test_plan_does_not_modify_until_applied() {
        let mut records = vec![record(1, Some("123"), None), record(2, Some("?<><"), None)];
        let plan = plan(PasswordCodec::builtin(), &records);
        assert_eq!(records[0].password.as_deref(), Some("123"));

        let changed = plan.apply(&mut records);
        assert_eq!(changed, 1);
        assert_eq!(records[0].password.as_deref(), Some(";4:4=8=9?<@>"));
        assert_eq!(records[0].app_password, None);
        assert_eq!(records[1].password.as_deref(), Some("?<><"));
    }

    #[test]
    fn test_replanning_reencodes_output_with_digits() {
        // ";4:4=8=9?<@>" contains digits, so the heuristic re-encodes it:
        // this is the known false negative of the legacy boundary
        let mut records = vec![record(1, Some("123"), None)];
        let first = plan(PasswordCodec::builtin(), &records);
        first.apply(&mut records);
        let second = plan(PasswordCodec::builtin(), &records);
        assert!(second.records[0].password.changes());
    }

    #[test]
    fn test_deserialize_legacy_columns() {
        let json = r#"[
            {"CODIGOUSUARIO": 3, "LOGIN": "ana", "SENHA": "4321", "SENHA_APP": null, "DESATIVADO": "N"},
            {"id": 4, "login": "rui", "password": "x", "disabled": true},
            {"id": 5, "login": "eva", "DESATIVADO": "S"}
        ]"#;
        let records: Vec<UserRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].id, 3);
        assert_eq!(records[0].login, "ana");
        assert_eq!(records[0].password.as_deref(), Some("4321"));
        assert_eq!(records[0].app_password, None);
        assert!(!records[0].disabled);
        assert!(records[1].disabled);
        assert!(records[2].disabled);
        assert_eq!(records[2].password, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_flag() {
        let json = r#"{"id": 1, "login": "a", "disabled": "maybe"}"#;
        assert!(serde_json::from_str::<UserRecord>(json).is_err());
    }

    #[test]
    fn test_field_action_serializes_tagged() {
        let value = serde_json::to_value(FieldAction::AlreadyEncoded).unwrap();
        assert_eq!(value, serde_json::json!({"action": "already_encoded"}));
    }
}
