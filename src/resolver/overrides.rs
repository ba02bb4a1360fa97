//! Domain override rules applied to introspected foreign keys.
//!
//! Schema introspection reports what the database enforces, which is not
//! always what an import needs. Rules adjust a table's requirement map before
//! the dependency graph is built:
//!
//! | Action | Effect |
//! |---|---|
//! | [`Require`](OverrideAction::Require) | add (or replace) a requirement |
//! | [`Suppress`](OverrideAction::Suppress) | remove one specific parent/column requirement |
//! | [`Drop`](OverrideAction::Drop) | remove every requirement on a parent table |
//! | [`Alias`](OverrideAction::Alias) | redirect a requirement to another imported table |
//!
//! Rules are evaluated in list order. The first three edit the requirement map
//! of a table; aliases are consulted per requirement once the map is final.
//!
//! Rules are plain data and can be loaded from TOML:
//!
//! ```toml
//! [[rules]]
//! table = "obs"
//! action = "drop"
//! parent = "concept"
//!
//! [[rules]]
//! action = "alias"
//! from = "patient"
//! to = "person"
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{
    ENCOUNTER_ID_COLUMN, ENCOUNTER_TABLE, FORM_ID_COLUMN, FORM_TABLE, LOCATION_ID_COLUMN,
    LOCATION_TABLE, OBS_TABLE, PATIENT_ID_COLUMN, PATIENT_IDENTIFIER_TABLE, PATIENT_TABLE,
    PERSON_TABLE, PROVIDER_ID_COLUMN, USERS_TABLE,
};
use crate::schema::ForeignKeyMap;

/// What a rule does to a table's requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OverrideAction {
    Require {
        parent: String,
        column: String,
    },
    Suppress {
        parent: String,
        column: String,
    },
    Drop {
        parent: String,
    },
    /// Use `to` for requirements on `from` when only `to` is imported.
    Alias {
        from: String,
        to: String,
    },
}

/// A single override rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    /// Table whose requirements the rule edits; `None` matches every table.
    #[serde(default)]
    pub table: Option<String>,

    /// Restrict the rule to encounter-centric templates.
    #[serde(default)]
    pub encounter_only: bool,

    #[serde(flatten)]
    pub action: OverrideAction,
}

impl OverrideRule {
    /// Rule applying to a single table.
    pub fn for_table(table: impl Into<String>, action: OverrideAction) -> Self {
        Self {
            table: Some(table.into()),
            encounter_only: false,
            action,
        }
    }

    /// Rule applying to every table.
    #[must_use]
    pub fn for_all_tables(action: OverrideAction) -> Self {
        Self {
            table: None,
            encounter_only: false,
            action,
        }
    }

    #[must_use]
    pub fn encounter_only(mut self) -> Self {
        self.encounter_only = true;
        self
    }

    fn matches(&self, table: &str, encounter: bool) -> bool {
        (!self.encounter_only || encounter) && self.table.as_deref().is_none_or(|t| t == table)
    }
}

/// Ordered list of override rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRules {
    #[serde(default)]
    rules: Vec<OverrideRule>,
}

impl OverrideRules {
    /// No rules: introspected foreign keys are used as they are.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rule set every spreadsheet import uses.
    ///
    /// 1. `patient_identifier` always needs its `patient`.
    /// 2. In encounter-centric imports `obs` needs the row's `encounter`, even
    ///    though `obs.encounter_id` is nullable.
    /// 3. `encounter` needs a `location` and a `form`, and its `provider_id`
    ///    (a person acting as practitioner, not the patient) is ignored.
    /// 4. References to `users` are ignored everywhere.
    /// 5. `patient` requirements fall back to `person` when only people are imported.
    #[must_use]
    pub fn standard() -> Self {
        let require = |parent: &str, column: &str| OverrideAction::Require {
            parent: parent.to_string(),
            column: column.to_string(),
        };

        Self {
            rules: vec![
                OverrideRule::for_table(
                    PATIENT_IDENTIFIER_TABLE,
                    require(PATIENT_TABLE, PATIENT_ID_COLUMN),
                ),
                OverrideRule::for_table(OBS_TABLE, require(ENCOUNTER_TABLE, ENCOUNTER_ID_COLUMN))
                    .encounter_only(),
                OverrideRule::for_table(
                    ENCOUNTER_TABLE,
                    require(LOCATION_TABLE, LOCATION_ID_COLUMN),
                ),
                OverrideRule::for_table(ENCOUNTER_TABLE, require(FORM_TABLE, FORM_ID_COLUMN)),
                OverrideRule::for_table(
                    ENCOUNTER_TABLE,
                    OverrideAction::Suppress {
                        parent: PERSON_TABLE.to_string(),
                        column: PROVIDER_ID_COLUMN.to_string(),
                    },
                ),
                OverrideRule::for_all_tables(OverrideAction::Drop {
                    parent: USERS_TABLE.to_string(),
                }),
                OverrideRule::for_all_tables(OverrideAction::Alias {
                    from: PATIENT_TABLE.to_string(),
                    to: PERSON_TABLE.to_string(),
                }),
            ],
        }
    }

    pub fn push(&mut self, rule: OverrideRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// Append every rule of `other` after the existing ones.
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.rules.extend(other.rules);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[OverrideRule] {
        &self.rules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Edit `requirements` of `table` with every matching non-alias rule.
    pub fn apply(&self, table: &str, encounter: bool, requirements: &mut ForeignKeyMap) {
        for rule in self.rules.iter().filter(|r| r.matches(table, encounter)) {
            match &rule.action {
                OverrideAction::Require {
                    parent,
                    column,
                } => {
                    tracing::debug!("{table}: forcing requirement on {parent} via {column}");
                    requirements.insert(parent.clone(), column.clone());
                }
                OverrideAction::Suppress {
                    parent,
                    column,
                } => {
                    if requirements.get(parent) == Some(column) {
                        tracing::debug!("{table}: suppressing requirement on {parent} via {column}");
                        requirements.remove(parent);
                    }
                }
                OverrideAction::Drop {
                    parent,
                } => {
                    if requirements.remove(parent).is_some() {
                        tracing::debug!("{table}: dropping requirement on {parent}");
                    }
                }
                OverrideAction::Alias {
                    ..
                } => {}
            }
        }
    }

    /// Table that actually satisfies `table`'s requirement on `parent`.
    ///
    /// The first matching alias whose source is not imported while its target
    /// is wins; otherwise `parent` is returned unchanged.
    pub fn alias_for(
        &self,
        table: &str,
        encounter: bool,
        parent: &str,
        is_imported: impl Fn(&str) -> bool,
    ) -> String {
        for rule in self.rules.iter().filter(|r| r.matches(table, encounter)) {
            let OverrideAction::Alias {
                from,
                to,
            } = &rule.action
            else {
                continue;
            };
            if from == parent && !is_imported(from) && is_imported(to) {
                tracing::debug!("{table}: requirement on {parent} satisfied by {to}");
                return to.clone();
            }
        }
        parent.to_string()
    }
}
