//! Stack update builder.

use serde::Serialize;
use hifi_core::enums::StackPurpose;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<StackPurpose>,
}

pub struct StackUpdateBuilder(StackUpdate);

impl StackUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(StackUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub fn purpose(mut self, purpose: StackPurpose) -> Self {
        self.0.purpose = Some(purpose);
        self
    }

    #[must_use]
    pub fn build(self) -> StackUpdate {
        self.0
    }
}

impl Default for StackUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
