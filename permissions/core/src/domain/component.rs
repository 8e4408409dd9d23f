// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use super::ids::{ComponentId, ParticipatorySpaceId};
use super::settings::{ComponentSettings, StepSettings};

/// The opinions component a request is evaluated in.
///
/// `settings` are the component-wide flags; `step_settings` are the flags of the
/// currently active phase of the participatory space (the "current settings").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: ComponentId,
    pub participatory_space: ParticipatorySpaceId,
    #[serde(default)]
    pub settings: ComponentSettings,
    #[serde(default)]
    pub step_settings: StepSettings,
}

impl Component {
    pub fn new(id: ComponentId, participatory_space: ParticipatorySpaceId) -> Self {
        Self {
            id,
            participatory_space,
            settings: ComponentSettings::default(),
            step_settings: StepSettings::default(),
        }
    }
}
