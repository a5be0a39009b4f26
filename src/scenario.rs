use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::{
    components::{Health, Input, Speed},
    ecs::{Component, EntityId, EntityManager},
};

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    /// Reject component rows for entities that are not alive.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
    #[serde(default)]
    pub queries: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScenarioStep {
    Create {
        label: String,
    },
    Attach {
        entity: EntityRef,
        components: Vec<ComponentSpec>,
    },
    Remove {
        entity: EntityRef,
    },
}

/// A created entity's label, or a raw ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EntityRef {
    Id(EntityId),
    Label(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentSpec {
    Input(Input),
    Speed(Speed),
    Health(Health),
}

impl ComponentSpec {
    pub fn into_component(self) -> Box<dyn Component> {
        match self {
            ComponentSpec::Input(input) => Box::new(input),
            ComponentSpec::Speed(speed) => Box::new(speed),
            ComponentSpec::Health(health) => Box::new(health),
        }
    }
}

/// Outcome of running a scenario
#[derive(Debug)]
pub struct ScenarioReport {
    pub manager: EntityManager,
    pub labels: HashMap<String, EntityId>,
    /// Sorted holder IDs per queried class name
    pub holders: BTreeMap<String, Vec<EntityId>>,
}

impl ScenarioReport {
    pub fn holders_of(&self, class_name: &str) -> &[EntityId] {
        self.holders
            .get(class_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    pub fn run(&self) -> Result<ScenarioReport> {
        let mut manager = EntityManager::new();
        let mut labels = HashMap::new();

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                ScenarioStep::Create { label } => {
                    let entity = manager.create_entity();
                    if labels.insert(label.clone(), entity.id).is_some() {
                        bail!("step {index}: label '{label}' is already taken");
                    }
                }
                ScenarioStep::Attach { entity, components } => {
                    let entity_id = resolve(&labels, entity)
                        .with_context(|| format!("step {index}: attach"))?;
                    let components = components
                        .iter()
                        .cloned()
                        .map(ComponentSpec::into_component);
                    if self.strict {
                        manager
                            .try_add_components_to_entity(entity_id, components)
                            .with_context(|| format!("step {index}: attach"))?;
                    } else {
                        manager.add_components_to_entity(entity_id, components);
                    }
                }
                ScenarioStep::Remove { entity } => {
                    let entity_id = resolve(&labels, entity)
                        .with_context(|| format!("step {index}: remove"))?;
                    manager.remove_entity(entity_id);
                }
            }
        }

        let holders = self
            .queries
            .iter()
            .map(|class_name| {
                let mut ids: Vec<EntityId> = manager
                    .get_all_entities_possessing_components_of_class(class_name)
                    .into_iter()
                    .collect();
                ids.sort_unstable();
                (class_name.clone(), ids)
            })
            .collect();

        info!(
            scenario = %self.name,
            steps = self.steps.len(),
            live_entities = manager.entity_count(),
            "scenario finished"
        );

        Ok(ScenarioReport {
            manager,
            labels,
            holders,
        })
    }
}

fn resolve(labels: &HashMap<String, EntityId>, entity: &EntityRef) -> Result<EntityId> {
    match entity {
        EntityRef::Id(id) => Ok(*id),
        EntityRef::Label(label) => labels
            .get(label)
            .copied()
            .with_context(|| format!("unknown entity label '{label}'")),
    }
}
