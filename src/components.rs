use serde::Deserialize;

use crate::ecs::{Component, ComponentClass};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Input {
    #[serde(default)]
    pub forward_key: bool,
    #[serde(default)]
    pub backwards_key: bool,
    #[serde(default)]
    pub left_key: bool,
    #[serde(default)]
    pub right_key: bool,
    #[serde(default)]
    pub shoot_key: bool,
}

impl Component for Input {
    fn component_name(&self) -> &str {
        Self::CLASS_NAME
    }
}

impl ComponentClass for Input {
    const CLASS_NAME: &'static str = "Input";
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Speed {
    pub value: i32,
}

impl Speed {
    pub fn new(value: i32) -> Self {
        Self { value }
    }
}

impl Component for Speed {
    fn component_name(&self) -> &str {
        Self::CLASS_NAME
    }
}

impl ComponentClass for Speed {
    const CLASS_NAME: &'static str = "Speed";
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub points: i32,
}

impl Health {
    pub fn new(points: i32) -> Self {
        Self { points }
    }
}

impl Component for Health {
    fn component_name(&self) -> &str {
        Self::CLASS_NAME
    }
}

impl ComponentClass for Health {
    const CLASS_NAME: &'static str = "Health";
}
