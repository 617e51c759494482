use crate::core::ValuePath;
use crate::widgets::node::Node;
use crate::widgets::traits::{Interactive, OutputNode};

/// One page of the wizard: the nodes it renders and the record paths it
/// owns for validation. Step order is fixed once the list is built.
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub hint: Option<String>,
    pub nodes: Vec<Node>,
    pub paths: Vec<ValuePath>,
}

impl StepDefinition {
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> StepBuilder {
        StepBuilder::new(id, title)
    }
}

pub struct StepBuilder {
    id: String,
    title: String,
    description: Option<String>,
    hint: Option<String>,
    nodes: Vec<Node>,
    paths: Vec<ValuePath>,
}

impl StepBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            hint: None,
            nodes: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Adds an input widget and claims its id as a validated path.
    pub fn input(mut self, input: impl Interactive + 'static) -> Self {
        if let Ok(path) = ValuePath::parse(input.id()) {
            self.paths.push(path);
        }
        self.nodes.push(Node::Input(Box::new(input)));
        self
    }

    pub fn output(mut self, output: impl OutputNode + 'static) -> Self {
        self.nodes.push(Node::Output(Box::new(output)));
        self
    }

    pub fn build(self) -> StepDefinition {
        StepDefinition {
            id: self.id,
            title: self.title,
            description: self.description,
            hint: self.hint,
            nodes: self.nodes,
            paths: self.paths,
        }
    }
}
