use crate::widgets::node::Node;
use crate::widgets::traits::FocusMode;

#[derive(Debug, Default, Clone)]
pub struct FocusState {
    targets: Vec<String>,
    index: Option<usize>,
}

impl FocusState {
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let mut state = Self::default();
        state.rebuild(nodes);
        state
    }

    pub fn rebuild(&mut self, nodes: &[Node]) {
        self.targets = nodes
            .iter()
            .filter(|node| {
                node.as_input()
                    .is_some_and(|input| input.focus_mode() == FocusMode::Leaf)
            })
            .map(|node| node.id().to_string())
            .collect();
        self.index = if self.targets.is_empty() { None } else { Some(0) };
    }

    pub fn current_id(&self) -> Option<&str> {
        self.index
            .and_then(|i| self.targets.get(i))
            .map(String::as_str)
    }

    pub fn is_on_last(&self) -> bool {
        match self.index {
            Some(index) => index + 1 == self.targets.len(),
            None => true,
        }
    }

    pub fn set_focus_by_id(&mut self, id: &str) {
        if let Some(position) = self.targets.iter().position(|target| target == id) {
            self.index = Some(position);
        }
    }

    pub fn next(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        self.index = Some((current + 1) % self.targets.len());
    }

    pub fn prev(&mut self) {
        let Some(current) = self.index else {
            return;
        };
        if self.targets.is_empty() {
            self.index = None;
            return;
        }
        self.index = Some((current + self.targets.len() - 1) % self.targets.len());
    }
}
