use crate::widgets::traits::{DrawOutput, Interactive, OutputNode, RenderContext};

pub enum Node {
    Input(Box<dyn Interactive>),
    Output(Box<dyn OutputNode>),
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Self::Input(input) => input.id(),
            Self::Output(output) => output.id(),
        }
    }

    pub fn draw(&self, ctx: &RenderContext) -> DrawOutput {
        match self {
            Self::Input(input) => input.draw(ctx),
            Self::Output(output) => output.draw(ctx),
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    pub fn as_input(&self) -> Option<&dyn Interactive> {
        match self {
            Self::Input(input) => Some(input.as_ref()),
            Self::Output(_) => None,
        }
    }

    pub fn as_input_mut(&mut self) -> Option<&mut dyn Interactive> {
        match self {
            Self::Input(input) => Some(input.as_mut()),
            Self::Output(_) => None,
        }
    }

    pub fn as_output_mut(&mut self) -> Option<&mut dyn OutputNode> {
        match self {
            Self::Input(_) => None,
            Self::Output(output) => Some(output.as_mut()),
        }
    }
}

pub fn find_input_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut dyn Interactive> {
    nodes
        .iter_mut()
        .find(|node| node.id() == id)
        .and_then(Node::as_input_mut)
}

pub fn find_input<'a>(nodes: &'a [Node], id: &str) -> Option<&'a dyn Interactive> {
    nodes
        .iter()
        .find(|node| node.id() == id)
        .and_then(Node::as_input)
}
