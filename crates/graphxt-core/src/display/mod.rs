//! Display annotations.
//!
//! Algorithms never draw anything. They describe what changed through
//! [`Annotation`]s handed to a [`Surface`], and the visualization layer
//! decides how to render them. [`DisplayState`] is the in-memory surface
//! used by the driver, the CLI, and the tests.

use graphxt_common::types::{EdgeId, VertexId};
use graphxt_common::utils::hash::{FxBuildHasher, FxHashMap};
use indexmap::IndexSet;
use serde::Serialize;

/// A displayable graph element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Element {
    /// A vertex.
    Vertex(VertexId),
    /// An edge.
    Edge(EdgeId),
}

/// A single display effect emitted by an algorithm step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// Highlight an element.
    Select(Element),
    /// Remove the highlight from an element.
    Deselect(Element),
    /// Remove every highlight.
    DeselectAll,
    /// Attach a label to an element, replacing any previous label.
    SetLabel(Element, String),
    /// Drop the label of an element.
    ClearLabel(Element),
    /// Append a line to the message log.
    Message(String),
    /// The element was permanently removed from the graph.
    Remove(Element),
}

/// Consumer of display annotations.
pub trait Surface {
    /// Applies one annotation.
    fn apply(&mut self, annotation: Annotation);

    /// Highlights a vertex.
    fn select_vertex(&mut self, id: VertexId) {
        self.apply(Annotation::Select(Element::Vertex(id)));
    }

    /// Highlights an edge.
    fn select_edge(&mut self, id: EdgeId) {
        self.apply(Annotation::Select(Element::Edge(id)));
    }

    /// Removes every highlight.
    fn deselect_all(&mut self) {
        self.apply(Annotation::DeselectAll);
    }

    /// Labels an element.
    fn set_label(&mut self, element: Element, label: String) {
        self.apply(Annotation::SetLabel(element, label));
    }

    /// Appends a message to the log.
    fn message(&mut self, message: String) {
        self.apply(Annotation::Message(message));
    }
}

/// In-memory surface that keeps the current display state.
#[derive(Debug, Default, Clone)]
pub struct DisplayState {
    selected: IndexSet<Element, FxBuildHasher>,
    labels: FxHashMap<Element, String>,
    messages: Vec<String>,
    removed: Vec<Element>,
    history: Vec<Annotation>,
    record_history: bool,
}

impl DisplayState {
    /// Creates an empty display state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a display state that also records every annotation applied.
    #[must_use]
    pub fn recording() -> Self {
        Self {
            record_history: true,
            ..Self::default()
        }
    }

    /// Returns true if the element is highlighted.
    #[must_use]
    pub fn is_selected(&self, element: Element) -> bool {
        self.selected.contains(&element)
    }

    /// Highlighted vertices in selection order.
    pub fn selected_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.selected.iter().filter_map(|e| match e {
            Element::Vertex(id) => Some(*id),
            Element::Edge(_) => None,
        })
    }

    /// Highlighted edges in selection order.
    pub fn selected_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.selected.iter().filter_map(|e| match e {
            Element::Edge(id) => Some(*id),
            Element::Vertex(_) => None,
        })
    }

    /// Returns the label of an element.
    #[must_use]
    pub fn label(&self, element: Element) -> Option<&str> {
        self.labels.get(&element).map(String::as_str)
    }

    /// The message log, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Elements reported as permanently removed, in removal order.
    #[must_use]
    pub fn removed(&self) -> &[Element] {
        &self.removed
    }

    /// Every annotation applied so far, if recording is enabled.
    #[must_use]
    pub fn history(&self) -> &[Annotation] {
        &self.history
    }

    /// Forgets the message log and history, keeping selection and labels.
    pub fn clear_log(&mut self) {
        self.messages.clear();
        self.history.clear();
    }
}

impl Surface for DisplayState {
    fn apply(&mut self, annotation: Annotation) {
        if self.record_history {
            self.history.push(annotation.clone());
        }

        match annotation {
            Annotation::Select(element) => {
                self.selected.insert(element);
            }
            Annotation::Deselect(element) => {
                self.selected.shift_remove(&element);
            }
            Annotation::DeselectAll => self.selected.clear(),
            Annotation::SetLabel(element, label) => {
                self.labels.insert(element, label);
            }
            Annotation::ClearLabel(element) => {
                self.labels.remove(&element);
            }
            Annotation::Message(message) => self.messages.push(message),
            Annotation::Remove(element) => {
                self.selected.shift_remove(&element);
                self.labels.remove(&element);
                self.removed.push(element);
            }
        }
    }
}
