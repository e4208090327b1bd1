use std::time::Instant;

use tracing::{info, warn};

use crate::text::TextSlot;
use crate::timeline::Stage;
use crate::transition::TransitionOrchestrator;

/// One caption pair plus the sphere color shown with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub title: String,
    pub subtitle: String,
    pub color: [f32; 3],
}

impl ContentItem {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, color: [f32; 3]) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            color,
        }
    }
}

impl From<&sketchconfig::ContentEntry> for ContentItem {
    fn from(entry: &sketchconfig::ContentEntry) -> Self {
        Self::new(entry.title.clone(), entry.subtitle.clone(), entry.color)
    }
}

/// Built-in content used when the configuration supplies none.
pub fn default_content() -> Vec<ContentItem> {
    sketchconfig::builtin_content()
        .iter()
        .map(ContentItem::from)
        .collect()
}

/// Ordered content list with a wrapping cursor.
#[derive(Debug, Clone)]
pub struct ContentCycler {
    items: Vec<ContentItem>,
    current: usize,
}

impl ContentCycler {
    pub fn new(items: Vec<ContentItem>) -> Self {
        if items.is_empty() {
            warn!("content list is empty; advancing will do nothing");
        }
        Self { items, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&ContentItem> {
        self.items.get(self.current)
    }

    /// Moves to the next item and starts its transition.
    ///
    /// Returns the new index, or `None` when the list is empty.
    pub fn advance(
        &mut self,
        orchestrator: &mut TransitionOrchestrator,
        stage: &mut Stage<'_>,
        now: Instant,
    ) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.items.len();
        info!(
            index = self.current,
            total = self.items.len(),
            "advancing content"
        );
        self.present_current(orchestrator, stage, now);
        Some(self.current)
    }

    /// Replays the entrance for the current item without moving the cursor.
    pub fn present_current(
        &self,
        orchestrator: &mut TransitionOrchestrator,
        stage: &mut Stage<'_>,
        now: Instant,
    ) {
        let Some(item) = self.current() else {
            return;
        };
        stage.text.set_text(TextSlot::Title, &item.title);
        stage.text.set_text(TextSlot::Subtitle, &item.subtitle);
        orchestrator.run_transition(item, stage, now);
    }
}
