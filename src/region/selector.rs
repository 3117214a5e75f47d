use crate::foundation::core::{Bitmap, Rect};
use crate::region::selection::{BlendSpec, Selection};
use crate::style::StyleSettings;

/// Drags at or below this size on either axis are discarded.
pub const MIN_SELECTION_SIZE: f64 = 10.0;

/// Candidate rectangles at or below this size on either axis get no live preview.
pub const MIN_PREVIEW_SIZE: f64 = 5.0;

/// Pointer interaction state of a [`RegionSelector`].
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorState {
    Idle,
    /// A new rectangle is being drawn; `rect` may have negative size until release.
    Drawing { rect: Rect },
    /// An existing selection is being moved.
    Dragging { id: String, last: (f64, f64) },
}

/// A drawn rectangle waiting to be confirmed or cancelled.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSelection {
    pub id: String,
    pub name: String,
    pub rect: Rect,
    pub settings: StyleSettings,
    pub blend: BlendSpec,
}

/// Headless pointer-driven editor for the selection list.
///
/// Press on an existing selection to pick and drag it (topmost wins); press elsewhere to draw a
/// new rectangle, which is offered back as a [`PendingSelection`] on release.
#[derive(Clone, Debug)]
pub struct RegionSelector {
    selections: Vec<Selection>,
    selected: Option<String>,
    state: SelectorState,
    active: bool,
    settings: StyleSettings,
    next_id: u64,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new(StyleSettings::default())
    }
}

impl RegionSelector {
    /// Active selector whose new selections snapshot `settings`.
    pub fn new(settings: StyleSettings) -> Self {
        Self {
            selections: Vec::new(),
            selected: None,
            state: SelectorState::Idle,
            active: true,
            settings,
            next_id: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable pointer handling. Disabling abandons any drag in progress.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.state = SelectorState::Idle;
        }
    }

    /// Settings snapshotted into selections drawn from now on.
    pub fn set_settings(&mut self, settings: StyleSettings) {
        self.settings = settings;
    }

    pub fn state(&self) -> &SelectorState {
        &self.state
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn selected(&self) -> Option<&Selection> {
        let id = self.selected.as_deref()?;
        self.selections.iter().find(|s| s.id == id)
    }

    /// Rectangle being drawn, normalized.
    pub fn candidate(&self) -> Option<Rect> {
        match &self.state {
            SelectorState::Drawing { rect } => Some(rect.normalized()),
            _ => None,
        }
    }

    pub fn pointer_down(&mut self, point: (f64, f64)) {
        if !self.active {
            return;
        }
        let hit = self
            .selections
            .iter()
            .rev()
            .find(|s| s.rect.contains(point.0, point.1))
            .map(|s| s.id.clone());
        self.state = match hit {
            Some(id) => {
                self.selected = Some(id.clone());
                SelectorState::Dragging { id, last: point }
            }
            None => SelectorState::Drawing {
                rect: Rect::new(point.0, point.1, 0.0, 0.0),
            },
        };
    }

    pub fn pointer_move(&mut self, point: (f64, f64)) {
        if !self.active {
            return;
        }
        match &mut self.state {
            SelectorState::Idle => {}
            SelectorState::Drawing { rect } => {
                rect.width = point.0 - rect.x;
                rect.height = point.1 - rect.y;
            }
            SelectorState::Dragging { id, last } => {
                let (dx, dy) = (point.0 - last.0, point.1 - last.1);
                *last = point;
                if let Some(s) = self.selections.iter_mut().find(|s| s.id == *id) {
                    s.rect = s.rect.translate(dx, dy);
                }
            }
        }
    }

    /// Finish the current gesture.
    ///
    /// A drawn rectangle larger than [`MIN_SELECTION_SIZE`] on both axes comes back as a pending
    /// selection; smaller ones are dropped. Drags simply end.
    pub fn pointer_up(&mut self) -> Option<PendingSelection> {
        if !self.active {
            return None;
        }
        let state = std::mem::replace(&mut self.state, SelectorState::Idle);
        let SelectorState::Drawing { rect } = state else {
            return None;
        };
        let rect = rect.normalized();
        if rect.width <= MIN_SELECTION_SIZE || rect.height <= MIN_SELECTION_SIZE {
            tracing::debug!(width = rect.width, height = rect.height, "selection too small");
            return None;
        }
        let id = format!("selection-{}", self.next_id);
        self.next_id += 1;
        Some(PendingSelection {
            id,
            name: format!("Selection {}", self.selections.len() + 1),
            rect,
            settings: self.settings,
            blend: BlendSpec::default(),
        })
    }

    /// Add a pending selection to the list and select it. An empty `name` keeps the suggested
    /// one.
    pub fn confirm(
        &mut self,
        pending: PendingSelection,
        name: &str,
        blend: BlendSpec,
    ) -> &Selection {
        let name = if name.trim().is_empty() {
            pending.name
        } else {
            name.trim().to_owned()
        };
        let selection = Selection::new(pending.id, name, pending.rect, pending.settings)
            .with_blend(blend);
        self.selected = Some(selection.id.clone());
        self.selections.push(selection);
        &self.selections[self.selections.len() - 1]
    }

    /// Abandon the gesture in progress.
    pub fn cancel(&mut self) {
        self.state = SelectorState::Idle;
    }

    /// Remove a selection. Returns `false` when `id` is unknown.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| s.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.selections.len() != before
    }

    pub fn update_style(&mut self, id: &str, settings: StyleSettings) -> bool {
        let Some(selection) = self.find_mut(id) else {
            return false;
        };
        selection.settings = settings;
        true
    }

    pub fn update_blend(&mut self, id: &str, blend: BlendSpec) -> bool {
        let Some(selection) = self.find_mut(id) else {
            return false;
        };
        selection.blend = blend;
        true
    }

    /// Drop every selection and any gesture in progress.
    pub fn clear(&mut self) {
        self.selections.clear();
        self.selected = None;
        self.state = SelectorState::Idle;
    }

    /// Grayscale crop of `image` under the rectangle being drawn, once it is larger than
    /// [`MIN_PREVIEW_SIZE`] on both axes.
    pub fn live_preview(&self, image: &Bitmap) -> Option<Bitmap> {
        let rect = self.candidate()?;
        if rect.width <= MIN_PREVIEW_SIZE || rect.height <= MIN_PREVIEW_SIZE {
            return None;
        }
        let bounds = rect.to_pixel_bounds(image.width(), image.height())?;
        Some(Bitmap::from_fn(bounds.width(), bounds.height(), |x, y| {
            let [r, g, b, a] = image.get_pixel(bounds.x0 + x, bounds.y0 + y).0;
            let v = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
            image::Rgba([v, v, v, a])
        }))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Selection> {
        self.selections.iter_mut().find(|s| s.id == id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/selector.rs"]
mod tests;
