//! Visual-effect commands and the surfaces that render them.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::models::{ElementRole, Entrance, PageState};

/// Which animated element an [`Effect::Enter`] applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Element(ElementRole),
    ServiceBox(usize),
    ProjectBox(usize),
    /// Radial bar container; its delay drives the gauge's `--delay` property.
    RadialBar(usize),
}

/// One visual-state change.
///
/// Effects are produced by [`plan`](super::plan), applied to the
/// [`PageState`] and forwarded to the host's [`VisualSurface`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum Effect {
    /// Toggle the header's sticky style.
    SetSticky { sticky: bool },
    /// Clear every nav link, then activate the first one pointing at `section`.
    ActivateNav { section: Option<String> },
    /// Mark an element entered, with an optional transition delay in seconds.
    Enter {
        target: Target,
        entrance: Entrance,
        delay: Option<f64>,
    },
    /// Set a skill bar's fill width, in percent.
    FillBar { index: usize, width: f64 },
    /// Reveal a radial bar's progress ring, moving its dash offset if known.
    FillRing {
        index: usize,
        stroke_offset: Option<f64>,
    },
}

impl Effect {
    /// Stylesheet class an `Enter` effect adds to its element.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Self::Enter { entrance, .. } => Some(entrance.class_name()),
            _ => None,
        }
    }
}

/// Host-side rendering capability.
pub trait VisualSurface {
    fn render(&mut self, effect: &Effect);
}

/// Recording surface, used by tests and by hosts that batch updates.
impl VisualSurface for Vec<Effect> {
    fn render(&mut self, effect: &Effect) {
        self.push(effect.clone());
    }
}

/// Surface that discards everything; for hosts that only read back the page state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl VisualSurface for NullSurface {
    fn render(&mut self, _effect: &Effect) {}
}

/// Writes every effect as one JSON object per line.
///
/// `Enter` effects carry an extra `class` field naming the stylesheet class
/// the host should add.
#[derive(Debug)]
pub struct JsonLinesSurface<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VisualSurface for JsonLinesSurface<W> {
    fn render(&mut self, effect: &Effect) {
        let mut value = match serde_json::to_value(effect) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Could not encode effect: {}", e);
                return;
            }
        };
        if let (Some(class), Some(object)) = (effect.css_class(), value.as_object_mut()) {
            object.insert("class".to_string(), class.into());
        }
        if let Err(e) = writeln!(self.out, "{}", value) {
            tracing::warn!("Could not write effect: {}", e);
        }
    }
}

impl PageState {
    /// Apply one effect to the view state.
    ///
    /// Effects that point at elements the page does not have are ignored.
    /// An element that has already entered keeps its original entrance and delay.
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SetSticky { sticky } => self.sticky = *sticky,
            Effect::ActivateNav { section } => {
                for link in &mut self.nav_links {
                    link.active = false;
                }
                if let Some(section) = section {
                    if let Some(link) = self.nav_links.iter_mut().find(|l| &l.section == section)
                    {
                        link.active = true;
                    }
                }
            }
            Effect::Enter {
                target,
                entrance,
                delay,
            } => {
                let element = match *target {
                    Target::Element(role) => self.elements.get_mut(&role),
                    Target::ServiceBox(i) => self.service_boxes.get_mut(i),
                    Target::ProjectBox(i) => self.project_boxes.get_mut(i),
                    Target::RadialBar(i) => self.radial_bars.get_mut(i).map(|bar| &mut bar.element),
                };
                if let Some(element) = element {
                    if element.entered.is_none() {
                        element.entered = Some(*entrance);
                        element.delay = *delay;
                    }
                }
            }
            Effect::FillBar { index, width } => {
                if let Some(bar) = self.skill_bars.get_mut(*index) {
                    bar.width = *width;
                }
            }
            Effect::FillRing {
                index,
                stroke_offset,
            } => {
                if let Some(ring) = self
                    .radial_bars
                    .get_mut(*index)
                    .and_then(|bar| bar.ring.as_mut())
                {
                    if stroke_offset.is_some() {
                        ring.stroke_offset = *stroke_offset;
                    }
                    ring.visible = true;
                }
            }
        }
    }
}
