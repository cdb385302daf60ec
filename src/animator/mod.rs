//! Scroll-driven section animations.
//!
//! On every scroll event (and once when the page loads) the host calls
//! [`ViewportAnimator::trigger`]. The animator works out which section sits
//! in the viewport, keeps the header and navigation in sync with it and plays
//! that section's entrance animations. Every animation is one-shot: scrolling
//! back into a section never replays it.
//!
//! The work is split in two so it can be tested without a browser:
//!
//! - [`plan`] is pure. It compares a [`PageState`] against a [`ScrollState`]
//!   and returns the [`Effect`]s needed to bring the page up to date.
//! - [`PageState::apply`] folds an effect into the view state, and the
//!   [`VisualSurface`] renders it.
//!
//! `plan` never emits an effect that would leave the page unchanged, so
//! re-planning an up-to-date page yields nothing.

mod effect;
pub mod progress;

pub use effect::{Effect, JsonLinesSurface, NullSurface, Target, VisualSurface};

use crate::models::{
    AnimatedElement, ElementRole, Entrance, PageState, ScrollState, Section, SectionKind,
    INITIAL_BAR_WIDTH,
};

/// Scroll offset past which the header switches to its sticky style.
pub const STICKY_THRESHOLD: f64 = 50.0;

/// Delay step, in seconds, between consecutive boxes of a staggered group.
pub const STAGGER_STEP: f64 = 0.15;

/// Transition delay of the `index`-th element of a staggered group.
pub fn stagger_delay(index: usize) -> f64 {
    index as f64 * STAGGER_STEP
}

/// Host event that caused a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The document finished loading.
    Load,
    Scroll,
}

/// Owns the page's view state and the surface it is rendered on.
#[derive(Debug)]
pub struct ViewportAnimator<S: VisualSurface> {
    page: PageState,
    surface: S,
}

impl<S: VisualSurface> ViewportAnimator<S> {
    pub fn new(page: PageState, surface: S) -> Self {
        Self { page, surface }
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    /// Mutable access for hosts that re-measure section geometry between triggers.
    pub fn page_mut(&mut self) -> &mut PageState {
        &mut self.page
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_parts(self) -> (PageState, S) {
        (self.page, self.surface)
    }

    /// Bring the page in line with `scroll`. Returns the number of effects applied.
    pub fn trigger(&mut self, trigger: Trigger, scroll: ScrollState) -> usize {
        let effects = plan(&self.page, &scroll);
        tracing::trace!(
            ?trigger,
            offset = scroll.offset,
            viewport = scroll.viewport_height,
            effects = effects.len(),
            "viewport trigger"
        );

        for effect in &effects {
            self.page.apply(effect);
            self.surface.render(effect);
        }
        effects.len()
    }

    pub fn on_load(&mut self, scroll: ScrollState) -> usize {
        self.trigger(Trigger::Load, scroll)
    }

    pub fn on_scroll(&mut self, scroll: ScrollState) -> usize {
        self.trigger(Trigger::Scroll, scroll)
    }
}

/// Compute the effects that bring `page` up to date with `scroll`.
///
/// Every section in view plays its animations, once per section kind even
/// when several in-view sections share an id. When overlapping layout puts
/// more than one section in view, the last one in document order owns the
/// navigation highlight.
pub fn plan(page: &PageState, scroll: &ScrollState) -> Vec<Effect> {
    let mut effects = Vec::new();

    let sticky = scroll.offset > STICKY_THRESHOLD;
    if sticky != page.sticky {
        effects.push(Effect::SetSticky { sticky });
    }

    let in_view: Vec<&Section> = page
        .sections
        .iter()
        .filter(|section| section.is_in_view(scroll))
        .collect();

    let nav_section = in_view.last().map(|section| section.id.as_str());
    if let Some(effect) = plan_nav(page, nav_section) {
        effects.push(effect);
    }

    let mut planned: Vec<SectionKind> = Vec::new();
    for kind in in_view.iter().filter_map(|section| section.kind()) {
        if planned.contains(&kind) {
            continue;
        }
        planned.push(kind);
        plan_section(page, kind, &mut effects);
    }

    effects
}

fn plan_nav(page: &PageState, section: Option<&str>) -> Option<Effect> {
    let wanted = section.and_then(|id| page.nav_links.iter().position(|link| link.section == id));
    let active: Vec<usize> = page
        .nav_links
        .iter()
        .enumerate()
        .filter(|(_, link)| link.active)
        .map(|(i, _)| i)
        .collect();

    let in_sync = match wanted {
        Some(i) => active == [i],
        None => active.is_empty(),
    };
    if in_sync {
        return None;
    }

    Some(Effect::ActivateNav {
        section: section.map(str::to_string),
    })
}

fn plan_section(page: &PageState, kind: SectionKind, effects: &mut Vec<Effect>) {
    use ElementRole::*;

    match kind {
        SectionKind::Home => {
            enter(page, HomeContent, Entrance::FadeIn, effects);
            enter(page, HomeImage, Entrance::ZoomIn, effects);
        }
        SectionKind::About => {
            enter(page, AboutHeading, Entrance::FadeIn, effects);
            enter(page, AboutImage, Entrance::ZoomIn, effects);
            enter(page, AboutContent, Entrance::FadeIn, effects);
        }
        SectionKind::Services => {
            enter(page, ServicesHeading, Entrance::FadeIn, effects);
            stagger(&page.service_boxes, Target::ServiceBox, effects);
        }
        SectionKind::Skills => {
            enter(page, SkillsHeading, Entrance::FadeIn, effects);
            enter(page, TechnicalSkills, Entrance::SlideLeft, effects);
            enter(page, ProfessionalSkills, Entrance::SlideRight, effects);
            fill_skill_bars(page, effects);
            fill_radial_bars(page, effects);
        }
        SectionKind::Projects => {
            enter(page, ProjectsHeading, Entrance::FadeIn, effects);
            stagger(&page.project_boxes, Target::ProjectBox, effects);
        }
        SectionKind::Contact => {
            enter(page, ContactHeading, Entrance::FadeIn, effects);
            enter(page, ContactInfo, Entrance::FadeIn, effects);
            enter(page, ContactForm, Entrance::FadeIn, effects);
        }
    }
}

fn enter(page: &PageState, role: ElementRole, entrance: Entrance, effects: &mut Vec<Effect>) {
    if page.element(role).is_some_and(|element| !element.is_entered()) {
        effects.push(Effect::Enter {
            target: Target::Element(role),
            entrance,
            delay: None,
        });
    }
}

fn stagger(elements: &[AnimatedElement], target: fn(usize) -> Target, effects: &mut Vec<Effect>) {
    for (index, _) in elements
        .iter()
        .enumerate()
        .filter(|(_, element)| !element.is_entered())
    {
        effects.push(Effect::Enter {
            target: target(index),
            entrance: Entrance::FadeIn,
            delay: Some(stagger_delay(index)),
        });
    }
}

// Bars still at their initial width take the width from their label.
fn fill_skill_bars(page: &PageState, effects: &mut Vec<Effect>) {
    for (index, bar) in page.skill_bars.iter().enumerate() {
        if bar.width != INITIAL_BAR_WIDTH {
            continue;
        }
        if let Some(width) = bar.target_width().filter(|width| *width != bar.width) {
            effects.push(Effect::FillBar { index, width });
        }
    }
}

fn fill_radial_bars(page: &PageState, effects: &mut Vec<Effect>) {
    for (index, bar) in page.radial_bars.iter().enumerate() {
        if bar.element.is_entered() {
            continue;
        }
        effects.push(Effect::Enter {
            target: Target::RadialBar(index),
            entrance: Entrance::FadeIn,
            delay: Some(stagger_delay(index)),
        });
        if let Some(ring) = &bar.ring {
            effects.push(Effect::FillRing {
                index,
                stroke_offset: ring.progress.map(progress::stroke_offset),
            });
        }
    }
}
