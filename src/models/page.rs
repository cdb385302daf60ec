use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fraction of the viewport height by which a section's activation is pulled
/// up: a section counts as in view once its top crosses 40% down the screen.
pub const ACTIVATION_RATIO: f64 = 0.4;

/// Fill width every skill bar starts with, in percent.
pub const INITIAL_BAR_WIDTH: f64 = 0.0;

/// Scroll position and viewport size at the moment of a trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollState {
    /// Vertical scroll offset of the window.
    pub offset: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn new(offset: f64, viewport_height: f64) -> Self {
        Self {
            offset,
            viewport_height,
        }
    }
}

/// A page section with its measured layout.
///
/// Geometry is re-measured by the host before every trigger, so sections
/// carry no state of their own. Whether a section is active is derived from
/// the current [`ScrollState`] via [`Section::is_in_view`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    /// Offset of the section's top edge from the top of the document.
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// The known section this one corresponds to, if any.
    pub fn kind(&self) -> Option<SectionKind> {
        SectionKind::from_str(&self.id)
    }

    /// Lower bound is inclusive, upper bound exclusive.
    pub fn is_in_view(&self, scroll: &ScrollState) -> bool {
        let start = self.top - scroll.viewport_height * ACTIVATION_RATIO;
        scroll.offset >= start && scroll.offset < start + self.height
    }
}

/// The sections the animation policy knows about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Home,
    About,
    Services,
    Skills,
    Projects,
    Contact,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::Services => "services",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Contact => "contact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Self::Home),
            "about" => Some(Self::About),
            "services" => Some(Self::Services),
            "skills" => Some(Self::Skills),
            "projects" => Some(Self::Projects),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }
}

/// Header navigation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    /// Id of the section this link scrolls to.
    pub section: String,
    #[serde(default)]
    pub active: bool,
}

impl NavLink {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            active: false,
        }
    }
}

/// The visual transition an element plays when its section first comes into view.
///
/// Each kind maps to the stylesheet class that runs the transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Entrance {
    FadeIn,
    ZoomIn,
    SlideLeft,
    SlideRight,
}

impl Entrance {
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::FadeIn => "animate",
            Self::ZoomIn => "animate__zoomIn",
            Self::SlideLeft => "animate-left",
            Self::SlideRight => "animate-right",
        }
    }
}

/// Singular page elements, looked up by role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ElementRole {
    HomeContent,
    HomeImage,
    AboutHeading,
    AboutImage,
    AboutContent,
    ServicesHeading,
    SkillsHeading,
    TechnicalSkills,
    ProfessionalSkills,
    ProjectsHeading,
    ContactHeading,
    ContactInfo,
    ContactForm,
}

/// An element that animates in exactly once.
///
/// `entered` only ever goes from `None` to `Some`; the stagger `delay` is
/// assigned in the same step and kept from then on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimatedElement {
    #[serde(default)]
    pub entered: Option<Entrance>,
    /// Transition delay in seconds.
    #[serde(default)]
    pub delay: Option<f64>,
}

impl AnimatedElement {
    pub fn is_entered(&self) -> bool {
        self.entered.is_some()
    }
}

/// Horizontal skill bar whose fill width comes from the label beside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBar {
    /// Label text next to the bar, e.g. `"90%"`.
    #[serde(default)]
    pub label: Option<String>,
    /// Current fill width in percent.
    #[serde(default)]
    pub width: f64,
}

impl SkillBar {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            width: INITIAL_BAR_WIDTH,
        }
    }

    /// Width the label asks for. Unparsable or missing labels yield `None`.
    pub fn target_width(&self) -> Option<f64> {
        self.label.as_deref().and_then(parse_percent)
    }
}

/// Circular progress indicator drawn inside a [`RadialBar`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressRing {
    /// Progress percentage from the ring's markup; `None` when missing or not a number.
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub stroke_offset: Option<f64>,
    #[serde(default)]
    pub visible: bool,
}

/// Radial skill gauge: an animated container with an optional progress ring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RadialBar {
    #[serde(default)]
    pub element: AnimatedElement,
    #[serde(default)]
    pub ring: Option<ProgressRing>,
}

impl RadialBar {
    pub fn with_progress(progress: f64) -> Self {
        Self {
            element: AnimatedElement::default(),
            ring: Some(ProgressRing {
                progress: Some(progress),
                ..ProgressRing::default()
            }),
        }
    }
}

/// Everything the animator reads and mutates.
///
/// Hosts build this from the live document (or a layout snapshot) and keep
/// it between triggers; the animator only changes it through
/// [`Effect`](crate::animator::Effect)s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub nav_links: Vec<NavLink>,
    #[serde(default)]
    pub elements: BTreeMap<ElementRole, AnimatedElement>,
    #[serde(default)]
    pub service_boxes: Vec<AnimatedElement>,
    #[serde(default)]
    pub project_boxes: Vec<AnimatedElement>,
    #[serde(default)]
    pub skill_bars: Vec<SkillBar>,
    #[serde(default)]
    pub radial_bars: Vec<RadialBar>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section together with a nav link pointing at it.
    pub fn with_section(mut self, id: &str, top: f64, height: f64) -> Self {
        self.sections.push(Section::new(id, top, height));
        self.nav_links.push(NavLink::new(id));
        self
    }

    pub fn with_element(mut self, role: ElementRole) -> Self {
        self.elements.insert(role, AnimatedElement::default());
        self
    }

    pub fn element(&self, role: ElementRole) -> Option<&AnimatedElement> {
        self.elements.get(&role)
    }

    /// Section ids of all currently active nav links, in document order.
    pub fn active_nav_links(&self) -> Vec<&str> {
        self.nav_links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.section.as_str())
            .collect()
    }
}

/// Parse label text such as `"90%"` or `" 72.5 % "` into a percentage.
pub fn parse_percent(text: &str) -> Option<f64> {
    let value: f64 = text.trim().trim_end_matches('%').trim().parse().ok()?;
    value.is_finite().then_some(value)
}
