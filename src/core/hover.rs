use smallvec::SmallVec;

/// What kind of media element is being previewed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify an element by tag name; anything else is not previewed.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "img" => Some(MediaKind::Image),
            "video" => Some(MediaKind::Video),
            _ => None,
        }
    }
}

/// Attributes copied from the hovered element onto its popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupSpec {
    pub kind: MediaKind,
    pub src: Option<String>,
    pub alt: Option<String>,
}

impl PopupSpec {
    pub fn image(src: &str, alt: &str) -> Self {
        Self {
            kind: MediaKind::Image,
            src: Some(src.to_string()),
            alt: Some(alt.to_string()),
        }
    }

    pub fn video(current_src: &str, nested_src: Option<&str>) -> Self {
        Self {
            kind: MediaKind::Video,
            src: video_source(current_src, nested_src),
            alt: None,
        }
    }

    /// Video popups must play unattended, which browsers only allow muted
    /// and inline.
    #[inline]
    pub fn autoplays(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Pick the source a video popup should play: the resolved `currentSrc` when
/// the browser has chosen one, otherwise the first nested `<source>`.
pub fn video_source(current_src: &str, nested_src: Option<&str>) -> Option<String> {
    if !current_src.is_empty() {
        return Some(current_src.to_string());
    }
    nested_src
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HoverPhase {
    #[default]
    Idle,
    /// Pointer is over the media; popup present, original hidden.
    Shown,
    /// Pointer left; popup fading out until the removal timer fires.
    Leaving,
}

/// Side effects requested by a session transition, applied in order by the
/// DOM driver. Timer tokens must be handed back unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEffect {
    CreatePopup,
    ScheduleActivate(u32),
    Activate,
    Deactivate,
    HideOriginal,
    ShowOriginal,
    ScheduleRemoval(u32),
    CancelRemoval,
    RemovePopup,
}

pub type HoverEffects = SmallVec<[HoverEffect; 4]>;

/// Hover state of one media element.
///
/// Each transition bumps `generation`; timers carry the generation they were
/// scheduled under and are ignored once it moves on. Re-entering while the
/// popup fades out cancels the removal and reuses the popup, so there is
/// never more than one popup per element.
#[derive(Clone, Debug, Default)]
pub struct HoverSession {
    phase: HoverPhase,
    generation: u32,
}

impl HoverSession {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    #[inline]
    pub fn has_popup(&self) -> bool {
        self.phase != HoverPhase::Idle
    }

    #[inline]
    pub fn original_opacity(&self) -> f32 {
        if self.phase == HoverPhase::Shown {
            0.0
        } else {
            1.0
        }
    }

    pub fn enter(&mut self) -> HoverEffects {
        let mut fx = HoverEffects::new();
        match self.phase {
            HoverPhase::Idle => {
                let token = self.bump();
                self.phase = HoverPhase::Shown;
                fx.push(HoverEffect::CreatePopup);
                fx.push(HoverEffect::HideOriginal);
                fx.push(HoverEffect::ScheduleActivate(token));
            }
            HoverPhase::Leaving => {
                self.bump();
                self.phase = HoverPhase::Shown;
                fx.push(HoverEffect::CancelRemoval);
                fx.push(HoverEffect::HideOriginal);
                fx.push(HoverEffect::Activate);
            }
            HoverPhase::Shown => {}
        }
        fx
    }

    pub fn leave(&mut self) -> HoverEffects {
        let mut fx = HoverEffects::new();
        if self.phase == HoverPhase::Shown {
            let token = self.bump();
            self.phase = HoverPhase::Leaving;
            fx.push(HoverEffect::Deactivate);
            fx.push(HoverEffect::ShowOriginal);
            fx.push(HoverEffect::ScheduleRemoval(token));
        }
        fx
    }

    /// Activation timer fired.
    pub fn activate_due(&mut self, token: u32) -> HoverEffects {
        let mut fx = HoverEffects::new();
        if self.phase == HoverPhase::Shown && token == self.generation {
            fx.push(HoverEffect::Activate);
        }
        fx
    }

    /// Removal timer fired.
    pub fn removal_due(&mut self, token: u32) -> HoverEffects {
        let mut fx = HoverEffects::new();
        if self.phase == HoverPhase::Leaving && token == self.generation {
            self.bump();
            self.phase = HoverPhase::Idle;
            fx.push(HoverEffect::RemovePopup);
        }
        fx
    }

    fn bump(&mut self) -> u32 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
