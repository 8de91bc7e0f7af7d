//! Visible text, tooltip and style derived from the lifecycle phase and the
//! caller's overrides. Pure: same input, same output.

use serde::{Deserialize, Serialize};

use crate::lifecycle::Phase;

pub const IDLE_LABEL: &str = "Launch Rocket";
pub const LOADING_LABEL: &str = "Launching";

pub const LOADING_COLOR: &str = "#ff7900";
pub const ERROR_COLOR: &str = "#FF0000";
pub const TOOLTIP_BACKGROUND: &str = "#000";
pub const TOOLTIP_TEXT_COLOR: &str = "#fff";

/// Which side of the label the spinner sits on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingPosition {
    Start,
    #[default]
    End,
}

/// Flags a caller can force onto the widget regardless of its own phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub error: bool,
    pub loading: bool,
    pub disabled: bool,
}

/// What the tooltip collaborator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipSpec {
    pub text: &'static str,
    pub background: &'static str,
    pub text_color: &'static str,
    /// Shown without hovering (the error tooltip).
    pub always_visible: bool,
    /// Not rendered at all (disabled widget).
    pub hidden: bool,
}

impl TooltipSpec {
    const fn shown(text: &'static str, background: &'static str, always_visible: bool) -> Self {
        Self {
            text,
            background,
            text_color: TOOLTIP_TEXT_COLOR,
            always_visible,
            hidden: false,
        }
    }

    const fn hidden() -> Self {
        Self {
            text: "",
            background: TOOLTIP_BACKGROUND,
            text_color: TOOLTIP_TEXT_COLOR,
            always_visible: false,
            hidden: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Idle,
    Error,
    Loading,
    Disabled,
}

const BASE_STYLE: &str = "display:flex;justify-content:space-evenly;align-items:center;\
width:133px;height:40px;font-family:'Roboto',serif;font-style:normal;font-weight:400;\
font-size:12px;line-height:14px;cursor:pointer;";

impl ButtonStyle {
    /// Inline CSS for the `<button>`.
    pub fn css(self) -> String {
        let variant = match self {
            Self::Idle => "color:#000000;background:#ffffff;border:2px solid #000000;",
            Self::Error => "color:#ff0000;background:#ffffff;border:2px solid #ff0000;",
            Self::Loading => "color:#ff7900;background:#f5f5f5;border:2px solid #ff7900;",
            Self::Disabled => "color:rgba(0, 0, 0, 0.7);background:#f5f5f5;border:2px solid #000000;",
        };
        format!("{BASE_STYLE}{variant}")
    }
}

/// Everything the view needs for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub text: &'static str,
    pub tooltip: TooltipSpec,
    pub style: ButtonStyle,
    pub loading: bool,
    pub error: bool,
    pub disabled: bool,
}

/// Combine the internal phase with caller overrides.
///
/// `disabled` beats everything, then loading beats error.
pub fn derive(phase: Phase, overrides: Overrides) -> Presentation {
    if overrides.disabled {
        return Presentation {
            text: IDLE_LABEL,
            tooltip: TooltipSpec::hidden(),
            style: ButtonStyle::Disabled,
            loading: false,
            error: false,
            disabled: true,
        };
    }

    let loading = overrides.loading || phase == Phase::Loading;
    let error = overrides.error || phase == Phase::Error;

    let (text, tooltip, style) = if loading {
        (
            LOADING_LABEL,
            TooltipSpec::shown("Cancel launch", LOADING_COLOR, false),
            ButtonStyle::Loading,
        )
    } else if error {
        (
            IDLE_LABEL,
            TooltipSpec::shown("Ignition error", ERROR_COLOR, true),
            ButtonStyle::Error,
        )
    } else {
        (
            IDLE_LABEL,
            TooltipSpec::shown("Ignites the fuel", TOOLTIP_BACKGROUND, false),
            ButtonStyle::Idle,
        )
    };

    Presentation {
        text,
        tooltip,
        style,
        loading,
        error,
        disabled: false,
    }
}
