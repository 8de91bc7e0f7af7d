mod demo_case;
mod loading;
mod nuke_button;
mod tooltip;

pub use demo_case::DemoCase;
pub use loading::Loading;
pub use nuke_button::NukeButton;
pub use tooltip::Tooltip;
