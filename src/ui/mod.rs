//! Terminal User Interface components

mod app;
mod chooser;
mod keyboard_visual;
pub mod theme;
mod toast;
mod widgets;

pub use app::{
    App, AppState, KeyDisposition, RequestPhase, DEVICE_CONNECTED_MESSAGE, DEVICE_FAILED_MESSAGE,
};
pub use chooser::DeviceChooser;
pub use keyboard_visual::{KeyboardVisual, BOARD_HEIGHT};
pub use theme::ThemeColors;
pub use toast::{Notifications, Toast, ToastKind};
pub use widgets::*;
