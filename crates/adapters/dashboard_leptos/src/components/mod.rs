mod notification;
mod server_card;
mod service_badge;
mod settings_dialog;
mod spinner;
mod theme_toggle;

pub use notification::Notification;
pub use server_card::ServerCard;
pub use service_badge::ServiceBadge;
pub use settings_dialog::SettingsDialog;
pub use spinner::Spinner;
pub use theme_toggle::ThemeToggle;
