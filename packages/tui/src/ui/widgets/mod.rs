pub mod dialog;
pub mod status_bar;
pub mod toast;

pub use dialog::{ConfirmationDialog, ConfirmationDialogWidget, DialogFocus, DialogResult};
pub use status_bar::StatusBarWidget;
pub use toast::ToastWidget;
