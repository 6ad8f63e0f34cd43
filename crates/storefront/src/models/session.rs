//! Session-stored types and keys.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session keys for storefront data.
pub mod keys {
    /// Key for the persisted cart (JSON array of cart lines).
    pub const CART: &str = "cart";

    /// Key for the one-shot flash notification.
    pub const FLASH: &str = "flash";
}

/// Ephemeral notification rendered once on the next page view.
///
/// The template auto-dismisses it after a few seconds; taking it clears it
/// from the session, so a reload does not replay it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
    pub kind: FlashKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    /// CSS class suffix for the toast.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Set the one-shot flash notification.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn set_flash(
    session: &Session,
    kind: FlashKind,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(
            keys::FLASH,
            Flash {
                message: message.into(),
                kind,
            },
        )
        .await
}

/// Take (read and clear) the flash notification.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn take_flash(
    session: &Session,
) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove::<Flash>(keys::FLASH).await
}
