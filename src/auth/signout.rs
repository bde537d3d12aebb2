use axum::debug_handler;
use tower_sessions::Session;

use crate::result::Envelope;

#[debug_handler]
pub(crate) async fn signout(session: Session) -> Envelope<()> {
    session.clear().await;
    Envelope::success(())
}
