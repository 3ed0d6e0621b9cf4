//! Application context: the collaborators every service depends on,
//! resolved once at process wiring time in `main.rs` and injected into
//! handlers as `web::Data<AppContext>`. Nothing is looked up ad hoc; the
//! import orchestrator and the CRUD services receive their storage and
//! notification dependencies through this struct.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::mail::Notifier;
use crate::repository::collaborator::CollaboratorRepo;
use crate::repository::user::UserRepo;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub collaborators: Arc<dyn CollaboratorRepo>,
    pub users: Arc<dyn UserRepo>,
    pub notifier: Arc<dyn Notifier>,
}
