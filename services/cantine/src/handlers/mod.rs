pub mod auth;
pub mod classe;
pub mod eleve;
pub mod facture;
pub mod inscription;
pub mod journal;
pub mod menu;
pub mod prestataire;
pub mod profil;
pub mod rapport;
pub mod recherche;
pub mod repas;
pub mod sauvegarde;

use cantine_auth_types::identity::Identity;

use crate::domain::types::Acteur;
use crate::error::CantineError;
use crate::state::AppState;
use crate::usecase::acteur::ResoudreActeurUseCase;

/// Resolve the acting profile (provider-or-admin gate).
pub(crate) async fn acteur(
    state: &AppState,
    identity: &Identity,
) -> Result<Acteur, CantineError> {
    ResoudreActeurUseCase {
        profils: state.profil_repo(),
    }
    .execute(identity.user_id)
    .await
}

/// Resolve the acting profile and require ADMIN.
pub(crate) async fn acteur_admin(
    state: &AppState,
    identity: &Identity,
) -> Result<Acteur, CantineError> {
    ResoudreActeurUseCase {
        profils: state.profil_repo(),
    }
    .execute_admin(identity.user_id)
    .await
}
