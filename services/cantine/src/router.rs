use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use cantine_core::health::{healthz, readyz};
use cantine_core::middleware::request_id_layer;

use crate::handlers::{
    auth::{login, refresh, verify},
    classe::{create_classe, delete_classe, get_classe, list_classes, update_classe},
    eleve::{
        create_eleve, delete_eleve, export_eleves, get_eleve, inscrits_ce_mois, list_eleves,
        update_eleve,
    },
    facture::{create_facture, delete_facture, get_facture, list_factures, update_facture},
    inscription::{
        create_inscription, delete_inscription, get_inscription, list_inscriptions,
        update_inscription,
    },
    journal::list_journal,
    menu::{
        create_menu, delete_menu, get_menu, list_menus, menu_aujourdhui, menus_mois, update_menu,
    },
    prestataire::{
        create_prestataire, delete_prestataire, list_prestataires, update_prestataire,
    },
    profil::{dashboard, mon_profil},
    rapport::generer_rapport,
    recherche::recherche_globale,
    repas::{
        create_repas, decompte_journalier, decompte_mensuel, delete_repas, eleves_a_marquer,
        get_repas, list_repas, marquer_multiples, repas_aujourdhui, statistiques, update_repas,
    },
    sauvegarde::{export_sauvegarde, restaurer_sauvegarde},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/verify", post(verify))
        // Eleves
        .route("/eleves", get(list_eleves))
        .route("/eleves", post(create_eleve))
        .route("/eleves/inscrits_ce_mois", get(inscrits_ce_mois))
        .route("/eleves/export", get(export_eleves))
        .route("/eleves/{id}", get(get_eleve))
        .route("/eleves/{id}", put(update_eleve))
        .route("/eleves/{id}", delete(delete_eleve))
        // Classes
        .route("/classes", get(list_classes))
        .route("/classes", post(create_classe))
        .route("/classes/{id}", get(get_classe))
        .route("/classes/{id}", put(update_classe))
        .route("/classes/{id}", delete(delete_classe))
        // Menus
        .route("/menus", get(list_menus))
        .route("/menus", post(create_menu))
        .route("/menus/aujourdhui", get(menu_aujourdhui))
        .route("/menus/mois", get(menus_mois))
        .route("/menus/{id}", get(get_menu))
        .route("/menus/{id}", put(update_menu))
        .route("/menus/{id}", delete(delete_menu))
        // Repas
        .route("/repas", get(list_repas))
        .route("/repas", post(create_repas))
        .route("/repas/aujourdhui", get(repas_aujourdhui))
        .route("/repas/a_marquer", get(eleves_a_marquer))
        .route("/repas/marquer_multiples", post(marquer_multiples))
        .route("/repas/statistiques", get(statistiques))
        .route("/repas/{id}", get(get_repas))
        .route("/repas/{id}", put(update_repas))
        .route("/repas/{id}", delete(delete_repas))
        // Inscriptions
        .route("/inscriptions", get(list_inscriptions))
        .route("/inscriptions", post(create_inscription))
        .route("/inscriptions/{id}", get(get_inscription))
        .route("/inscriptions/{id}", put(update_inscription))
        .route("/inscriptions/{id}", delete(delete_inscription))
        // Factures
        .route("/factures", get(list_factures))
        .route("/factures", post(create_facture))
        .route("/factures/{id}", get(get_facture))
        .route("/factures/{id}", put(update_facture))
        .route("/factures/{id}", delete(delete_facture))
        // Prestataires
        .route("/prestataires", get(list_prestataires))
        .route("/prestataires", post(create_prestataire))
        .route("/prestataires/{id}", put(update_prestataire))
        .route("/prestataires/{id}", delete(delete_prestataire))
        // Profil
        .route("/profil/mon_profil", get(mon_profil))
        .route("/profil/dashboard", get(dashboard))
        // Décomptes / rapports / recherche
        .route("/decomptes/journalier", get(decompte_journalier))
        .route("/decomptes/mensuel", get(decompte_mensuel))
        .route("/rapports", get(generer_rapport))
        .route("/recherche", get(recherche_globale))
        // Journal
        .route("/journal", get(list_journal))
        // Sauvegarde
        .route("/sauvegarde/export", get(export_sauvegarde))
        .route("/sauvegarde/restaurer", post(restaurer_sauvegarde))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
