pub mod acteur;
pub mod auth;
pub mod classe;
pub mod dashboard;
pub mod eleve;
pub mod facture;
pub mod inscription;
pub mod journal;
pub mod menu;
pub mod rapport;
pub mod recherche;
pub mod repas;
pub mod sauvegarde;
