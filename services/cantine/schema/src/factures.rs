use sea_orm::entity::prelude::*;

/// Provider invoice for a billing month.
///
/// `numero` is globally unique; `statut` stores the wire string of
/// `cantine_domain::facture::FactureStatut`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "factures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub numero: String,
    pub annee: i32,
    pub mois: i16,
    pub nombre_jours_travail: i32,
    pub nombre_repas_servis: i32,
    pub prix_unitaire_repas: Decimal,
    pub montant_total: Decimal,
    pub statut: String,
    pub date_emission: chrono::NaiveDate,
    pub date_paiement: Option<chrono::NaiveDate>,
    pub notes: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    CreatedBy,
}

impl ActiveModelBehavior for ActiveModel {}
