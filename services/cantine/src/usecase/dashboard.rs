use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::domain::repository::{
    EleveRepository, FactureRepository, InscriptionRepository, MenuRepository, RepasRepository,
};
use crate::domain::types::Menu;
use crate::error::CantineError;

/// Dashboard summary counts for the acting user.
#[derive(Debug)]
pub struct Dashboard {
    pub total_eleves_actifs: u64,
    pub repas_aujourd_hui: u64,
    pub repas_ce_mois: u64,
    pub eleves_inscrits_mois: u64,
    /// Pending (ENVOYEE) invoices created by the acting user.
    pub factures_en_attente: u64,
    pub menu_du_jour: Option<Menu>,
}

pub struct DashboardUseCase<
    E: EleveRepository,
    R: RepasRepository,
    I: InscriptionRepository,
    F: FactureRepository,
    M: MenuRepository,
> {
    pub eleves: E,
    pub repas: R,
    pub inscriptions: I,
    pub factures: F,
    pub menus: M,
}

impl<
    E: EleveRepository,
    R: RepasRepository,
    I: InscriptionRepository,
    F: FactureRepository,
    M: MenuRepository,
> DashboardUseCase<E, R, I, F, M>
{
    pub async fn execute(
        &self,
        acting_user: Uuid,
        aujourd_hui: NaiveDate,
    ) -> Result<Dashboard, CantineError> {
        let premier_jour_mois = aujourd_hui.with_day(1).expect("day 1 always valid");
        Ok(Dashboard {
            total_eleves_actifs: self.eleves.count_actifs().await?,
            repas_aujourd_hui: self.repas.count_periode(aujourd_hui, aujourd_hui).await?,
            repas_ce_mois: self
                .repas
                .count_periode(premier_jour_mois, aujourd_hui)
                .await?,
            eleves_inscrits_mois: self
                .inscriptions
                .count_mois(aujourd_hui.year(), aujourd_hui.month() as u8)
                .await?,
            factures_en_attente: self.factures.count_en_attente(acting_user).await?,
            menu_du_jour: self.menus.find_by_date(aujourd_hui).await?,
        })
    }
}
