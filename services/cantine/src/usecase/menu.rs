use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use cantine_domain::calendrier::{jour_semaine_label, mois_bornes};
use cantine_domain::pagination::PageRequest;

use crate::domain::repository::MenuRepository;
use crate::domain::types::{Menu, MenuFiltre};
use crate::error::CantineError;

// ── CreateMenu ───────────────────────────────────────────────────────────────

pub struct CreateMenuInput {
    pub date: NaiveDate,
    /// Blank → derived from the date (French weekday label).
    pub jour_semaine: Option<String>,
    pub plat_principal: String,
    pub accompagnement: String,
    pub dessert: String,
    pub disponible: bool,
    pub notes: String,
}

pub struct CreateMenuUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> CreateMenuUseCase<R> {
    pub async fn execute(&self, input: CreateMenuInput) -> Result<Menu, CantineError> {
        if input.plat_principal.trim().is_empty() {
            return Err(CantineError::MissingData);
        }
        let jour_semaine = match input.jour_semaine {
            Some(j) if !j.trim().is_empty() => j,
            _ => jour_semaine_label(input.date).to_owned(),
        };
        let now = Utc::now();
        let menu = Menu {
            id: Uuid::now_v7(),
            date: input.date,
            jour_semaine,
            plat_principal: input.plat_principal,
            accompagnement: input.accompagnement,
            dessert: input.dessert,
            disponible: input.disponible,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        self.menus.create(&menu).await?;
        Ok(menu)
    }
}

// ── GetMenu / MenuDuJour / ListMenus / MenusDuMois ───────────────────────────

pub struct GetMenuUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> GetMenuUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Menu, CantineError> {
        self.menus
            .find_by_id(id)
            .await?
            .ok_or(CantineError::MenuNotFound)
    }
}

/// Menu for a specific date; `MenuNotFound` when none is defined.
pub struct MenuDuJourUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> MenuDuJourUseCase<R> {
    pub async fn execute(&self, date: NaiveDate) -> Result<Menu, CantineError> {
        self.menus
            .find_by_date(date)
            .await?
            .ok_or(CantineError::MenuNotFound)
    }
}

pub struct ListMenusUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> ListMenusUseCase<R> {
    pub async fn execute(
        &self,
        filtre: MenuFiltre,
        page: PageRequest,
    ) -> Result<Vec<Menu>, CantineError> {
        self.menus.list(filtre, page).await
    }
}

pub struct MenusDuMoisUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> MenusDuMoisUseCase<R> {
    pub async fn execute(&self, annee: i32, mois: u8) -> Result<Vec<Menu>, CantineError> {
        let (debut, fin) = mois_bornes(annee, mois).ok_or(CantineError::MoisInvalide)?;
        self.menus.list_periode(debut, fin).await
    }
}

// ── UpdateMenu ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateMenuInput {
    pub date: Option<NaiveDate>,
    pub jour_semaine: Option<String>,
    pub plat_principal: Option<String>,
    pub accompagnement: Option<String>,
    pub dessert: Option<String>,
    pub disponible: Option<bool>,
    pub notes: Option<String>,
}

pub struct UpdateMenuUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> UpdateMenuUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateMenuInput) -> Result<Menu, CantineError> {
        let mut menu = self
            .menus
            .find_by_id(id)
            .await?
            .ok_or(CantineError::MenuNotFound)?;
        let date_changed = input.date.is_some_and(|d| d != menu.date);
        if let Some(date) = input.date {
            menu.date = date;
        }
        match input.jour_semaine {
            Some(j) if !j.trim().is_empty() => menu.jour_semaine = j,
            // Re-derive when the date moved and no explicit label came along.
            _ if date_changed => menu.jour_semaine = jour_semaine_label(menu.date).to_owned(),
            _ => {}
        }
        if let Some(plat_principal) = input.plat_principal {
            menu.plat_principal = plat_principal;
        }
        if let Some(accompagnement) = input.accompagnement {
            menu.accompagnement = accompagnement;
        }
        if let Some(dessert) = input.dessert {
            menu.dessert = dessert;
        }
        if let Some(disponible) = input.disponible {
            menu.disponible = disponible;
        }
        if let Some(notes) = input.notes {
            menu.notes = notes;
        }
        menu.updated_at = Utc::now();
        self.menus.update(&menu).await?;
        Ok(menu)
    }
}

// ── DeleteMenu ───────────────────────────────────────────────────────────────

/// Deleting a menu nulls the menu reference of existing repas (FK
/// set-null); the meal records themselves persist.
pub struct DeleteMenuUseCase<R: MenuRepository> {
    pub menus: R,
}

impl<R: MenuRepository> DeleteMenuUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), CantineError> {
        let deleted = self.menus.delete(id).await?;
        if !deleted {
            return Err(CantineError::MenuNotFound);
        }
        Ok(())
    }
}
