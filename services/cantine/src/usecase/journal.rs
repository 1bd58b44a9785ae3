use chrono::Utc;
use uuid::Uuid;

use cantine_domain::action::ActionKind;
use cantine_domain::pagination::PageRequest;

use crate::domain::repository::ActionLogRepository;
use crate::domain::types::ActionEntry;
use crate::error::CantineError;

/// Append an entry to the action journal.
///
/// Journaling is best-effort: a failed append is logged as a warning and
/// never fails the operation being journaled.
pub async fn enregistrer<R: ActionLogRepository>(
    repo: &R,
    user_id: Option<Uuid>,
    action: ActionKind,
    model_name: &str,
    object_id: Option<Uuid>,
    description: String,
) {
    let entry = ActionEntry {
        id: Uuid::now_v7(),
        user_id,
        action,
        model_name: model_name.to_owned(),
        object_id,
        description,
        created_at: Utc::now(),
    };
    if let Err(e) = repo.append(&entry).await {
        tracing::warn!(error = %e, model = model_name, "failed to append action log");
    }
}

// ── ListJournal ──────────────────────────────────────────────────────────────

pub struct ListJournalUseCase<R: ActionLogRepository> {
    pub journal: R,
}

impl<R: ActionLogRepository> ListJournalUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<ActionEntry>, CantineError> {
        self.journal.list(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct MockJournal {
        entries: Mutex<Vec<ActionEntry>>,
        fail_append: bool,
    }

    impl ActionLogRepository for MockJournal {
        async fn append(&self, entry: &ActionEntry) -> Result<(), CantineError> {
            if self.fail_append {
                return Err(CantineError::Internal(anyhow::anyhow!("db down")));
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }
        async fn list(&self, _page: PageRequest) -> Result<Vec<ActionEntry>, CantineError> {
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    #[tokio::test]
    async fn should_append_entry() {
        let repo = MockJournal {
            entries: Mutex::new(vec![]),
            fail_append: false,
        };
        enregistrer(
            &repo,
            Some(Uuid::now_v7()),
            ActionKind::Create,
            "Eleve",
            None,
            "création élève".into(),
        )
        .await;
        let entries = repo.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ActionKind::Create);
        assert_eq!(entries[0].model_name, "Eleve");
    }

    #[tokio::test]
    async fn should_swallow_append_failure() {
        let repo = MockJournal {
            entries: Mutex::new(vec![]),
            fail_append: true,
        };
        // Must not panic or propagate.
        enregistrer(&repo, None, ActionKind::Delete, "Menu", None, "x".into()).await;
        assert!(repo.entries.lock().unwrap().is_empty());
    }
}
