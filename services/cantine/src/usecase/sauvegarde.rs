use crate::domain::dump::CantineDump;
use crate::domain::repository::SauvegardeRepository;
use crate::error::CantineError;

// ── ExportDump ───────────────────────────────────────────────────────────────

pub struct ExportDumpUseCase<R: SauvegardeRepository> {
    pub sauvegardes: R,
}

impl<R: SauvegardeRepository> ExportDumpUseCase<R> {
    pub async fn execute(&self) -> Result<CantineDump, CantineError> {
        self.sauvegardes.export_dump().await
    }
}

// ── RestoreDump ──────────────────────────────────────────────────────────────

/// Validate then apply a dump. An invalid dump is rejected before any
/// write; the restore itself runs in one transaction at the storage layer.
pub struct RestoreDumpUseCase<R: SauvegardeRepository> {
    pub sauvegardes: R,
}

impl<R: SauvegardeRepository> RestoreDumpUseCase<R> {
    pub async fn execute(&self, dump: &CantineDump) -> Result<(), CantineError> {
        dump.valider().map_err(CantineError::DumpInvalide)?;
        self.sauvegardes.restore_dump(dump).await
    }
}
