use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use claim_bonus::{ClaimBonus, InMemoryTokenLedger};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Distributor plus the token ledger it pays out of, persisted between cli runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalState {
    pub distributor: ClaimBonus,
    pub ledger: InMemoryTokenLedger,
}

impl LocalState {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| {
            format!(
                "failed to read state {}, run new-distributor first",
                path.display()
            )
        })?;
        let state = bincode::deserialize(&bytes)
            .with_context(|| format!("corrupt state file {}", path.display()))?;
        debug!(path = %path.display(), "loaded state");
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = bincode::serialize(self)?;
        fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "saved state");
        Ok(())
    }

    /// Writes a fresh state, refusing to clobber an existing distributor.
    pub fn create(&self, path: &Path) -> Result<()> {
        if path.exists() {
            bail!("state file {} already exists", path.display());
        }
        self.save(path)
    }
}

#[cfg(test)]
mod tests {
    use claim_bonus::TokenLedger;
    use solana_program::pubkey::Pubkey;

    use super::*;

    fn state() -> LocalState {
        let mut ledger = InMemoryTokenLedger::new(Pubkey::new_unique());
        let vault = Pubkey::new_unique();
        ledger.mint(&vault, 42).unwrap();
        LocalState {
            distributor: ClaimBonus::new(Pubkey::new_unique(), ledger.id(), vault, [3u8; 32]),
            ledger,
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        let state = state();

        state.create(&path).unwrap();
        assert_eq!(LocalState::load(&path).unwrap(), state);

        // a second create must not overwrite
        assert!(state.create(&path).is_err());
    }

    #[test]
    fn test_load_missing_or_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        assert!(LocalState::load(&path).is_err());

        fs::write(&path, b"nope").unwrap();
        assert!(LocalState::load(&path).is_err());
    }
}
