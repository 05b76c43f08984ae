//! On-disk layout of a deployment's data directory.

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use skillrep_ledger::{LedgerSnapshot, ProfileLedger};
use skillrep_privacy::EndorserState;
use skillrep_types::{Address, ConfigId};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const SNAPSHOT_FILE: &str = "ledger.snapshot";
const ENDORSER_FILE: &str = "privacy-endorser.json";
const INFO_FILE: &str = "deployment-info.json";
const STAGING_SUFFIX: &str = ".tmp";

/// Summary written once at deploy time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentInfo {
    pub admin: Address,
    pub privacy_endorser: Address,
    pub config_id: ConfigId,
    /// Hex digest of the initial ledger snapshot.
    pub snapshot_hash: String,
    /// Seconds since the Unix epoch.
    pub deployed_at: u64,
}

impl DeploymentInfo {
    pub fn new(ledger: &ProfileLedger, privacy_endorser: Address, snapshot: &LedgerSnapshot) -> Self {
        let deployed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            admin: *ledger.admin(),
            privacy_endorser,
            config_id: ledger.config_id(),
            snapshot_hash: hex::encode(snapshot.hash),
            deployed_at,
        }
    }
}

pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_deployed(&self) -> bool {
        self.root.join(SNAPSHOT_FILE).is_file()
    }

    fn ensure(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("creating data dir {}", self.root.display()))
    }

    /// Persist the ledger and the endorser state together.
    ///
    /// Both files are staged first and only renamed into place once both
    /// writes succeeded. The endorser state is renamed first, so an
    /// interrupted commit may refuse a retried private endorsement but never
    /// counts one twice.
    pub fn commit(
        &self,
        ledger: &ProfileLedger,
        state: &EndorserState,
    ) -> anyhow::Result<LedgerSnapshot> {
        self.ensure()?;
        let snapshot = ledger.snapshot();
        let endorser_json = serde_json::to_string_pretty(state)?;
        let ledger_bytes = snapshot.to_bytes()?;

        let staged_endorser = self.stage(ENDORSER_FILE, endorser_json.as_bytes())?;
        let staged_ledger = match self.stage(SNAPSHOT_FILE, &ledger_bytes) {
            Ok(path) => path,
            Err(e) => {
                let _ = fs::remove_file(&staged_endorser);
                return Err(e);
            }
        };

        self.promote(&staged_endorser, ENDORSER_FILE)?;
        self.promote(&staged_ledger, SNAPSHOT_FILE)?;
        Ok(snapshot)
    }

    pub fn load_ledger(&self) -> anyhow::Result<ProfileLedger> {
        let path = self.root.join(SNAPSHOT_FILE);
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let snapshot = LedgerSnapshot::from_bytes(&bytes)
            .with_context(|| format!("decoding {}", path.display()))?;
        Ok(ProfileLedger::restore(snapshot)?)
    }

    pub fn load_endorser(&self) -> anyhow::Result<EndorserState> {
        self.read_json(ENDORSER_FILE)
    }

    pub fn save_info(&self, info: &DeploymentInfo) -> anyhow::Result<()> {
        self.write_json(INFO_FILE, info)
    }

    pub fn load_info(&self) -> anyhow::Result<DeploymentInfo> {
        self.read_json(INFO_FILE)
    }

    /// Write a fresh deployment. Refuses to overwrite an existing one.
    pub fn deploy(
        &self,
        ledger: &ProfileLedger,
        state: &EndorserState,
        privacy_endorser: Address,
    ) -> anyhow::Result<DeploymentInfo> {
        if self.is_deployed() {
            bail!("{} already holds a deployment", self.root.display());
        }
        let snapshot = self.commit(ledger, state)?;
        let info = DeploymentInfo::new(ledger, privacy_endorser, &snapshot);
        self.save_info(&info)?;
        Ok(info)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_file(name, json.as_bytes())
    }

    /// Replace `name` through a staged copy so readers never see a torn file.
    fn write_file(&self, name: &str, bytes: &[u8]) -> anyhow::Result<()> {
        self.ensure()?;
        let staged = self.stage(name, bytes)?;
        self.promote(&staged, name)
    }

    fn stage(&self, name: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
        let path = self.root.join(format!("{name}{STAGING_SUFFIX}"));
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    fn promote(&self, staged: &Path, name: &str) -> anyhow::Result<()> {
        let path = self.root.join(name);
        fs::rename(staged, &path)
            .with_context(|| format!("moving {} into place", path.display()))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, name: &str) -> anyhow::Result<T> {
        let path = self.root.join(name);
        let json =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeploymentConfig;
    use skillrep_crypto::derive_address;

    fn fresh_ledger(config: &DeploymentConfig) -> ProfileLedger {
        let mut ledger = ProfileLedger::new(config.ledger_config());
        ledger
            .set_privacy_endorser(&config.admin, config.privacy_endorser)
            .unwrap();
        ledger
    }

    #[test]
    fn deploy_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path().join("data"));
        let config = DeploymentConfig::default();
        let ledger = fresh_ledger(&config);

        assert!(!data.is_deployed());
        let info = data
            .deploy(&ledger, &EndorserState::default(), config.privacy_endorser)
            .unwrap();

        assert!(data.is_deployed());
        assert_eq!(data.load_info().unwrap(), info);
        assert_eq!(info.admin, config.admin);
        assert_eq!(info.snapshot_hash, hex::encode(ledger.snapshot().hash));
    }

    #[test]
    fn second_deploy_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let config = DeploymentConfig::default();
        let ledger = fresh_ledger(&config);
        data.deploy(&ledger, &EndorserState::default(), config.privacy_endorser)
            .unwrap();
        assert!(data
            .deploy(&ledger, &EndorserState::default(), config.privacy_endorser)
            .is_err());
    }

    #[test]
    fn ledger_and_endorser_state_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let config = DeploymentConfig::default();
        let mut ledger = fresh_ledger(&config);
        let alice = derive_address(b"alice");
        ledger.verify(&config.admin, alice).unwrap();
        ledger.set_skill(&alice, &alice, 2, "Go").unwrap();

        let mut state = EndorserState::default();
        state.verified.verify(alice);

        data.commit(&ledger, &state).unwrap();

        let restored = data.load_ledger().unwrap();
        assert!(restored.is_verified(&alice));
        let skills = restored.get_skills(&alice).unwrap();
        assert_eq!(skills[2].name, "Go");
        assert_eq!(restored.snapshot().hash, ledger.snapshot().hash);
        assert!(data.load_endorser().unwrap().verified.is_verified(&alice));
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        fs::write(dir.path().join(SNAPSHOT_FILE), b"not a snapshot").unwrap();
        assert!(data.load_ledger().is_err());
    }

    #[test]
    fn commit_replaces_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let config = DeploymentConfig::default();
        let mut ledger = fresh_ledger(&config);
        data.deploy(&ledger, &EndorserState::default(), config.privacy_endorser)
            .unwrap();

        let alice = derive_address(b"alice");
        ledger.verify(&config.admin, alice).unwrap();
        let mut state = EndorserState::default();
        state.verified.verify(alice);
        let snapshot = data.commit(&ledger, &state).unwrap();

        assert_eq!(data.load_ledger().unwrap().snapshot().hash, snapshot.hash);
        assert!(data.load_endorser().unwrap().verified.is_verified(&alice));
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(STAGING_SUFFIX))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn failed_commit_keeps_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataDir::new(dir.path());
        let config = DeploymentConfig::default();
        let mut ledger = fresh_ledger(&config);
        data.deploy(&ledger, &EndorserState::default(), config.privacy_endorser)
            .unwrap();
        let before = data.load_ledger().unwrap().snapshot().hash;

        // A directory in the ledger's staging spot makes its write fail.
        fs::create_dir(dir.path().join(format!("{SNAPSHOT_FILE}{STAGING_SUFFIX}"))).unwrap();

        let alice = derive_address(b"alice");
        ledger.verify(&config.admin, alice).unwrap();
        let mut state = EndorserState::default();
        state.verified.verify(alice);
        assert!(data.commit(&ledger, &state).is_err());

        assert_eq!(data.load_ledger().unwrap().snapshot().hash, before);
        assert!(!data.load_endorser().unwrap().verified.is_verified(&alice));
        assert!(!dir
            .path()
            .join(format!("{ENDORSER_FILE}{STAGING_SUFFIX}"))
            .exists());
    }
}
