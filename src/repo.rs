use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};
use crate::object::FsStore;
use crate::types::Identity;

/// name of the control directory inside a work tree
///
/// the tree builder never descends into a directory with this name.
pub const CONTROL_DIR: &str = ".git";

/// branch `HEAD` points at in a fresh repository
const DEFAULT_HEAD: &str = "ref: refs/heads/main\n";

/// a repository: a work tree with a `.git` control directory
pub struct Repo {
    path: PathBuf,
    config: Config,
    store: FsStore,
}

impl Repo {
    /// initialize a new repository at the given path
    pub fn init(path: &Path) -> Result<Self> {
        let git_dir = path.join(CONTROL_DIR);
        if git_dir.exists() {
            return Err(Error::RepoExists(path.to_path_buf()));
        }

        // create directory structure
        std::fs::create_dir_all(git_dir.join("objects")).with_path(&git_dir)?;
        std::fs::create_dir_all(git_dir.join("refs")).with_path(&git_dir)?;

        let head = git_dir.join("HEAD");
        std::fs::write(&head, DEFAULT_HEAD).with_path(&head)?;

        let config = Config::default();
        config.save(&git_dir.join("config.toml"))?;

        tracing::info!(path = %path.display(), "initialized repository");

        Ok(Self::from_parts(path, config))
    }

    /// open an existing repository
    ///
    /// a missing `config.toml` is not an error; the default identity is used.
    pub fn open(path: &Path) -> Result<Self> {
        let git_dir = path.join(CONTROL_DIR);
        if !git_dir.join("objects").is_dir() {
            return Err(Error::NoRepo(path.to_path_buf()));
        }

        let config = Config::load_or_default(&git_dir.join("config.toml"))?;

        Ok(Self::from_parts(path, config))
    }

    fn from_parts(path: &Path, config: Config) -> Self {
        let store = FsStore::new(path.join(CONTROL_DIR).join("objects"));
        Self {
            path: path.to_path_buf(),
            config,
            store,
        }
    }

    /// work tree root path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// the object store backing this repository
    pub fn store(&self) -> &FsStore {
        &self.store
    }

    /// identity used for new commits
    pub fn identity(&self) -> &Identity {
        &self.config.identity
    }
}
