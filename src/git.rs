//! Version-control driver for the publishing repository.
//!
//! Everything goes through the external `git` binary rather than a
//! library binding, so the exact commands a user would type by hand are
//! what runs. All operations are no-ops when the destination is not a
//! repository, and dry-run mode reports each command without running it.

use crate::{log, utils::exec::Cmd};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Bind to the repository rooted at `root`.
    ///
    /// Fails if no `git` binary is on PATH; whether `root` actually is a
    /// repository is checked per-operation via [`Self::is_repo`].
    pub fn open(root: &Path) -> Result<Self> {
        which::which("git").context("`git` not found on PATH")?;
        Ok(Self { root: root.to_path_buf() })
    }

    pub fn is_repo(&self) -> bool {
        self.root.join(".git").exists()
    }

    fn git(&self) -> Cmd {
        Cmd::new("git").cwd(&self.root)
    }

    /// Stage everything, then show the short status of what was staged.
    ///
    /// The status listing is informational; a failure there is reported
    /// and swallowed rather than aborting the deploy.
    pub fn stage_all(&self, dry_run: bool) -> Result<()> {
        if !self.is_repo() {
            return Ok(());
        }
        if dry_run {
            log!("git"; "[dry-run] would run: git add -A");
            return Ok(());
        }

        self.git().args(["add", "-A"]).run()?;

        match self.git().args(["status", "--short"]).output() {
            Ok(out) => {
                let listing = String::from_utf8_lossy(&out.stdout);
                let listing = listing.trim_end();
                if listing.is_empty() {
                    log!("git"; "no changes to stage");
                } else {
                    log!("git"; "staged changes:\n{listing}");
                }
            }
            Err(e) => log!("warning"; "could not read git status: {e}"),
        }

        Ok(())
    }

    /// Whether the index differs from HEAD.
    ///
    /// `git diff --cached --quiet` exits non-zero exactly when staged
    /// changes exist, so a failing exit status is the positive answer.
    fn has_staged_changes(&self) -> Result<bool> {
        let out = self.git().args(["diff", "--cached", "--quiet"]).output()?;
        Ok(!out.status.success())
    }

    /// Commit staged changes with `message`. Nothing staged means nothing
    /// to do, not an error.
    pub fn commit(&self, message: &str, dry_run: bool) -> Result<()> {
        if !self.is_repo() {
            return Ok(());
        }
        if dry_run {
            log!("git"; "[dry-run] would run: git commit -m \"{message}\"");
            return Ok(());
        }

        if !self.has_staged_changes()? {
            log!("git"; "nothing to commit");
            return Ok(());
        }

        self.git().args(["commit", "-m", message]).run()?;
        log!("git"; "committed: {message}");
        Ok(())
    }

    /// Push the current branch to its configured remote.
    pub fn push(&self, dry_run: bool) -> Result<()> {
        if !self.is_repo() {
            return Ok(());
        }
        if dry_run {
            log!("git"; "[dry-run] would run: git push");
            return Ok(());
        }

        self.git().arg("push").run()?;
        log!("git"; "pushed to remote");
        Ok(())
    }
}
